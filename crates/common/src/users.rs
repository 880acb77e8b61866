//! Flat-file credential store
//!
//! A JSON object mapping usernames to passwords, read whole on every
//! access and rewritten whole on every mutation. Passwords are stored
//! and compared as plain strings, matching the system this console
//! replaces; it is a single-operator admin tool, not a user-facing one.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// Credential store bound to a JSON file path
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping. A missing file is an empty store, never an
    /// error; a malformed file surfaces as `Serialization`.
    pub fn load(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// True iff the username is present and the stored password equals the
    /// supplied one exactly.
    pub fn exists_and_matches(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.load()?;
        Ok(users.get(username).map(String::as_str) == Some(password))
    }

    /// Insert a new user and rewrite the file. Fails with `DuplicateUser`
    /// if the username is already taken; the stored password is untouched.
    pub fn add(&self, username: &str, password: &str) -> Result<()> {
        let mut users = self.load()?;
        if users.contains_key(username) {
            return Err(Error::DuplicateUser(username.to_string()));
        }
        users.insert(username.to_string(), password.to_string());
        self.persist(&users)
    }

    // Full rewrite, pretty-printed with an indent of 4 to stay
    // byte-compatible with files written by the previous tooling.
    fn persist(&self, users: &BTreeMap<String, String>) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        users.serialize(&mut ser)?;
        std::fs::write(&self.path, buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> UserStore {
        UserStore::new(dir.path().join("users.json"))
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
        assert!(!store.exists_and_matches("alice", "pw").unwrap());
    }

    #[test]
    fn add_then_match() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add("alice", "pw").unwrap();

        assert!(store.exists_and_matches("alice", "pw").unwrap());
        assert!(!store.exists_and_matches("alice", "PW").unwrap());
        assert!(!store.exists_and_matches("alice", "pw ").unwrap());
        assert!(!store.exists_and_matches("bob", "pw").unwrap());
    }

    #[test]
    fn duplicate_add_rejected_and_password_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add("alice", "pw").unwrap();

        let err = store.add("alice", "pw2").unwrap_err();
        assert!(matches!(err, Error::DuplicateUser(ref u) if u == "alice"));
        assert_eq!(store.load().unwrap().get("alice").unwrap(), "pw");
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        UserStore::new(&path).add("alice", "pw").unwrap();

        let reopened = UserStore::new(&path);
        assert!(reopened.exists_and_matches("alice", "pw").unwrap());
    }

    #[test]
    fn file_is_pretty_printed_with_indent_4() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add("alice", "pw").unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("    \"alice\": \"pw\""));
    }
}
