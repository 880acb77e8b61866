//! VPC Console Common Library
//!
//! Shared types, errors, and the flat-file credential store used by the
//! cloud and web crates.

pub mod error;
pub mod types;
pub mod users;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use users::UserStore;

/// VPC Console version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default credential file, relative to the working directory
pub fn default_user_file() -> std::path::PathBuf {
    std::path::PathBuf::from("users.json")
}

/// Default static asset directory, relative to the working directory
pub fn default_assets_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("assets")
}
