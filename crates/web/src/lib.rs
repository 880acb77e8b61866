//! VPC Console Web UI
//!
//! Login-gated VPC provisioning plus teardown and user administration,
//! served as a single-page console over a JSON API.

pub mod server;
pub mod static_files;

pub use server::{WebServer, WebServerConfig};
