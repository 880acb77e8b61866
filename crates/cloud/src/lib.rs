//! VPC Console Cloud Layer
//!
//! The seam to the cloud networking API (an external collaborator), plus
//! the two operations with real ordering contracts: VPC provisioning and
//! VPC teardown.

pub mod api;
pub mod client;
pub mod provision;
pub mod teardown;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use api::{NetworkApi, VpcAttribute};
pub use client::HttpNetworkApi;
pub use provision::{provision, ProvisionOutcome, ProvisionRequest};
pub use teardown::{list_vpcs, teardown};
