//! Cloud networking API seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vpcconsole_common::{InternetGateway, Result, RouteTable, Subnet, Vpc};

/// VPC attribute enabled by `modify_vpc_attribute`. DNS support and DNS
/// hostnames are two independent provider calls; both are issued during
/// provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VpcAttribute {
    DnsSupport,
    DnsHostnames,
}

/// Operations the console consumes from the cloud networking API.
///
/// The provider itself stays external; implementations only carry calls
/// to it. Credential and region resolution is ambient to the gateway
/// process, so no operation takes either.
#[async_trait]
pub trait NetworkApi: Send + Sync {
    async fn create_vpc(&self, cidr: &str) -> Result<Vpc>;

    async fn create_tags(&self, resource_id: &str, key: &str, value: &str) -> Result<()>;

    async fn modify_vpc_attribute(&self, vpc_id: &str, attribute: VpcAttribute) -> Result<()>;

    async fn create_internet_gateway(&self) -> Result<InternetGateway>;

    async fn attach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()>;

    async fn detach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()>;

    async fn delete_internet_gateway(&self, igw_id: &str) -> Result<()>;

    async fn create_subnet(&self, vpc_id: &str, cidr: &str, availability_zone: &str)
        -> Result<Subnet>;

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()>;

    async fn describe_vpcs(&self) -> Result<Vec<Vpc>>;

    async fn describe_subnets(&self, vpc_id: &str) -> Result<Vec<Subnet>>;

    /// Gateways currently attached to the given VPC
    async fn describe_internet_gateways(&self, attached_vpc_id: &str)
        -> Result<Vec<InternetGateway>>;

    async fn describe_route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>>;

    async fn delete_route_table(&self, rtb_id: &str) -> Result<()>;

    async fn delete_vpc(&self, vpc_id: &str) -> Result<()>;
}
