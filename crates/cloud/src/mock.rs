//! Recording in-memory NetworkApi for tests
//!
//! Records every call in order, serves descriptors seeded by the test,
//! and can be scripted to fail specific actions.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use vpcconsole_common::{Error, InternetGateway, Result, RouteTable, Subnet, Vpc};

use crate::api::{NetworkApi, VpcAttribute};

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateVpc { cidr: String },
    CreateTags { resource_id: String, key: String, value: String },
    ModifyVpcAttribute { vpc_id: String, attribute: VpcAttribute },
    CreateInternetGateway,
    AttachInternetGateway { igw_id: String, vpc_id: String },
    DetachInternetGateway { igw_id: String, vpc_id: String },
    DeleteInternetGateway { igw_id: String },
    CreateSubnet { vpc_id: String, cidr: String, availability_zone: String },
    DeleteSubnet { subnet_id: String },
    DescribeVpcs,
    DescribeSubnets { vpc_id: String },
    DescribeInternetGateways { vpc_id: String },
    DescribeRouteTables { vpc_id: String },
    DeleteRouteTable { rtb_id: String },
    DeleteVpc { vpc_id: String },
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    vpcs: Vec<Vpc>,
    subnets: Vec<Subnet>,
    gateways: Vec<InternetGateway>,
    route_tables: Vec<RouteTable>,
    fail_actions: HashSet<&'static str>,
    next_id: u32,
}

/// Scriptable NetworkApi double
#[derive(Default)]
pub struct MockNetworkApi {
    inner: Mutex<Inner>,
}

impl MockNetworkApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vpc(self, vpc: Vpc) -> Self {
        self.inner.lock().unwrap().vpcs.push(vpc);
        self
    }

    pub fn with_subnet(self, subnet: Subnet) -> Self {
        self.inner.lock().unwrap().subnets.push(subnet);
        self
    }

    pub fn with_gateway(self, gateway: InternetGateway) -> Self {
        self.inner.lock().unwrap().gateways.push(gateway);
        self
    }

    pub fn with_route_table(self, table: RouteTable) -> Self {
        self.inner.lock().unwrap().route_tables.push(table);
        self
    }

    /// Make the named action fail with a provider error when called
    pub fn fail_on(self, action: &'static str) -> Self {
        self.inner.lock().unwrap().fail_actions.insert(action);
        self
    }

    /// Calls recorded so far, in issue order
    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    // Record the call; the failing call itself stays in the log.
    fn record(&self, action: &'static str, call: Call) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.fail_actions.contains(action) {
            return Err(Error::provider(format!("{action} refused")));
        }
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        format!("{}-{:04}", prefix, inner.next_id)
    }
}

#[async_trait]
impl NetworkApi for MockNetworkApi {
    async fn create_vpc(&self, cidr: &str) -> Result<Vpc> {
        self.record("create-vpc", Call::CreateVpc { cidr: cidr.to_string() })?;
        Ok(Vpc {
            vpc_id: self.next_id("vpc"),
            name: None,
            cidr: cidr.to_string(),
            is_default: false,
        })
    }

    async fn create_tags(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.record(
            "create-tags",
            Call::CreateTags {
                resource_id: resource_id.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            },
        )
    }

    async fn modify_vpc_attribute(&self, vpc_id: &str, attribute: VpcAttribute) -> Result<()> {
        self.record(
            "modify-vpc-attribute",
            Call::ModifyVpcAttribute { vpc_id: vpc_id.to_string(), attribute },
        )
    }

    async fn create_internet_gateway(&self) -> Result<InternetGateway> {
        self.record("create-internet-gateway", Call::CreateInternetGateway)?;
        Ok(InternetGateway {
            igw_id: self.next_id("igw"),
            attached_vpc_id: None,
        })
    }

    async fn attach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()> {
        self.record(
            "attach-internet-gateway",
            Call::AttachInternetGateway {
                igw_id: igw_id.to_string(),
                vpc_id: vpc_id.to_string(),
            },
        )
    }

    async fn detach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()> {
        self.record(
            "detach-internet-gateway",
            Call::DetachInternetGateway {
                igw_id: igw_id.to_string(),
                vpc_id: vpc_id.to_string(),
            },
        )
    }

    async fn delete_internet_gateway(&self, igw_id: &str) -> Result<()> {
        self.record(
            "delete-internet-gateway",
            Call::DeleteInternetGateway { igw_id: igw_id.to_string() },
        )
    }

    async fn create_subnet(
        &self,
        vpc_id: &str,
        cidr: &str,
        availability_zone: &str,
    ) -> Result<Subnet> {
        self.record(
            "create-subnet",
            Call::CreateSubnet {
                vpc_id: vpc_id.to_string(),
                cidr: cidr.to_string(),
                availability_zone: availability_zone.to_string(),
            },
        )?;
        Ok(Subnet {
            subnet_id: self.next_id("subnet"),
            vpc_id: vpc_id.to_string(),
            cidr: cidr.to_string(),
            availability_zone: availability_zone.to_string(),
        })
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        self.record(
            "delete-subnet",
            Call::DeleteSubnet { subnet_id: subnet_id.to_string() },
        )
    }

    async fn describe_vpcs(&self) -> Result<Vec<Vpc>> {
        self.record("describe-vpcs", Call::DescribeVpcs)?;
        Ok(self.inner.lock().unwrap().vpcs.clone())
    }

    async fn describe_subnets(&self, vpc_id: &str) -> Result<Vec<Subnet>> {
        self.record(
            "describe-subnets",
            Call::DescribeSubnets { vpc_id: vpc_id.to_string() },
        )?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .subnets
            .iter()
            .filter(|s| s.vpc_id == vpc_id)
            .cloned()
            .collect())
    }

    async fn describe_internet_gateways(
        &self,
        attached_vpc_id: &str,
    ) -> Result<Vec<InternetGateway>> {
        self.record(
            "describe-internet-gateways",
            Call::DescribeInternetGateways { vpc_id: attached_vpc_id.to_string() },
        )?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .gateways
            .iter()
            .filter(|g| g.attached_vpc_id.as_deref() == Some(attached_vpc_id))
            .cloned()
            .collect())
    }

    async fn describe_route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>> {
        self.record(
            "describe-route-tables",
            Call::DescribeRouteTables { vpc_id: vpc_id.to_string() },
        )?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .route_tables
            .iter()
            .filter(|t| t.vpc_id == vpc_id)
            .cloned()
            .collect())
    }

    async fn delete_route_table(&self, rtb_id: &str) -> Result<()> {
        self.record(
            "delete-route-table",
            Call::DeleteRouteTable { rtb_id: rtb_id.to_string() },
        )
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<()> {
        self.record("delete-vpc", Call::DeleteVpc { vpc_id: vpc_id.to_string() })
    }
}
