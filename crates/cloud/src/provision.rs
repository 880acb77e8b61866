//! VPC Provisioner
//!
//! Issues the ordered create sequence for a new VPC: the VPC itself, its
//! name tag, both DNS attributes, an attached internet gateway, then one
//! subnet per requested CIDR. Side effects are strictly additive; a
//! failure partway leaves already-created resources in place and aborts
//! the remaining steps.

use serde::{Deserialize, Serialize};
use tracing::info;

use vpcconsole_common::{Error, Result};

use crate::api::{NetworkApi, VpcAttribute};

/// Raw form fields for a provisioning run
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionRequest {
    pub name: String,
    pub cidr: String,
    /// Comma-separated subnet CIDR blocks
    pub subnet_cidrs: String,
    /// Comma-separated availability zones
    pub availability_zones: String,
}

/// Identifiers of the resources a successful run created
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionOutcome {
    pub vpc_id: String,
    pub subnet_ids: Vec<String>,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Create a VPC and its resource graph in dependency order.
///
/// Validation covers field presence only; CIDR well-formedness and
/// subnet/VPC containment are left to the provider, which is
/// authoritative and rejects invalid input.
pub async fn provision(api: &dyn NetworkApi, req: &ProvisionRequest) -> Result<ProvisionOutcome> {
    let name = req.name.trim();
    let cidr = req.cidr.trim();
    if name.is_empty()
        || cidr.is_empty()
        || req.subnet_cidrs.trim().is_empty()
        || req.availability_zones.trim().is_empty()
    {
        return Err(Error::Validation("please fill out all fields".to_string()));
    }

    info!("creating VPC {} with CIDR {}", name, cidr);
    let vpc = api.create_vpc(cidr).await?;
    api.create_tags(&vpc.vpc_id, "Name", name).await?;

    api.modify_vpc_attribute(&vpc.vpc_id, VpcAttribute::DnsSupport).await?;
    api.modify_vpc_attribute(&vpc.vpc_id, VpcAttribute::DnsHostnames).await?;

    info!("creating and attaching internet gateway to VPC {}", name);
    let igw = api.create_internet_gateway().await?;
    api.attach_internet_gateway(&igw.igw_id, &vpc.vpc_id).await?;

    let subnet_list = split_list(&req.subnet_cidrs);
    let az_list = split_list(&req.availability_zones);
    let mut subnet_ids = Vec::with_capacity(subnet_list.len());
    for (i, subnet_cidr) in subnet_list.iter().enumerate() {
        // Zone assignment wraps cyclically to spread subnets across zones
        // when there are more subnets than zones.
        let az = &az_list[i % az_list.len()];
        info!("creating subnet {} in availability zone {}", subnet_cidr, az);
        let subnet = api.create_subnet(&vpc.vpc_id, subnet_cidr, az).await?;
        subnet_ids.push(subnet.subnet_id);
    }

    Ok(ProvisionOutcome { vpc_id: vpc.vpc_id, subnet_ids })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, MockNetworkApi};

    fn request(name: &str, cidr: &str, subnets: &str, azs: &str) -> ProvisionRequest {
        ProvisionRequest {
            name: name.to_string(),
            cidr: cidr.to_string(),
            subnet_cidrs: subnets.to_string(),
            availability_zones: azs.to_string(),
        }
    }

    #[tokio::test]
    async fn issues_calls_in_dependency_order() {
        let api = MockNetworkApi::new();
        let req = request(
            "dev",
            "10.0.0.0/16",
            "10.0.1.0/24, 10.0.2.0/24, 10.0.3.0/24",
            "us-east-1a, us-east-1b",
        );

        let outcome = provision(&api, &req).await.unwrap();
        assert_eq!(outcome.vpc_id, "vpc-0001");
        assert_eq!(outcome.subnet_ids.len(), 3);

        let vpc = "vpc-0001".to_string();
        assert_eq!(
            api.calls(),
            vec![
                Call::CreateVpc { cidr: "10.0.0.0/16".into() },
                Call::CreateTags {
                    resource_id: vpc.clone(),
                    key: "Name".into(),
                    value: "dev".into(),
                },
                Call::ModifyVpcAttribute {
                    vpc_id: vpc.clone(),
                    attribute: VpcAttribute::DnsSupport,
                },
                Call::ModifyVpcAttribute {
                    vpc_id: vpc.clone(),
                    attribute: VpcAttribute::DnsHostnames,
                },
                Call::CreateInternetGateway,
                Call::AttachInternetGateway { igw_id: "igw-0002".into(), vpc_id: vpc.clone() },
                Call::CreateSubnet {
                    vpc_id: vpc.clone(),
                    cidr: "10.0.1.0/24".into(),
                    availability_zone: "us-east-1a".into(),
                },
                Call::CreateSubnet {
                    vpc_id: vpc.clone(),
                    cidr: "10.0.2.0/24".into(),
                    availability_zone: "us-east-1b".into(),
                },
                Call::CreateSubnet {
                    vpc_id: vpc,
                    cidr: "10.0.3.0/24".into(),
                    availability_zone: "us-east-1a".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn availability_zones_wrap_cyclically() {
        let api = MockNetworkApi::new();
        let req = request("dev", "10.0.0.0/16", "a,b,c,d,e", "z1,z2,z3");

        provision(&api, &req).await.unwrap();

        let azs: Vec<String> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateSubnet { availability_zone, .. } => Some(availability_zone),
                _ => None,
            })
            .collect();
        assert_eq!(azs, vec!["z1", "z2", "z3", "z1", "z2"]);
    }

    #[tokio::test]
    async fn empty_fields_fail_validation_with_zero_calls() {
        let blank_variants = [
            request("", "10.0.0.0/16", "10.0.1.0/24", "us-east-1a"),
            request("dev", "  ", "10.0.1.0/24", "us-east-1a"),
            request("dev", "10.0.0.0/16", "", "us-east-1a"),
            request("dev", "10.0.0.0/16", "10.0.1.0/24", "\t"),
        ];
        for req in blank_variants {
            let api = MockNetworkApi::new();
            let err = provision(&api, &req).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "got {err:?}");
            assert!(api.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn failure_halts_remaining_steps_without_rollback() {
        let api = MockNetworkApi::new().fail_on("create-internet-gateway");
        let req = request("dev", "10.0.0.0/16", "10.0.1.0/24", "us-east-1a");

        let err = provision(&api, &req).await.unwrap_err();
        assert!(matches!(err, Error::Provider(_)));

        // Nothing after the failing step, and no delete calls ever.
        let calls = api.calls();
        assert_eq!(calls.last(), Some(&Call::CreateInternetGateway));
        assert!(calls
            .iter()
            .all(|c| !matches!(c, Call::DeleteVpc { .. } | Call::DeleteSubnet { .. })));
    }

    #[tokio::test]
    async fn fields_are_trimmed_before_use() {
        let api = MockNetworkApi::new();
        let req = request("  dev  ", " 10.0.0.0/16 ", " 10.0.1.0/24 ", " us-east-1a ");

        provision(&api, &req).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls[0], Call::CreateVpc { cidr: "10.0.0.0/16".into() });
        assert!(matches!(
            &calls[1],
            Call::CreateTags { value, .. } if value == "dev"
        ));
    }
}
