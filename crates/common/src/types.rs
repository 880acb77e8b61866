//! Core resource types for VPC Console
//!
//! These descriptors are owned by the cloud provider. The console reads,
//! creates, and deletes them but never caches them across requests.

use serde::{Deserialize, Serialize};

/// A virtual private cloud as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vpc {
    pub vpc_id: String,
    /// Value of the Name tag, if any
    #[serde(default)]
    pub name: Option<String>,
    pub cidr: String,
    #[serde(default)]
    pub is_default: bool,
}

/// A subnet, child of exactly one VPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet {
    pub subnet_id: String,
    pub vpc_id: String,
    pub cidr: String,
    pub availability_zone: String,
}

/// An internet gateway, attached to at most one VPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternetGateway {
    pub igw_id: String,
    #[serde(default)]
    pub attached_vpc_id: Option<String>,
}

/// Association between a route table and a subnet (or the VPC itself)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTableAssociation {
    #[serde(default)]
    pub main: bool,
    #[serde(default)]
    pub subnet_id: Option<String>,
}

/// A route table belonging to a VPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTable {
    pub rtb_id: String,
    pub vpc_id: String,
    #[serde(default)]
    pub associations: Vec<RouteTableAssociation>,
}

impl RouteTable {
    /// The main table is implicitly owned by the VPC and cannot be deleted
    pub fn is_main(&self) -> bool {
        self.associations.iter().any(|a| a.main)
    }
}

/// Listing projection for the teardown view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcSummary {
    pub vpc_id: String,
    pub name: String,
    pub is_default: bool,
}

impl From<&Vpc> for VpcSummary {
    fn from(vpc: &Vpc) -> Self {
        Self {
            vpc_id: vpc.vpc_id.clone(),
            name: vpc.name.clone().unwrap_or_else(|| "No Name".to_string()),
            is_default: vpc.is_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_table_main_flag() {
        let rtb = RouteTable {
            rtb_id: "rtb-1".into(),
            vpc_id: "vpc-1".into(),
            associations: vec![
                RouteTableAssociation { main: false, subnet_id: Some("subnet-1".into()) },
                RouteTableAssociation { main: true, subnet_id: None },
            ],
        };
        assert!(rtb.is_main());

        let rtb = RouteTable {
            rtb_id: "rtb-2".into(),
            vpc_id: "vpc-1".into(),
            associations: vec![],
        };
        assert!(!rtb.is_main());
    }

    #[test]
    fn summary_name_fallback() {
        let vpc = Vpc {
            vpc_id: "vpc-1".into(),
            name: None,
            cidr: "10.0.0.0/16".into(),
            is_default: false,
        };
        assert_eq!(VpcSummary::from(&vpc).name, "No Name");
    }
}
