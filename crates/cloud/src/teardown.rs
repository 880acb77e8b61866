//! VPC Teardown
//!
//! Deletes a VPC's resource graph in the one order the provider's
//! referential constraints allow: gateways (detach, then delete), then
//! subnets, then non-main route tables, then the VPC itself. The first
//! failing call aborts the rest for that VPC; completed deletions stand,
//! and re-invoking teardown retries the shrunk graph.

use tracing::info;

use vpcconsole_common::{Error, Result, VpcSummary};

use crate::api::NetworkApi;

/// All non-default VPCs, projected for the teardown view
pub async fn list_vpcs(api: &dyn NetworkApi) -> Result<Vec<VpcSummary>> {
    let vpcs = api.describe_vpcs().await?;
    Ok(vpcs
        .iter()
        .filter(|v| !v.is_default)
        .map(VpcSummary::from)
        .collect())
}

/// Delete one VPC and everything it owns
pub async fn teardown(api: &dyn NetworkApi, vpc_id: &str) -> Result<()> {
    teardown_steps(api, vpc_id).await.map_err(|e| {
        let cause = match e {
            Error::Provider(msg) => msg,
            other => other.to_string(),
        };
        Error::Provider(format!("failed to delete VPC {vpc_id}: {cause}"))
    })
}

async fn teardown_steps(api: &dyn NetworkApi, vpc_id: &str) -> Result<()> {
    // A gateway must be detached before it can be deleted, and gone
    // before the VPC can be.
    for igw in api.describe_internet_gateways(vpc_id).await? {
        info!("detaching and deleting internet gateway {}", igw.igw_id);
        api.detach_internet_gateway(&igw.igw_id, vpc_id).await?;
        api.delete_internet_gateway(&igw.igw_id).await?;
    }

    for subnet in api.describe_subnets(vpc_id).await? {
        info!("deleting subnet {}", subnet.subnet_id);
        api.delete_subnet(&subnet.subnet_id).await?;
    }

    // The main route table cannot be deleted explicitly; the provider
    // reclaims it with the VPC.
    for rtb in api.describe_route_tables(vpc_id).await? {
        if !rtb.is_main() {
            info!("deleting route table {}", rtb.rtb_id);
            api.delete_route_table(&rtb.rtb_id).await?;
        }
    }

    info!("deleting VPC {}", vpc_id);
    api.delete_vpc(vpc_id).await
}
