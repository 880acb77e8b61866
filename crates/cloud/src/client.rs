//! HTTP client for the cloud networking gateway
//!
//! One JSON POST per operation under `/v1/ec2/<action>`. The gateway owns
//! credential and region resolution; the console passes neither.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use vpcconsole_common::{Error, InternetGateway, Result, RouteTable, Subnet, Vpc};

use crate::api::{NetworkApi, VpcAttribute};

/// Client wrapper for gateway communication
pub struct HttpNetworkApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpNetworkApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn call<B, T>(&self, action: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(action, body).await?;
        resp.json()
            .await
            .map_err(|e| Error::provider(format!("{action}: invalid response: {e}")))
    }

    async fn call_unit<B>(&self, action: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(action, body).await.map(|_| ())
    }

    async fn send<B>(&self, action: &str, body: &B) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/v1/ec2/{}", self.base_url, action);
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::provider(format!("{action}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(Error::provider(format!("{action}: {status}: {detail}")));
        }
        Ok(resp)
    }
}

#[async_trait]
impl NetworkApi for HttpNetworkApi {
    async fn create_vpc(&self, cidr: &str) -> Result<Vpc> {
        self.call("create-vpc", &json!({ "cidr": cidr })).await
    }

    async fn create_tags(&self, resource_id: &str, key: &str, value: &str) -> Result<()> {
        self.call_unit(
            "create-tags",
            &json!({ "resource_id": resource_id, "key": key, "value": value }),
        )
        .await
    }

    async fn modify_vpc_attribute(&self, vpc_id: &str, attribute: VpcAttribute) -> Result<()> {
        self.call_unit(
            "modify-vpc-attribute",
            &json!({ "vpc_id": vpc_id, "attribute": attribute, "value": true }),
        )
        .await
    }

    async fn create_internet_gateway(&self) -> Result<InternetGateway> {
        self.call("create-internet-gateway", &json!({})).await
    }

    async fn attach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()> {
        self.call_unit(
            "attach-internet-gateway",
            &json!({ "igw_id": igw_id, "vpc_id": vpc_id }),
        )
        .await
    }

    async fn detach_internet_gateway(&self, igw_id: &str, vpc_id: &str) -> Result<()> {
        self.call_unit(
            "detach-internet-gateway",
            &json!({ "igw_id": igw_id, "vpc_id": vpc_id }),
        )
        .await
    }

    async fn delete_internet_gateway(&self, igw_id: &str) -> Result<()> {
        self.call_unit("delete-internet-gateway", &json!({ "igw_id": igw_id }))
            .await
    }

    async fn create_subnet(
        &self,
        vpc_id: &str,
        cidr: &str,
        availability_zone: &str,
    ) -> Result<Subnet> {
        self.call(
            "create-subnet",
            &json!({
                "vpc_id": vpc_id,
                "cidr": cidr,
                "availability_zone": availability_zone,
            }),
        )
        .await
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<()> {
        self.call_unit("delete-subnet", &json!({ "subnet_id": subnet_id }))
            .await
    }

    async fn describe_vpcs(&self) -> Result<Vec<Vpc>> {
        self.call("describe-vpcs", &json!({})).await
    }

    async fn describe_subnets(&self, vpc_id: &str) -> Result<Vec<Subnet>> {
        self.call("describe-subnets", &json!({ "vpc_id": vpc_id }))
            .await
    }

    async fn describe_internet_gateways(
        &self,
        attached_vpc_id: &str,
    ) -> Result<Vec<InternetGateway>> {
        self.call(
            "describe-internet-gateways",
            &json!({ "attached_vpc_id": attached_vpc_id }),
        )
        .await
    }

    async fn describe_route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>> {
        self.call("describe-route-tables", &json!({ "vpc_id": vpc_id }))
            .await
    }

    async fn delete_route_table(&self, rtb_id: &str) -> Result<()> {
        self.call_unit("delete-route-table", &json!({ "rtb_id": rtb_id }))
            .await
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<()> {
        self.call_unit("delete-vpc", &json!({ "vpc_id": vpc_id }))
            .await
    }
}
