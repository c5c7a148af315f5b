//! `datadog_integration_aws_log_collection`
//!
//! Enables log collection for a set of AWS services on an account already
//! registered with the AWS integration. The remote endpoint is an upsert:
//! the submitted list replaces the enabled services, and an empty list
//! turns collection off.

use async_trait::async_trait;

use crate::client::{AwsLogsServicesRequest, PROVIDER_NAME};
use crate::error::{ProviderError, Result, translate_client_error};
use crate::provider::ProviderConfiguration;
use crate::schema::{Attribute, ResourceSchema};
use crate::state::ResourceData;
use crate::traits::IntegrationResource;

pub const TYPE_NAME: &str = "datadog_integration_aws_log_collection";
const DISPLAY_NAME: &str = "Amazon Web Services log collection";

/// AWS log collection resource, keyed by `account_id`.
pub struct AwsLogCollectionResource;

impl AwsLogCollectionResource {
    fn build_request(d: &ResourceData) -> AwsLogsServicesRequest {
        AwsLogsServicesRequest::new(d.get_string("account_id"), d.get_string_list("services"))
    }
}

#[async_trait]
impl IntegrationResource for AwsLogCollectionResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_attribute("account_id", Attribute::required_string().force_new())
            .with_attribute("services", Attribute::required_string_list())
    }

    async fn create(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let account_id = d.get_string("account_id");
        let request = Self::build_request(d);

        meta.client
            .enable_aws_log_services(&request)
            .await
            .map_err(|e| {
                translate_client_error(
                    e,
                    "error enabling log collection services for Amazon Web Services integration account",
                )
            })?;

        d.set_id(account_id);
        self.read(d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let account_id = d.id().to_string();

        let log_collections = meta
            .client
            .list_aws_logs_integrations()
            .await
            .map_err(|e| translate_client_error(e, "error getting log collection for aws integration"))?;

        let Some(log_collection) = log_collections
            .into_iter()
            .find(|c| c.account_id == account_id)
        else {
            log::warn!("[{TYPE_NAME}] account_id={account_id} not in remote list");
            return Err(ProviderError::NotInList {
                provider: PROVIDER_NAME.to_string(),
                resource: DISPLAY_NAME.to_string(),
                field: "account_id".to_string(),
                key: account_id,
            });
        };

        d.set("account_id", log_collection.account_id);
        d.set("services", log_collection.services);
        Ok(())
    }

    async fn update(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let request = Self::build_request(d);

        meta.client
            .enable_aws_log_services(&request)
            .await
            .map_err(|e| {
                translate_client_error(
                    e,
                    "error updating log collection services for Amazon Web Services integration account",
                )
            })?;

        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let request = AwsLogsServicesRequest::new(d.id(), Vec::new());

        meta.client
            .enable_aws_log_services(&request)
            .await
            .map_err(|e| {
                translate_client_error(e, "error disabling Amazon Web Services log collection")
            })?;

        d.clear_id();
        Ok(())
    }

    async fn exists(&self, d: &ResourceData, meta: &ProviderConfiguration) -> Result<bool> {
        let log_collections = meta
            .client
            .list_aws_logs_integrations()
            .await
            .map_err(|e| translate_client_error(e, "error getting aws integration log collection"))?;

        Ok(log_collections.iter().any(|c| c.account_id == d.id()))
    }
}
