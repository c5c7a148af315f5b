//! `datadog_integration_gcp`
//!
//! Registers a GCP project with Datadog through a service-account key.
//! Everything except `host_filters` is force-new; the key material is
//! write-only upstream and is kept from local state on Read.

use async_trait::async_trait;

use crate::client::{GcpAccount, GcpDeleteRequest, GcpUpdateRequest};
use crate::error::{Result, translate_client_error};
use crate::provider::ProviderConfiguration;
use crate::schema::{Attribute, ResourceSchema};
use crate::state::ResourceData;
use crate::traits::IntegrationResource;

pub const TYPE_NAME: &str = "datadog_integration_gcp";
const DISPLAY_NAME: &str = "Google Cloud Platform integration";

const ACCOUNT_TYPE: &str = "service_account";
const AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URI: &str = "https://accounts.google.com/o/oauth2/token";
const AUTH_PROVIDER_X509_CERT_URL: &str = "https://www.googleapis.com/oauth2/v1/certs";
const CLIENT_X509_CERT_URL_PREFIX: &str = "https://www.googleapis.com/robot/v1/metadata/x509/";

/// GCP integration resource, keyed by `project_id`.
pub struct GcpIntegrationResource;

impl GcpIntegrationResource {
    fn build_account(d: &ResourceData) -> GcpAccount {
        let client_email = d.get_string("client_email");
        GcpAccount {
            account_type: Some(ACCOUNT_TYPE.to_string()),
            project_id: d.get_string("project_id"),
            private_key_id: Some(d.get_string("private_key_id")),
            private_key: Some(d.get_string("private_key")),
            client_id: Some(d.get_string("client_id")),
            auth_uri: Some(AUTH_URI.to_string()),
            token_uri: Some(TOKEN_URI.to_string()),
            auth_provider_x509_cert_url: Some(AUTH_PROVIDER_X509_CERT_URL.to_string()),
            client_x509_cert_url: Some(format!("{CLIENT_X509_CERT_URL_PREFIX}{client_email}")),
            client_email: Some(client_email),
            host_filters: Some(d.get_string("host_filters")),
            automute: None,
        }
    }

    async fn find(project_id: &str, meta: &ProviderConfiguration) -> Result<Option<GcpAccount>> {
        let integrations = meta
            .client
            .list_gcp_integrations()
            .await
            .map_err(|e| translate_client_error(e, "error getting GCP integration"))?;

        Ok(integrations.into_iter().find(|i| i.project_id == project_id))
    }
}

#[async_trait]
impl IntegrationResource for GcpIntegrationResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_attribute("project_id", Attribute::required_string().force_new())
            .with_attribute("private_key_id", Attribute::required_string().force_new())
            .with_attribute(
                "private_key",
                Attribute::required_string().force_new().sensitive(),
            )
            .with_attribute("client_email", Attribute::required_string().force_new())
            .with_attribute("client_id", Attribute::required_string().force_new())
            .with_attribute("host_filters", Attribute::optional_string().with_default(""))
    }

    async fn create(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let account = Self::build_account(d);

        meta.client
            .create_gcp_integration(&account)
            .await
            .map_err(|e| translate_client_error(e, "error creating GCP integration"))?;

        d.set_id(account.project_id);
        self.read(d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let project_id = d.id().to_string();

        let Some(integration) = Self::find(&project_id, meta).await? else {
            log::warn!("[{TYPE_NAME}] project_id={project_id} not in remote list, removing from state");
            d.clear_id();
            return Ok(());
        };

        d.set("project_id", integration.project_id);
        if let Some(client_email) = integration.client_email {
            d.set("client_email", client_email);
        }
        if let Some(client_id) = integration.client_id {
            d.set("client_id", client_id);
        }
        if let Some(private_key_id) = integration.private_key_id {
            d.set("private_key_id", private_key_id);
        }
        if let Some(private_key) = integration.private_key {
            d.set("private_key", private_key);
        }
        d.set("host_filters", integration.host_filters.unwrap_or_default());
        Ok(())
    }

    async fn update(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let request = GcpUpdateRequest {
            project_id: d.id().to_string(),
            client_email: d.get_string("client_email"),
            host_filters: d.get_string("host_filters"),
        };

        meta.client
            .update_gcp_integration(&request)
            .await
            .map_err(|e| translate_client_error(e, "error updating GCP integration"))?;

        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()> {
        let request = GcpDeleteRequest {
            project_id: d.id().to_string(),
            client_email: d.get_string("client_email"),
        };

        meta.client
            .delete_gcp_integration(&request)
            .await
            .map_err(|e| translate_client_error(e, "error deleting GCP integration"))?;

        d.clear_id();
        Ok(())
    }

    async fn exists(&self, d: &ResourceData, meta: &ProviderConfiguration) -> Result<bool> {
        Ok(Self::find(d.id(), meta).await?.is_some())
    }
}
