//! GCP Integration API

use crate::error::Result;
use crate::traits::ErrorContext;

use super::DatadogClient;
use super::types::{GcpAccount, GcpDeleteRequest, GcpUpdateRequest};

const GCP_PATH: &str = "/api/v1/integration/gcp";
const RESOURCE: &str = "GCP integration";

impl DatadogClient {
    /// `GET /api/v1/integration/gcp`
    pub async fn list_gcp_integrations(&self) -> Result<Vec<GcpAccount>> {
        self.get(GCP_PATH).await
    }

    /// `POST /api/v1/integration/gcp`
    pub async fn create_gcp_integration(&self, body: &GcpAccount) -> Result<()> {
        let context = ErrorContext::for_key(RESOURCE, &body.project_id);
        let _: serde_json::Value = self.post(GCP_PATH, body, context).await?;
        Ok(())
    }

    /// `PUT /api/v1/integration/gcp`
    pub async fn update_gcp_integration(&self, body: &GcpUpdateRequest) -> Result<()> {
        let context = ErrorContext::for_key(RESOURCE, &body.project_id).with_param("host_filters");
        let _: serde_json::Value = self.put(GCP_PATH, body, context).await?;
        Ok(())
    }

    /// `DELETE /api/v1/integration/gcp`
    pub async fn delete_gcp_integration(&self, body: &GcpDeleteRequest) -> Result<()> {
        let context = ErrorContext::for_key(RESOURCE, &body.project_id);
        let _: serde_json::Value = self.delete(GCP_PATH, body, context).await?;
        Ok(())
    }
}
