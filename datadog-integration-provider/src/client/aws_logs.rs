//! AWS Logs Integration API

use crate::error::Result;
use crate::traits::ErrorContext;

use super::DatadogClient;
use super::types::{AwsLogsIntegration, AwsLogsService, AwsLogsServicesRequest};

const AWS_LOGS_PATH: &str = "/api/v1/integration/aws/logs";
const AWS_LOGS_SERVICES_PATH: &str = "/api/v1/integration/aws/logs/services";

impl DatadogClient {
    /// `GET /api/v1/integration/aws/logs`
    ///
    /// Every AWS account with log collection configured, with its Lambdas and enabled services.
    pub async fn list_aws_logs_integrations(&self) -> Result<Vec<AwsLogsIntegration>> {
        self.get(AWS_LOGS_PATH).await
    }

    /// `POST /api/v1/integration/aws/logs/services`
    ///
    /// Replaces the enabled service list for the account. An empty list disables collection.
    pub async fn enable_aws_log_services(&self, body: &AwsLogsServicesRequest) -> Result<()> {
        let context = ErrorContext::for_key("AWS log collection", &body.account_id)
            .with_param("services");
        let _: serde_json::Value = self.post(AWS_LOGS_SERVICES_PATH, body, context).await?;
        Ok(())
    }

    /// `GET /api/v1/integration/aws/logs/services`
    ///
    /// Services Datadog can collect logs from.
    pub async fn list_aws_logs_services(&self) -> Result<Vec<AwsLogsService>> {
        self.get(AWS_LOGS_SERVICES_PATH).await
    }
}
