//! Datadog API 类型定义

use serde::{Deserialize, Serialize};

/// Datadog 错误响应 `{"errors": ["..."]}`
#[derive(Debug, Deserialize)]
pub(crate) struct DatadogErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// `GET /api/v1/validate`
#[derive(Debug, Deserialize)]
pub(crate) struct ValidateResponse {
    #[serde(default)]
    pub valid: bool,
}

/// A Lambda function forwarding logs for an AWS account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsLogsLambda {
    /// Lambda ARN.
    pub arn: String,
}

/// One entry of `GET /api/v1/integration/aws/logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsLogsIntegration {
    /// AWS account id.
    pub account_id: String,
    /// Lambdas attached to the account.
    #[serde(default)]
    pub lambdas: Vec<AwsLogsLambda>,
    /// Services with log collection enabled.
    #[serde(default)]
    pub services: Vec<String>,
}

/// Body of `POST /api/v1/integration/aws/logs/services`.
///
/// The submitted list replaces whatever is enabled remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsLogsServicesRequest {
    /// AWS account id.
    pub account_id: String,
    /// Full list of services to enable.
    pub services: Vec<String>,
}

impl AwsLogsServicesRequest {
    pub fn new(account_id: impl Into<String>, services: Vec<String>) -> Self {
        Self {
            account_id: account_id.into(),
            services,
        }
    }
}

/// One entry of `GET /api/v1/integration/aws/logs/services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsLogsService {
    /// Service key, as accepted in [`AwsLogsServicesRequest::services`].
    pub id: String,
    /// Display name.
    pub label: String,
}

/// GCP service-account integration as listed and created by `/api/v1/integration/gcp`.
///
/// The list endpoint omits the write-only key material, so those fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpAccount {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_provider_x509_cert_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_x509_cert_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_filters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automute: Option<bool>,
}

/// Body of `PUT /api/v1/integration/gcp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpUpdateRequest {
    pub project_id: String,
    pub client_email: String,
    pub host_filters: String,
}

/// Body of `DELETE /api/v1/integration/gcp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpDeleteRequest {
    pub project_id: String,
    pub client_email: String,
}
