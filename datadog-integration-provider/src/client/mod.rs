//! Datadog API client (v1 integration endpoints)

mod aws_logs;
mod error;
mod gcp;
mod http;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};

pub use types::{
    AwsLogsIntegration, AwsLogsLambda, AwsLogsService, AwsLogsServicesRequest, GcpAccount,
    GcpDeleteRequest, GcpUpdateRequest,
};

pub(crate) const PROVIDER_NAME: &str = "datadog";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// Datadog API client
///
/// Holds the HTTP connection pool and the auth context. Cheap to share
/// behind an `Arc`; all methods take `&self`.
pub struct DatadogClient {
    pub(crate) client: Client,
    pub(crate) api_url: String,
    pub(crate) api_key: String,
    pub(crate) app_key: String,
}

impl DatadogClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client()?,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            app_key: config.app_key.clone(),
        })
    }

    /// API base URL this client talks to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Checks the API key against `GET /api/v1/validate`.
    ///
    /// Returns `Ok(false)` when Datadog rejects the key, and an error only
    /// for transport failures.
    pub async fn validate_credentials(&self) -> Result<bool> {
        match self.get::<types::ValidateResponse>("/api/v1/validate").await {
            Ok(resp) => Ok(resp.valid),
            Err(
                ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. },
            ) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
