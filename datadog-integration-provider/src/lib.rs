//! # datadog-integration-provider
//!
//! Declarative Datadog integration resources. Each resource maps a flat
//! attribute schema onto the Datadog v1 integration API and maps the API's
//! answers back into state.
//!
//! ## Supported Resources
//!
//! | Resource | Feature Flag | Natural Key | Remote Endpoint |
//! |----------|-------------|-------------|-----------------|
//! | `datadog_integration_aws_log_collection` | `aws-log-collection` | `account_id` | `/api/v1/integration/aws/logs` |
//! | `datadog_integration_gcp` | `gcp` | `project_id` | `/api/v1/integration/gcp` |
//!
//! ## Feature Flags
//!
//! - **`all-resources`** *(default)*: Enable both resources.
//! - **`aws-log-collection`**: Enable only the AWS log collection resource.
//! - **`gcp`**: Enable only the GCP integration resource.
//! - **`native-tls`** *(default)* / **`rustls`**: TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use datadog_integration_provider::{Provider, ProviderConfig, ResourceData};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Configure from DD_API_KEY / DD_APP_KEY / DD_HOST
//!     let provider = Provider::configure(ProviderConfig::from_env()?).await?;
//!
//!     // 2. Create: enable S3 and Lambda log collection for an AWS account
//!     let planned = ResourceData::from_value(json!({
//!         "account_id": "123456789012",
//!         "services": ["s3", "lambda"],
//!     }))?;
//!     let state = provider
//!         .apply("datadog_integration_aws_log_collection", None, Some(planned))
//!         .await?;
//!
//!     // 3. Refresh: Exists + Read
//!     if let Some(state) = state {
//!         provider
//!             .refresh("datadog_integration_aws_log_collection", state)
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//! API and transport failures are wrapped with the failing operation by
//! [`translate_client_error`]; a resource missing from the remote list is
//! [`ProviderError::NotInList`]. Nothing is retried.

mod client;
mod config;
mod error;
mod http_client;
mod provider;
mod resources;
mod schema;
mod state;
mod traits;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result, translate_client_error};

// Re-export configuration
pub use config::{CredentialValidationError, DEFAULT_API_URL, ProviderConfig, normalize_api_url};

// Re-export API client and its models
pub use client::{
    AwsLogsIntegration, AwsLogsLambda, AwsLogsService, AwsLogsServicesRequest, DatadogClient,
    GcpAccount, GcpDeleteRequest, GcpUpdateRequest,
};

// Re-export provider, resource contract, schema and state
pub use provider::{Provider, ProviderConfiguration};
pub use schema::{Attribute, AttributeType, ResourceSchema};
pub use state::ResourceData;
pub use traits::IntegrationResource;

// Re-export concrete resources (behind feature flags)
pub use resources::all_resources;

#[cfg(feature = "aws-log-collection")]
pub use resources::AwsLogCollectionResource;

#[cfg(feature = "gcp")]
pub use resources::GcpIntegrationResource;
