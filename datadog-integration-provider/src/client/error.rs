//! Datadog error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{DatadogClient, PROVIDER_NAME};

/// Datadog HTTP status mapping
/// Reference: <https://docs.datadoghq.com/api/latest/#response-codes>
impl ProviderErrorMapper for DatadogClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // 400: Bad Request (malformed body, unknown service, bad project id)
            Some("400") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: context.param.unwrap_or_else(|| "body".to_string()),
                detail: raw.message,
            },

            // 401: API key missing or invalid
            Some("401") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 403: application key missing, invalid, or lacking scope
            Some("403") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // 404: integration / account not found
            Some("404") => ProviderError::NotFound {
                provider: self.provider_name().to_string(),
                resource: context
                    .resource
                    .unwrap_or_else(|| "<unknown>".to_string()),
                key: context.key.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // 429 is handled before mapping; kept here for completeness
            Some("429") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
