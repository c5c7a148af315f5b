use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for every Datadog API call and resource operation.
///
/// Each variant names the API surface (`provider`) that produced it, plus
/// variant-specific context. All variants are serializable so the host can
/// render structured diagnostics.
///
/// Transport failures ([`NetworkError`](Self::NetworkError),
/// [`Timeout`](Self::Timeout)) and API failures (any non-2xx response) are
/// surfaced as-is; nothing is retried locally.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError {
        /// API surface that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout {
        /// API surface that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API or application key was rejected (HTTP 401).
    #[error("[{provider}] Invalid credentials{}", suffix(raw_message))]
    InvalidCredentials {
        /// API surface that produced the error.
        provider: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The application key lacks the scope for the operation (HTTP 403).
    #[error("[{provider}] Permission denied{}", suffix(raw_message))]
    PermissionDenied {
        /// API surface that produced the error.
        provider: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (HTTP 400) or local data failed schema validation.
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// API surface that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    #[error("[{provider}] Rate limited{}", retry_suffix(*retry_after))]
    RateLimited {
        /// API surface that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if the API sent `Retry-After`.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API answered 404 for the integration identified by `key`.
    #[error("[{provider}] {resource} '{key}' not found{}", suffix(raw_message))]
    NotFound {
        /// API surface that produced the error.
        provider: String,
        /// Human-readable resource kind.
        resource: String,
        /// Natural key that was looked up.
        key: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A linear scan of the remote list found no entry whose `field` equals `key`.
    #[error("error getting {resource}: {field}={key}")]
    NotInList {
        /// API surface that produced the error.
        provider: String,
        /// Human-readable resource kind.
        resource: String,
        /// Name of the natural-key attribute.
        field: String,
        /// Natural key that was looked up.
        key: String,
    },

    /// Failed to parse the API response.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError {
        /// API surface that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("[{provider}] Serialization error: {detail}")]
    SerializationError {
        /// API surface that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unmapped non-2xx response.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        /// API surface that produced the error.
        provider: String,
        /// HTTP status code, if the failure came from a response.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },

    /// A lower-level error wrapped with the operation that was being attempted.
    ///
    /// Produced by [`translate_client_error`].
    #[error("{context}: {source}")]
    Operation {
        /// Static description of the failed operation.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<ProviderError>,
    },
}

fn suffix(raw_message: &Option<String>) -> String {
    raw_message
        .as_ref()
        .map(|msg| format!(": {msg}"))
        .unwrap_or_default()
}

fn retry_suffix(retry_after: Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

impl ProviderError {
    /// 是否为预期行为（凭证错误、资源不存在等），用于日志分级。
    ///
    /// Returns `true` when `warn` is the right log level, `false` for `error`.
    /// Update this method when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidCredentials { .. }
            | Self::PermissionDenied { .. }
            | Self::InvalidParameter { .. }
            | Self::NotFound { .. }
            | Self::NotInList { .. } => true,
            Self::Operation { source, .. } => source.is_expected(),
            _ => false,
        }
    }

    /// Whether this error (or the error it wraps) is a not-found signal.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::NotInList { .. } => true,
            Self::Operation { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Returns the innermost error, skipping any [`Operation`](Self::Operation) wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Wraps a client error with a static description of the failed operation.
///
/// Every API status is wrapped, 404 included; [`ProviderError::is_not_found`]
/// still sees through the wrapper.
pub fn translate_client_error(err: ProviderError, context: &str) -> ProviderError {
    if err.is_expected() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("{context}: {err}");
    }
    ProviderError::Operation {
        context: context.to_string(),
        source: Box::new(err),
    }
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "datadog".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[datadog] Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "datadog".to_string(),
            raw_message: Some("Forbidden".to_string()),
        };
        assert_eq!(e.to_string(), "[datadog] Invalid credentials: Forbidden");
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "datadog".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[datadog] Invalid credentials");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = ProviderError::RateLimited {
            provider: "datadog".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[datadog] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_not_found() {
        let e = ProviderError::NotFound {
            provider: "datadog".to_string(),
            resource: "GCP integration".to_string(),
            key: "my-project".to_string(),
            raw_message: None,
        };
        assert_eq!(
            e.to_string(),
            "[datadog] GCP integration 'my-project' not found"
        );
    }

    #[test]
    fn display_unknown() {
        let e = ProviderError::Unknown {
            provider: "datadog".to_string(),
            raw_code: Some("500".to_string()),
            raw_message: "something broke".to_string(),
        };
        assert_eq!(e.to_string(), "[datadog] something broke");
    }

    #[test]
    fn translate_prefixes_context() {
        let inner = ProviderError::Unknown {
            provider: "datadog".to_string(),
            raw_code: Some("500".to_string()),
            raw_message: "boom".to_string(),
        };
        let e = translate_client_error(inner, "error getting gcp integration");
        assert_eq!(e.to_string(), "error getting gcp integration: [datadog] boom");
        assert!(matches!(e.root(), ProviderError::Unknown { .. }));
    }

    #[test]
    fn translate_wraps_api_not_found() {
        let inner = ProviderError::NotFound {
            provider: "datadog".to_string(),
            resource: "AWS log collection".to_string(),
            key: "123".to_string(),
            raw_message: Some("not integrated".to_string()),
        };
        let e = translate_client_error(inner, "error enabling log collection");
        assert_eq!(
            e.to_string(),
            "error enabling log collection: [datadog] AWS log collection '123' not found: not integrated"
        );
        assert!(e.is_not_found());
    }

    #[test]
    fn display_not_in_list() {
        let e = ProviderError::NotInList {
            provider: "datadog".to_string(),
            resource: "Amazon Web Services log collection".to_string(),
            field: "account_id".to_string(),
            key: "123456789012".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "error getting Amazon Web Services log collection: account_id=123456789012"
        );
        assert!(e.is_not_found());
        assert!(e.is_expected());
    }

    #[test]
    fn expected_classification_sees_through_wrapper() {
        let e = ProviderError::Operation {
            context: "ctx".to_string(),
            source: Box::new(ProviderError::PermissionDenied {
                provider: "datadog".to_string(),
                raw_message: None,
            }),
        };
        assert!(e.is_expected());
        assert!(!e.is_not_found());

        let timeout = ProviderError::Timeout {
            provider: "datadog".to_string(),
            detail: "30s".to_string(),
        };
        assert!(!timeout.is_expected());
    }

    #[test]
    fn serialize_json_tagged() {
        let e = ProviderError::RateLimited {
            provider: "datadog".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn deserialize_operation_keeps_source() {
        let original = ProviderError::Operation {
            context: "error enabling log collection".to_string(),
            source: Box::new(ProviderError::NetworkError {
                provider: "datadog".to_string(),
                detail: "connection refused".to_string(),
            }),
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: ProviderError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), original.to_string());
    }
}
