//! Provider-level configuration: Datadog credentials and API endpoint.

use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::mask_secret;

/// Default Datadog API endpoint (US1 site).
pub const DEFAULT_API_URL: &str = "https://api.datadoghq.com";

/// Validation error for provider configuration.
///
/// Returned when a credential field is missing, empty, or malformed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A field has an invalid format.
    InvalidFormat {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Datadog provider configuration.
///
/// Read-only once the provider is built; every resource handler sees the
/// same values through [`ProviderConfiguration`](crate::ProviderConfiguration).
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    /// Datadog API key (`DD-API-KEY`).
    pub api_key: String,
    /// Datadog application key (`DD-APPLICATION-KEY`).
    pub app_key: String,
    /// API base URL, without a trailing slash or `/api` suffix.
    pub api_url: String,
    /// Whether to check the keys against `/api/v1/validate` on startup.
    pub validate: bool,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("app_key", &mask_secret(&self.app_key))
            .field("api_url", &self.api_url)
            .field("validate", &self.validate)
            .finish()
    }
}

impl ProviderConfig {
    /// Build a configuration from explicit keys, using the default API URL.
    pub fn new(api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            app_key: app_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            validate: true,
        }
    }

    /// Override the API URL (for other Datadog sites or a local mock).
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_api_url(api_url);
        self
    }

    /// Enable or disable startup key validation.
    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Create configuration from environment variables
    ///
    /// `DD_*` names take precedence over their `DATADOG_*` aliases.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        let lookup = |primary: &str, alias: &str| env::var(primary).or_else(|_| env::var(alias)).ok();

        let mut map = HashMap::new();
        if let Some(v) = lookup("DD_API_KEY", "DATADOG_API_KEY") {
            map.insert("api_key".to_string(), v);
        }
        if let Some(v) = lookup("DD_APP_KEY", "DATADOG_APP_KEY") {
            map.insert("app_key".to_string(), v);
        }
        if let Some(v) = lookup("DD_HOST", "DATADOG_HOST") {
            map.insert("api_url".to_string(), v);
        }
        if let Some(v) = lookup("DD_VALIDATE", "DATADOG_VALIDATE") {
            map.insert("validate".to_string(), v);
        }
        Self::from_map(&map)
    }

    /// Construct configuration from flat provider-block keys.
    ///
    /// Recognised keys: `api_key`, `app_key` (required), `api_url`,
    /// `validate` (optional).
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        let api_key = Self::get_required_field(map, "api_key", "API Key")?;
        let app_key = Self::get_required_field(map, "app_key", "Application Key")?;

        let api_url = match map.get("api_url") {
            Some(url) if !url.trim().is_empty() => {
                let url = normalize_api_url(url);
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(CredentialValidationError::InvalidFormat {
                        field: "api_url".to_string(),
                        label: "API URL".to_string(),
                        reason: "must start with http:// or https://".to_string(),
                    });
                }
                url
            }
            _ => DEFAULT_API_URL.to_string(),
        };

        let validate = match map.get("validate").map(|v| v.trim().to_lowercase()) {
            None => true,
            Some(v) if v.is_empty() => true,
            Some(v) => match v.as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(CredentialValidationError::InvalidFormat {
                        field: "validate".to_string(),
                        label: "Validate".to_string(),
                        reason: format!("expected true or false, got '{v}'"),
                    });
                }
            },
        };

        Ok(Self {
            api_key,
            app_key,
            api_url,
            validate,
        })
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }
}

/// 去掉末尾的 `/` 和 `/api` 后缀
///
/// `https://api.datadoghq.eu/api/` -> `https://api.datadoghq.eu`
pub fn normalize_api_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}
