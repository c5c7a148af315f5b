use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::provider::ProviderConfiguration;
use crate::schema::ResourceSchema;
use crate::state::ResourceData;

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Resource kind (for `NotFound`)
    pub resource: Option<String>,
    /// Natural key (for `NotFound`)
    pub key: Option<String>,
    /// Request field most likely at fault (for `InvalidParameter`)
    pub param: Option<String>,
}

impl ErrorContext {
    pub fn for_key(resource: &str, key: &str) -> Self {
        Self {
            resource: Some(resource.to_string()),
            key: Some(key.to_string()),
            param: None,
        }
    }

    pub fn with_param(mut self, param: &str) -> Self {
        self.param = Some(param.to_string());
        self
    }
}

/// 错误映射 Trait（内部使用）
/// 将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 API 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A declarative integration resource.
///
/// Each method is one lifecycle callback. The provider configuration is
/// passed to every call; implementations hold no state of their own.
/// Create and Update finish with a Read so the returned data reflects the
/// remote record.
#[async_trait]
pub trait IntegrationResource: Send + Sync {
    /// Resource type name, e.g. `datadog_integration_gcp`.
    fn type_name(&self) -> &'static str;

    /// Human-readable name used in errors.
    fn display_name(&self) -> &'static str;

    /// Attribute schema.
    fn schema(&self) -> ResourceSchema;

    /// Submit the desired record, set the id to the natural key, then Read.
    async fn create(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()>;

    /// Copy the remote record for `d.id()` into `d`.
    async fn read(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()>;

    /// Re-submit the whole desired record, then Read.
    async fn update(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()>;

    /// Remove the remote record.
    async fn delete(&self, d: &mut ResourceData, meta: &ProviderConfiguration) -> Result<()>;

    /// Whether the remote list still contains `d.id()`.
    async fn exists(&self, d: &ResourceData, meta: &ProviderConfiguration) -> Result<bool>;

    /// Adopt an existing remote record: Read with the imported id and return the result.
    async fn import(
        &self,
        mut d: ResourceData,
        meta: &ProviderConfiguration,
    ) -> Result<Vec<ResourceData>> {
        let id = d.id().to_string();
        self.read(&mut d, meta).await?;
        if !d.has_id() {
            return Err(ProviderError::NotFound {
                provider: self.type_name().to_string(),
                resource: self.display_name().to_string(),
                key: id,
                raw_message: None,
            });
        }
        Ok(vec![d])
    }
}
