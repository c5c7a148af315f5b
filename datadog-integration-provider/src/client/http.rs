//! Datadog HTTP 请求方法

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::{redact_attributes, truncate_for_log};

use super::DatadogClient;
use super::types::DatadogErrorResponse;

/// Request body fields that never reach the logs.
const SENSITIVE_BODY_FIELDS: &[&str] = &["private_key", "private_key_id"];

impl DatadogClient {
    /// 构建带认证头的请求
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.api_url))
            .header("DD-API-KEY", &self.api_key)
            .header("DD-APPLICATION-KEY", &self.app_key)
            .header("Accept", "application/json")
    }

    /// 发送请求并解析响应
    ///
    /// Non-2xx responses are mapped through [`ProviderErrorMapper`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method_name: &str,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method_name, path).await?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<DatadogErrorResponse>(&response_text)
                .ok()
                .map(|r| r.errors.join("; "))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    if response_text.trim().is_empty() {
                        format!("HTTP {status}")
                    } else {
                        truncate_for_log(&response_text)
                    }
                });
            log::debug!("API 错误 ({status}): {message}");
            return Err(self.map_error(
                RawApiError::with_code(status.to_string(), message),
                context,
            ));
        }

        HttpUtils::parse_json(&response_text, self.provider_name())
    }

    /// 序列化请求体，并以脱敏形式记录日志
    fn encode_body<B: Serialize>(&self, body: &B) -> Result<serde_json::Value> {
        let value =
            serde_json::to_value(body).map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;
        if log::log_enabled!(log::Level::Debug) {
            let rendered = match &value {
                serde_json::Value::Object(map) => {
                    redact_attributes(map, SENSITIVE_BODY_FIELDS).to_string()
                }
                other => other.to_string(),
            };
            log::debug!("Request Body: {}", truncate_for_log(&rendered));
        }
        Ok(value)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(
            self.request(Method::GET, path),
            "GET",
            path,
            ErrorContext::default(),
        )
        .await
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let body = self.encode_body(body)?;
        self.send(self.request(Method::POST, path).json(&body), "POST", path, context)
            .await
    }

    /// 执行 PUT 请求
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let body = self.encode_body(body)?;
        self.send(self.request(Method::PUT, path).json(&body), "PUT", path, context)
            .await
    }

    /// 执行 DELETE 请求（Datadog 的注销接口需要请求体）
    pub(crate) async fn delete<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let body = self.encode_body(body)?;
        self.send(
            self.request(Method::DELETE, path).json(&body),
            "DELETE",
            path,
            context,
        )
        .await
    }
}
