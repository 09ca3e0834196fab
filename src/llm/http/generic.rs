use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::{PracharError, Result};
use crate::llm::client::{ImageModel, LlmClient};
use crate::llm::types::{ImageRequest, LlmRequest, LlmResponse};

const SERVICE: &str = "http-llm";

/// 创建 HTTP 客户端
///
/// - 连接池：复用连接
/// - 超时：连接 10 秒，整体按配置
fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .connect_timeout(Duration::from_secs(10))
        .timeout(timeout)
        .build()
        .map_err(|e| PracharError::Config(format!("failed to build HTTP client: {e}")))
}

fn truncate_for_log(text: &str) -> String {
    if text.chars().count() > 500 {
        let head: String = text.chars().take(500).collect();
        format!("{}...(已截断，总长度: {} 字节)", head, text.len())
    } else {
        text.to_string()
    }
}

/// 把 HTTP 状态映射为错误类别：429 视为限流
fn status_error(status: StatusCode, body: &str, endpoint: &str) -> PracharError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        PracharError::RateLimited(format!("{} returned 429: {}", endpoint, truncate_for_log(body)))
    } else {
        PracharError::upstream(
            SERVICE,
            format!(
                "request failed with status {}: {}\nEndpoint: {}",
                status,
                truncate_for_log(body),
                endpoint
            ),
        )
    }
}

fn transport_error(e: reqwest::Error) -> PracharError {
    if e.is_timeout() {
        PracharError::Timeout {
            phase: SERVICE.to_string(),
            secs: 0,
        }
    } else {
        PracharError::upstream(SERVICE, format!("HTTP request error: {e}"))
    }
}

/// OpenAI 兼容的文本生成客户端
#[derive(Clone)]
pub struct GenericHttpClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GenericHttpClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn full_endpoint(&self) -> String {
        if self.endpoint.contains("/chat/completions") {
            self.endpoint.clone()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        }
    }
}

#[async_trait]
impl LlmClient for GenericHttpClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({
                "role": "system",
                "content": system
            }));
        }
        messages.push(json!({
            "role": "user",
            "content": request.user
        }));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": request.temperature,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(top_p) = request.top_p {
            body["top_p"] = json!(top_p);
        }

        let full_endpoint = self.full_endpoint();
        let response = self
            .client
            .post(&full_endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| PracharError::upstream(SERVICE, format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status, &response_text, &full_endpoint));
        }

        let payload: Value = serde_json::from_str(&response_text).map_err(|e| {
            PracharError::Serialization(format!(
                "response parse error: {}\nResponse body: {}",
                e,
                truncate_for_log(&response_text)
            ))
        })?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                PracharError::upstream(
                    SERVICE,
                    format!("missing content in response: {}", truncate_for_log(&payload.to_string())),
                )
            })?
            .to_string();

        Ok(LlmResponse {
            content,
            metadata: Some(payload),
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// OpenAI 兼容的文生图客户端，要求返回 `b64_json`
#[derive(Clone)]
pub struct HttpImageClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpImageClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl ImageModel for HttpImageClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: ImageRequest) -> Result<Vec<u8>> {
        let full_endpoint = format!("{}/images/generations", self.endpoint.trim_end_matches('/'));
        // 该协议没有负面提示词字段，拼进正文
        let body = json!({
            "model": self.model,
            "prompt": format!("{}\n\nAvoid: {}", request.prompt, request.negative_prompt),
            "n": 1,
            "size": format!("{}x{}", request.width, request.height),
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(&full_endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| PracharError::upstream(SERVICE, format!("failed to read response: {e}")))?;
        if !status.is_success() {
            return Err(status_error(status, &response_text, &full_endpoint));
        }

        let payload: Value = serde_json::from_str(&response_text)?;
        let encoded = payload["data"][0]["b64_json"]
            .as_str()
            .ok_or_else(|| PracharError::upstream(SERVICE, "missing data[0].b64_json in image response"))?;

        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| PracharError::Serialization(format!("invalid base64 image: {e}")))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_requests_is_rate_limited() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "slow down", "http://x");
        assert!(err.is_rate_limited());
        let err = status_error(StatusCode::FORBIDDEN, "denied", "http://x");
        assert_eq!(err.class(), "upstream");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "क".repeat(600);
        let out = truncate_for_log(&long);
        assert!(out.contains("已截断"));
    }
}
