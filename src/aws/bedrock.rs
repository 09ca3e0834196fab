use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::{PracharError, Result};
use crate::llm::{ImageModel, ImageRequest, LlmClient, LlmRequest, LlmResponse};

const SERVICE: &str = "bedrock";

/// 把 SDK 错误映射为错误类别：ThrottlingException 视为限流
fn invoke_error(err: SdkError<InvokeModelError>) -> PracharError {
    let throttled = err
        .as_service_error()
        .map(|e| e.is_throttling_exception())
        .unwrap_or(false);
    let message = DisplayErrorContext(&err).to_string();
    if throttled {
        PracharError::RateLimited(message)
    } else if matches!(err, SdkError::TimeoutError(_)) {
        PracharError::Timeout {
            phase: SERVICE.to_string(),
            secs: 0,
        }
    } else {
        PracharError::upstream(SERVICE, message)
    }
}

async fn invoke_json(
    client: &aws_sdk_bedrockruntime::Client,
    model_id: &str,
    body: &Value,
) -> Result<Value> {
    let output = client
        .invoke_model()
        .model_id(model_id)
        .content_type("application/json")
        .accept("application/json")
        .body(Blob::new(serde_json::to_vec(body)?))
        .send()
        .await
        .map_err(invoke_error)?;
    Ok(serde_json::from_slice(output.body().as_ref())?)
}

/// Nova 文本模型（messages + inferenceConfig）
#[derive(Clone)]
pub struct BedrockTextClient {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockTextClient {
    pub fn new(client: aws_sdk_bedrockruntime::Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    fn request_body(request: &LlmRequest) -> Value {
        let mut inference = json!({ "temperature": request.temperature });
        if let Some(max_tokens) = request.max_tokens {
            inference["maxTokens"] = json!(max_tokens);
        }
        if let Some(top_p) = request.top_p {
            inference["topP"] = json!(top_p);
        }

        let mut body = json!({
            "messages": [{ "role": "user", "content": [{ "text": request.user }] }],
            "inferenceConfig": inference,
        });
        if let Some(system) = &request.system {
            body["system"] = json!([{ "text": system }]);
        }
        body
    }
}

#[async_trait]
impl LlmClient for BedrockTextClient {
    #[instrument(skip(self, request), fields(model = %self.model_id))]
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let payload = invoke_json(&self.client, &self.model_id, &Self::request_body(&request)).await?;
        let content = payload["output"]["message"]["content"][0]["text"]
            .as_str()
            .ok_or_else(|| PracharError::upstream(SERVICE, "missing output.message.content[0].text"))?
            .to_string();
        Ok(LlmResponse {
            content,
            metadata: Some(payload),
        })
    }

    fn model(&self) -> &str {
        &self.model_id
    }
}

/// Titan 文生图，返回 PNG 字节
#[derive(Clone)]
pub struct TitanImageClient {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl TitanImageClient {
    pub fn new(client: aws_sdk_bedrockruntime::Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    fn request_body(request: &ImageRequest) -> Value {
        json!({
            "taskType": "TEXT_IMAGE",
            "textToImageParams": {
                "text": request.prompt,
                "negativeText": request.negative_prompt,
            },
            "imageGenerationConfig": {
                "numberOfImages": 1,
                "quality": "premium",
                "height": request.height,
                "width": request.width,
                "cfgScale": request.cfg_scale,
                "seed": request.seed,
            }
        })
    }
}

#[async_trait]
impl ImageModel for TitanImageClient {
    #[instrument(skip(self, request), fields(model = %self.model_id))]
    async fn generate(&self, request: ImageRequest) -> Result<Vec<u8>> {
        let payload = invoke_json(&self.client, &self.model_id, &Self::request_body(&request)).await?;
        if let Some(error) = payload["error"].as_str() {
            return Err(PracharError::upstream(SERVICE, error.to_string()));
        }
        let encoded = payload["images"][0]
            .as_str()
            .ok_or_else(|| PracharError::upstream(SERVICE, "missing images[0] in response"))?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| PracharError::Serialization(format!("invalid base64 image: {e}")))
    }

    fn model(&self) -> &str {
        &self.model_id
    }
}
