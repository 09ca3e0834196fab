use std::sync::Arc;

use async_trait::async_trait;

use super::types::{ImageRequest, LlmRequest, LlmResponse};
use crate::error::Result;

/// 文本生成服务
///
/// 限流必须以 `PracharError::RateLimited` 返回，调用方据此决定是否重试。
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse>;

    /// 模型标识，仅用于日志
    fn model(&self) -> &str {
        "unknown"
    }
}

pub type DynLlmClient = Arc<dyn LlmClient>;

/// 文生图服务，返回原始图片字节（PNG）
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate(&self, request: ImageRequest) -> Result<Vec<u8>>;

    fn model(&self) -> &str {
        "unknown"
    }
}

pub type DynImageModel = Arc<dyn ImageModel>;
