//! 生成式模型客户端
//!
//! - `LlmClient`: 文本生成（文案、策划）
//! - `ImageModel`: 文生图
//! - `LocalEchoClient`: 本地回显，离线可用
//! - `http`: OpenAI 兼容协议的通用 HTTP 客户端（`openai-client` 特性）

pub mod client;
pub mod echo;
pub mod http;
pub mod types;

pub use client::{DynImageModel, DynLlmClient, ImageModel, LlmClient};
pub use echo::LocalEchoClient;
#[cfg(feature = "openai-client")]
pub use http::{GenericHttpClient, HttpImageClient};
pub use types::{ImageRequest, LlmRequest, LlmResponse};
