//! HTTP 客户端实现模块
//!
//! 提供 OpenAI 兼容协议的文本与文生图客户端：
//! - `GenericHttpClient`: `/chat/completions`
//! - `HttpImageClient`: `/images/generations`（`b64_json`）
//!
//! HTTP 429 统一映射为限流错误，其余非 2xx 为上游错误。

#[cfg(feature = "openai-client")]
pub mod generic;

#[cfg(feature = "openai-client")]
pub use generic::{GenericHttpClient, HttpImageClient};
