//! 实时生成
//!
//! 文案与海报两个生成器。两者都先尝试实时服务，失败时分别退回目录文案和主题占位图，
//! 对调用方永不报错。

use std::time::Duration;

pub mod brand;
pub mod captions;
pub mod image;
pub mod outcome;
pub mod prompt;
pub mod retry;

pub use brand::{BrandRetriever, NoBrandRetriever, StaticBrandRetriever, DEFAULT_BRAND_CONTEXT};
pub use captions::{parse_captions, CaptionGenerator};
pub use self::image::{validate_png, ImageGenerator, ObjectStore};
pub use outcome::{FailureKind, FallbackNote, GenerationPhase, LiveOutcome};
pub use retry::RetryPolicy;

/// 文本模型调用参数
#[derive(Clone, Debug, PartialEq)]
pub struct TextSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub call_timeout: Duration,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
            top_p: 0.9,
            call_timeout: Duration::from_secs(30),
        }
    }
}
