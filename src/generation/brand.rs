use async_trait::async_trait;

use crate::error::Result;

/// 检索不到品牌规范时使用的默认说明
pub const DEFAULT_BRAND_CONTEXT: &str =
    "No brand guidelines found. Use default Indian youth-friendly tone.";

/// 提取不到品牌色时的默认配色
pub const DEFAULT_BRAND_COLORS: [&str; 2] = ["#FF5733", "#3498DB"];

/// 品牌知识库检索
#[async_trait]
pub trait BrandRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<String>;
}

/// 固定文本
#[derive(Clone, Debug)]
pub struct StaticBrandRetriever {
    text: String,
}

impl StaticBrandRetriever {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl BrandRetriever for StaticBrandRetriever {
    async fn retrieve(&self, _query: &str) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// 没有知识库，总是返回空文本
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBrandRetriever;

#[async_trait]
impl BrandRetriever for NoBrandRetriever {
    async fn retrieve(&self, _query: &str) -> Result<String> {
        Ok(String::new())
    }
}

/// 检索品牌上下文，失败或为空时退回默认说明
pub async fn brand_context(retriever: &dyn BrandRetriever, query: &str) -> String {
    match retriever.retrieve(query).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => DEFAULT_BRAND_CONTEXT.to_string(),
        Err(err) => {
            tracing::warn!(query, error = %err, class = err.class(), "brand retrieval failed");
            DEFAULT_BRAND_CONTEXT.to_string()
        }
    }
}

/// 从文本中提取最多三个 `#RRGGBB` 色值
pub fn extract_colors(context: &str) -> Vec<String> {
    let bytes = context.as_bytes();
    let mut colors = Vec::new();
    let mut i = 0;
    while i + 7 <= bytes.len() && colors.len() < 3 {
        if bytes[i] == b'#' && bytes[i + 1..i + 7].iter().all(u8::is_ascii_hexdigit) {
            colors.push(context[i..i + 7].to_string());
            i += 7;
        } else {
            i += 1;
        }
    }

    if colors.is_empty() {
        DEFAULT_BRAND_COLORS.iter().map(|c| c.to_string()).collect()
    } else {
        colors
    }
}
