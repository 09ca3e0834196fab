use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use tracing::instrument;

use crate::error::{PracharError, Result};
use crate::generation::brand::{brand_context, extract_colors, BrandRetriever, NoBrandRetriever};
use crate::generation::outcome::{FailureKind, LiveOutcome};
use crate::generation::prompt::{image_prompt, COLOR_QUERY, NEGATIVE_PROMPT};
use crate::generation::retry::bounded;
use crate::llm::{DynImageModel, ImageRequest};
use crate::matching::ImageFallbackSelector;

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// 对象存储
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 写入对象并返回可公开访问的 URL
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

/// S3 风格的公开 URL
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

pub fn object_key(user_id: &str) -> String {
    format!("campaigns/{}/{}.png", user_id, uuid::Uuid::new_v4())
}

/// 校验字节流确实是 PNG，返回宽高
pub fn validate_png(bytes: &[u8]) -> Result<(u32, u32)> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => {}
        Ok(other) => {
            return Err(PracharError::Serialization(format!(
                "expected PNG image, got {other:?}"
            )))
        }
        Err(e) => {
            return Err(PracharError::Serialization(format!(
                "unrecognised image data: {e}"
            )))
        }
    }

    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| PracharError::Serialization(format!("invalid PNG: {e}")))?;
    Ok((decoded.width(), decoded.height()))
}

/// 海报生成：生成、校验、上传；任何失败都退回主题占位图
pub struct ImageGenerator {
    model: DynImageModel,
    storage: Arc<dyn ObjectStore>,
    brand: Arc<dyn BrandRetriever>,
    selector: ImageFallbackSelector,
    bucket: String,
    call_timeout: Duration,
}

impl ImageGenerator {
    pub fn new(
        model: DynImageModel,
        storage: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        selector: ImageFallbackSelector,
    ) -> Self {
        Self {
            model,
            storage,
            brand: Arc::new(NoBrandRetriever),
            selector,
            bucket: bucket.into(),
            call_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_brand(mut self, brand: Arc<dyn BrandRetriever>) -> Self {
        self.brand = brand;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// 单次尝试，不重试
    #[instrument(skip(self, caption, brand_colors), fields(model = self.model.model()))]
    pub async fn try_generate_image(
        &self,
        caption: &str,
        user_id: &str,
        brand_colors: Option<&[String]>,
    ) -> LiveOutcome<String> {
        match self.render_and_upload(caption, user_id, brand_colors).await {
            Ok(url) => {
                tracing::info!(url = %url, "poster uploaded");
                LiveOutcome::Success(url)
            }
            Err(err) => {
                tracing::warn!(
                    phase = "image",
                    class = err.class(),
                    error = %err,
                    "image generation failed"
                );
                LiveOutcome::Failure(FailureKind::from(&err))
            }
        }
    }

    pub async fn generate_image(
        &self,
        caption: &str,
        goal: &str,
        user_id: &str,
        brand_colors: Option<&[String]>,
    ) -> String {
        match self.try_generate_image(caption, user_id, brand_colors).await {
            LiveOutcome::Success(url) => url,
            LiveOutcome::Failure(kind) => {
                tracing::info!(phase = "image", kind = %kind, "serving themed placeholder image");
                self.fallback_image(goal).to_string()
            }
        }
    }

    pub fn fallback_image(&self, goal: &str) -> &str {
        self.selector.select_fallback_image(goal)
    }

    async fn render_and_upload(
        &self,
        caption: &str,
        user_id: &str,
        brand_colors: Option<&[String]>,
    ) -> Result<String> {
        let colors = match brand_colors {
            Some(colors) => colors.to_vec(),
            None => extract_colors(&brand_context(self.brand.as_ref(), COLOR_QUERY).await),
        };

        let request = ImageRequest::new(image_prompt(caption, &colors), NEGATIVE_PROMPT);
        let bytes = bounded("image", self.call_timeout, self.model.generate(request)).await?;
        let (width, height) = validate_png(&bytes)?;
        tracing::debug!(width, height, size = bytes.len(), "image decoded");

        let key = object_key(user_id);
        bounded(
            "upload",
            self.call_timeout,
            self.storage.put(&self.bucket, &key, bytes, PNG_CONTENT_TYPE),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::new(2, 2);
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn validates_png() {
        assert_eq!(validate_png(&tiny_png()).unwrap(), (2, 2));
        assert!(validate_png(b"not an image").is_err());
    }

    #[test]
    fn key_and_url_layout() {
        let key = object_key("user-1");
        assert!(key.starts_with("campaigns/user-1/"));
        assert!(key.ends_with(".png"));
        assert_eq!(
            public_url("prachar-ai-assets", "campaigns/u/x.png"),
            "https://prachar-ai-assets.s3.amazonaws.com/campaigns/u/x.png"
        );
    }
}
