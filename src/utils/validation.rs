use crate::error::{PracharError, Result};

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证 URL 格式
    pub fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(PracharError::Config("URL 不能为空".into()));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PracharError::Config(format!(
                "URL 必须以 http:// 或 https:// 开头: {url}"
            )));
        }

        Ok(())
    }

    /// 验证模型 ID
    pub fn validate_model_id(model: &str) -> Result<()> {
        if model.trim().is_empty() {
            return Err(PracharError::Config("模型 ID 不能为空".into()));
        }

        let lower = model.to_lowercase();
        if lower.starts_with("amazon.") && !lower.contains("-v") {
            tracing::warn!(
                model = %model,
                "模型 ID 可能有误，Bedrock 模型通常带版本后缀，如 'amazon.nova-lite-v1:0'"
            );
        }

        Ok(())
    }

    /// 验证温度参数
    pub fn validate_temperature(temperature: f32) -> Result<()> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(PracharError::Config(format!(
                "温度参数必须在 0.0 到 2.0 之间，当前值: {temperature}"
            )));
        }
        Ok(())
    }

    pub fn validate_top_p(top_p: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&top_p) || top_p == 0.0 {
            return Err(PracharError::Config(format!(
                "top_p 必须在 (0.0, 1.0] 之间，当前值: {top_p}"
            )));
        }
        Ok(())
    }

    pub fn validate_max_tokens(max_tokens: u32) -> Result<()> {
        if max_tokens == 0 {
            return Err(PracharError::Config("max_tokens 必须大于 0".into()));
        }
        Ok(())
    }

    /// 验证 S3 桶名（3-63 位，小写字母、数字、点和短横线）
    pub fn validate_bucket(bucket: &str) -> Result<()> {
        let valid_chars = bucket
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
        if !(3..=63).contains(&bucket.len()) || !valid_chars {
            return Err(PracharError::Config(format!("无效的存储桶名称: '{bucket}'")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("").is_err());
        assert!(ConfigValidator::validate_url("example.com").is_err());
        assert!(ConfigValidator::validate_url("http://localhost:11434/v1").is_ok());
        assert!(ConfigValidator::validate_url("https://api.example.com").is_ok());
    }

    #[test]
    fn test_validate_model_id() {
        assert!(ConfigValidator::validate_model_id("").is_err());
        assert!(ConfigValidator::validate_model_id("amazon.nova-lite-v1:0").is_ok());
    }

    #[test]
    fn test_validate_temperature() {
        assert!(ConfigValidator::validate_temperature(-0.1).is_err());
        assert!(ConfigValidator::validate_temperature(0.0).is_ok());
        assert!(ConfigValidator::validate_temperature(0.7).is_ok());
        assert!(ConfigValidator::validate_temperature(2.1).is_err());
    }

    #[test]
    fn test_validate_limits() {
        assert!(ConfigValidator::validate_max_tokens(0).is_err());
        assert!(ConfigValidator::validate_max_tokens(300).is_ok());
        assert!(ConfigValidator::validate_top_p(0.9).is_ok());
        assert!(ConfigValidator::validate_top_p(1.5).is_err());
    }

    #[test]
    fn test_validate_bucket() {
        assert!(ConfigValidator::validate_bucket("prachar-ai-assets").is_ok());
        assert!(ConfigValidator::validate_bucket("Bad_Bucket").is_err());
        assert!(ConfigValidator::validate_bucket("ab").is_err());
    }
}
