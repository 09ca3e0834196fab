use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::EnvConfig;
use crate::error::{PracharError, Result};
use crate::generation::{RetryPolicy, TextSettings};
use crate::utils::ConfigValidator;

/// 实时生成后端
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Bedrock Nova + Titan + S3（`bedrock` 特性）
    Bedrock,
    /// OpenAI 兼容 HTTP 接口（`openai-client` 特性）
    Http,
}

impl FromStr for Backend {
    type Err = PracharError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bedrock" | "aws" => Ok(Backend::Bedrock),
            "http" | "openai" => Ok(Backend::Http),
            other => Err(PracharError::Config(format!(
                "未知的后端 '{other}'，可选: bedrock, http"
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Bedrock => "bedrock",
            Backend::Http => "http",
        })
    }
}

/// 活动记录存储
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Noop,
    Memory,
    Redis,
}

impl FromStr for StoreKind {
    type Err = PracharError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "noop" | "none" => Ok(StoreKind::Noop),
            "memory" => Ok(StoreKind::Memory),
            "redis" => Ok(StoreKind::Redis),
            other => Err(PracharError::Config(format!(
                "未知的存储 '{other}'，可选: noop, memory, redis"
            ))),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreKind::Noop => "noop",
            StoreKind::Memory => "memory",
            StoreKind::Redis => "redis",
        })
    }
}

/// 进程级配置，启动时从环境变量读取一次
#[derive(Clone, Debug)]
pub struct CampaignConfig {
    pub aws_region: String,
    pub knowledge_base_id: Option<String>,
    /// 固定的品牌规范文本，替代知识库检索
    pub brand_guidelines: Option<String>,
    pub guardrail_id: String,
    pub guardrail_version: String,
    pub s3_bucket: String,
    pub dynamodb_table: String,
    pub text_model_id: String,
    pub image_model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub demo_mode: bool,
    pub strict_mode: bool,
    pub backend: Backend,
    pub llm_api_base: Option<String>,
    pub llm_api_key: Option<String>,
    pub image_api_base: Option<String>,
    pub max_retries: u32,
    pub retry_base_ms: u64,
    pub call_timeout_secs: u64,
    pub planning_timeout_secs: u64,
    pub listen: String,
    pub store: StoreKind,
    pub redis_url: Option<String>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            aws_region: "us-east-1".into(),
            knowledge_base_id: None,
            brand_guidelines: None,
            guardrail_id: "default".into(),
            guardrail_version: "DRAFT".into(),
            s3_bucket: "prachar-ai-assets".into(),
            dynamodb_table: "prachar-campaigns".into(),
            text_model_id: "amazon.nova-lite-v1:0".into(),
            image_model_id: "amazon.titan-image-generator-v1".into(),
            max_tokens: 300,
            temperature: 0.7,
            top_p: 0.9,
            demo_mode: true,
            strict_mode: false,
            backend: Backend::Bedrock,
            llm_api_base: None,
            llm_api_key: None,
            image_api_base: None,
            max_retries: 2,
            retry_base_ms: 2000,
            call_timeout_secs: 30,
            planning_timeout_secs: 120,
            listen: "0.0.0.0:8000".into(),
            store: StoreKind::Noop,
            redis_url: None,
        }
    }
}

impl CampaignConfig {
    pub fn from_env() -> Result<Self> {
        let d = Self::default();
        let config = Self {
            aws_region: EnvConfig::get_or("AWS_REGION", &d.aws_region),
            knowledge_base_id: EnvConfig::get_env_optional("BEDROCK_KB_ID"),
            brand_guidelines: EnvConfig::get_env_optional("PRACHAR_BRAND_GUIDELINES"),
            guardrail_id: EnvConfig::get_or("GUARDRAIL_ID", &d.guardrail_id),
            guardrail_version: EnvConfig::get_or("GUARDRAIL_VERSION", &d.guardrail_version),
            s3_bucket: EnvConfig::get_or("S3_BUCKET", &d.s3_bucket),
            dynamodb_table: EnvConfig::get_or("DYNAMODB_TABLE", &d.dynamodb_table),
            text_model_id: EnvConfig::get_or("TEXT_MODEL_ID", &d.text_model_id),
            image_model_id: EnvConfig::get_or("IMAGE_MODEL_ID", &d.image_model_id),
            max_tokens: EnvConfig::get_parsed("MAX_TOKENS", d.max_tokens)?,
            temperature: EnvConfig::get_parsed("TEMPERATURE", d.temperature)?,
            top_p: EnvConfig::get_parsed("TOP_P", d.top_p)?,
            demo_mode: EnvConfig::get_bool("PRACHAR_DEMO_MODE", d.demo_mode)?,
            strict_mode: EnvConfig::get_bool("PRACHAR_STRICT_MODE", d.strict_mode)?,
            backend: EnvConfig::get_parsed("PRACHAR_BACKEND", d.backend)?,
            llm_api_base: EnvConfig::get_env_optional("LLM_API_BASE"),
            llm_api_key: EnvConfig::get_env_optional("LLM_API_KEY"),
            image_api_base: EnvConfig::get_env_optional("IMAGE_API_BASE"),
            max_retries: EnvConfig::get_parsed("PRACHAR_MAX_RETRIES", d.max_retries)?,
            retry_base_ms: EnvConfig::get_parsed("PRACHAR_RETRY_BASE_MS", d.retry_base_ms)?,
            call_timeout_secs: EnvConfig::get_parsed("PRACHAR_CALL_TIMEOUT_SECS", d.call_timeout_secs)?,
            planning_timeout_secs: EnvConfig::get_parsed(
                "PRACHAR_PLANNING_TIMEOUT_SECS",
                d.planning_timeout_secs,
            )?,
            listen: EnvConfig::get_or("PRACHAR_LISTEN", &d.listen),
            store: EnvConfig::get_parsed("PRACHAR_STORE", d.store)?,
            redis_url: EnvConfig::get_env_optional("REDIS_URL"),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_temperature(self.temperature)?;
        ConfigValidator::validate_top_p(self.top_p)?;
        ConfigValidator::validate_max_tokens(self.max_tokens)?;
        ConfigValidator::validate_model_id(&self.text_model_id)?;
        ConfigValidator::validate_model_id(&self.image_model_id)?;
        ConfigValidator::validate_bucket(&self.s3_bucket)?;
        if let Some(base) = &self.llm_api_base {
            ConfigValidator::validate_url(base)?;
        }
        if let Some(base) = &self.image_api_base {
            ConfigValidator::validate_url(base)?;
        }
        if self.call_timeout_secs == 0 || self.planning_timeout_secs == 0 {
            return Err(PracharError::Config("超时时间必须大于 0".into()));
        }
        if self.store == StoreKind::Redis && self.redis_url.is_none() {
            return Err(PracharError::Config(
                "PRACHAR_STORE=redis 需要同时设置 REDIS_URL".into(),
            ));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_base_ms))
    }

    pub fn text_settings(&self) -> TextSettings {
        TextSettings {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            call_timeout: self.call_timeout(),
        }
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub fn planning_timeout(&self) -> Duration {
        Duration::from_secs(self.planning_timeout_secs)
    }

    /// 供 `check-env` 打印的配置清单，凭据已脱敏
    pub fn report(&self) -> Vec<(&'static str, String)> {
        let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "(unset)".into());
        vec![
            ("AWS_REGION", self.aws_region.clone()),
            ("BEDROCK_KB_ID", optional(&self.knowledge_base_id)),
            (
                "PRACHAR_BRAND_GUIDELINES",
                if self.brand_guidelines.is_some() { "(set)".into() } else { "(unset)".into() },
            ),
            ("GUARDRAIL_ID", self.guardrail_id.clone()),
            ("GUARDRAIL_VERSION", self.guardrail_version.clone()),
            ("S3_BUCKET", self.s3_bucket.clone()),
            ("DYNAMODB_TABLE", self.dynamodb_table.clone()),
            ("TEXT_MODEL_ID", self.text_model_id.clone()),
            ("IMAGE_MODEL_ID", self.image_model_id.clone()),
            ("PRACHAR_DEMO_MODE", self.demo_mode.to_string()),
            ("PRACHAR_STRICT_MODE", self.strict_mode.to_string()),
            ("PRACHAR_BACKEND", self.backend.to_string()),
            ("LLM_API_BASE", optional(&self.llm_api_base)),
            (
                "LLM_API_KEY",
                self.llm_api_key
                    .as_deref()
                    .map(EnvConfig::mask_secret)
                    .unwrap_or_else(|| "(unset)".into()),
            ),
            ("PRACHAR_STORE", self.store.to_string()),
            ("PRACHAR_LISTEN", self.listen.clone()),
        ]
    }
}

/// AWS 凭据检查结果，值已脱敏
pub fn aws_credentials_report() -> Vec<(&'static str, Option<String>)> {
    ["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "AWS_SESSION_TOKEN", "AWS_PROFILE"]
        .into_iter()
        .map(|key| {
            let value = EnvConfig::get_env_optional(key).map(|v| {
                if key == "AWS_PROFILE" {
                    v
                } else {
                    EnvConfig::mask_secret(&v)
                }
            });
            (key, value)
        })
        .collect()
}

/// 有静态密钥对或 profile 即视为可用
pub fn has_aws_credentials() -> bool {
    let keys = EnvConfig::get_env_optional("AWS_ACCESS_KEY_ID").is_some()
        && EnvConfig::get_env_optional("AWS_SECRET_ACCESS_KEY").is_some();
    keys || EnvConfig::get_env_optional("AWS_PROFILE").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CampaignConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.demo_mode);
        assert!(!config.strict_mode);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.text_settings(), TextSettings::default());
    }

    #[test]
    fn parses_enums() {
        assert_eq!("HTTP".parse::<Backend>().unwrap(), Backend::Http);
        assert!("gcp".parse::<Backend>().is_err());
        assert_eq!("memory".parse::<StoreKind>().unwrap(), StoreKind::Memory);
    }

    #[test]
    fn redis_needs_url() {
        let config = CampaignConfig {
            store: StoreKind::Redis,
            ..CampaignConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn report_masks_api_key() {
        let config = CampaignConfig {
            llm_api_key: Some("sk-1234567890abcdefXYZ9".into()),
            ..CampaignConfig::default()
        };
        let report = config.report();
        let (_, key) = report.iter().find(|(k, _)| *k == "LLM_API_KEY").unwrap();
        assert_eq!(key, "sk-12345...XYZ9");
    }
}
