use thiserror::Error;

pub type Result<T> = std::result::Result<T, PracharError>;

#[derive(Debug, Error)]
pub enum PracharError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("rate limited by upstream: {0}")]
    RateLimited(String),
    #[error("upstream `{service}` failed: {message}")]
    Upstream { service: String, message: String },
    #[error("`{phase}` timed out after {secs}s")]
    Timeout { phase: String, secs: u64 },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PracharError {
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// 错误类别名，用于结构化日志
    pub fn class(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::RateLimited(_) => "rate_limited",
            Self::Upstream { .. } => "upstream",
            Self::Timeout { .. } => "timeout",
            Self::Config(_) => "config",
            Self::Store(_) => "store",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}

impl From<serde_json::Error> for PracharError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
