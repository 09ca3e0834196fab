use std::fmt;

use serde::Serialize;

use crate::error::PracharError;

/// 实时调用失败的类别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 限流，重试耗尽
    RateLimited,
    /// 鉴权、区域、模型不存在、网络等
    Upstream,
    Timeout,
    /// 没有配置实时服务
    Unavailable,
    /// 编程错误或 panic
    Unexpected,
}

impl From<&PracharError> for FailureKind {
    fn from(err: &PracharError) -> Self {
        match err {
            PracharError::RateLimited(_) => FailureKind::RateLimited,
            PracharError::Timeout { .. } => FailureKind::Timeout,
            PracharError::Upstream { .. } | PracharError::Serialization(_) => FailureKind::Upstream,
            PracharError::Config(_) => FailureKind::Unavailable,
            PracharError::Validation(_) | PracharError::Store(_) | PracharError::Other(_) => {
                FailureKind::Unexpected
            }
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::RateLimited => "rate_limited",
            FailureKind::Upstream => "upstream",
            FailureKind::Timeout => "timeout",
            FailureKind::Unavailable => "unavailable",
            FailureKind::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// 实时调用的结果：成功载荷或失败类别，由调用方显式匹配
#[derive(Clone, Debug, PartialEq)]
pub enum LiveOutcome<T> {
    Success(T),
    Failure(FailureKind),
}

impl<T> LiveOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, LiveOutcome::Success(_))
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            LiveOutcome::Success(_) => None,
            LiveOutcome::Failure(kind) => Some(*kind),
        }
    }
}

/// 发生兜底的阶段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    Planning,
    Plan,
    Captions,
    Image,
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationPhase::Planning => "planning",
            GenerationPhase::Plan => "plan",
            GenerationPhase::Captions => "captions",
            GenerationPhase::Image => "image",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FallbackNote {
    pub phase: GenerationPhase,
    pub kind: FailureKind,
}

impl FallbackNote {
    pub fn new(phase: GenerationPhase, kind: FailureKind) -> Self {
        Self { phase, kind }
    }
}
