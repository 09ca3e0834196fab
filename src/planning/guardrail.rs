use serde::Serialize;

/// 护栏配置，仅用于审计日志，不做拦截
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuardrailConfig {
    pub id: String,
    pub version: String,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            id: "default".into(),
            version: "DRAFT".into(),
        }
    }
}

impl GuardrailConfig {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

/// 记录一次护栏检查事件，内容只保留前 200 个字符
pub fn log_guardrail_event(guardrail: &GuardrailConfig, user_id: &str, step: &str, action: &str, content: &str) {
    let preview: String = content.chars().take(200).collect();
    tracing::info!(
        target: "prachar::guardrail",
        log_id = %uuid::Uuid::new_v4(),
        event_type = "guardrail_check",
        guardrail_id = %guardrail.id,
        guardrail_version = %guardrail.version,
        user_id,
        step,
        action,
        content_preview = %preview,
        "guardrail event"
    );
}
