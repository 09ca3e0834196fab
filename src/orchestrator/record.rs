use serde::{Deserialize, Serialize};

use crate::catalog::{CampaignPlan, Captions};
use crate::error::{PracharError, Result};

pub const MISSING_FIELDS: &str = "Missing required fields: goal and user_id";

/// 入站请求。字段在线上都是可选的，缺失由 `validate` 报告而不是反序列化失败
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl GenerateRequest {
    pub fn new(goal: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            goal: Some(goal.into()),
            user_id: Some(user_id.into()),
        }
    }

    /// 空字符串按缺失处理
    pub fn validate(&self) -> Result<(&str, &str)> {
        match (self.goal.as_deref(), self.user_id.as_deref()) {
            (Some(goal), Some(user_id)) if !goal.is_empty() && !user_id.is_empty() => {
                Ok((goal, user_id))
            }
            _ => Err(PracharError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Completed,
}

/// 返回给调用方并写入存储的活动记录，构建后不再修改
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_id: String,
    pub user_id: String,
    pub goal: String,
    pub plan: CampaignPlan,
    pub captions: Captions,
    pub image_url: String,
    pub status: CampaignStatus,
    pub created_at: String,
}

impl CampaignRecord {
    /// 生成新的 UUID 与 UTC 时间戳
    pub fn assemble(
        user_id: &str,
        goal: &str,
        plan: CampaignPlan,
        captions: Captions,
        image_url: String,
    ) -> Self {
        Self {
            campaign_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            goal: goal.to_string(),
            plan,
            captions,
            image_url,
            status: CampaignStatus::Completed,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_missing() {
        assert!(GenerateRequest::new("Hype my fest", "u1").validate().is_ok());
        assert!(GenerateRequest::new("", "u1").validate().is_err());
        assert!(GenerateRequest::new("goal", "").validate().is_err());
        assert!(GenerateRequest::default().validate().is_err());
        // 纯空白仍视为有效
        assert!(GenerateRequest::new("  ", "u1").validate().is_ok());
    }

    #[test]
    fn record_serializes_status_lowercase() {
        let record = CampaignRecord::assemble(
            "u1",
            "goal",
            CampaignPlan::new("h", "o", "c"),
            ["a".into(), "b".into(), "c".into()],
            "https://example.com/x.png".into(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["captions"].as_array().unwrap().len(), 3);
        assert!(uuid::Uuid::parse_str(&record.campaign_id).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(&record.created_at).is_ok());
    }
}
