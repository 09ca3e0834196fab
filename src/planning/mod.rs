//! 活动策划
//!
//! `CampaignPlanner` 是编排器调用的策划接口；`CreativeDirector` 是基于文本模型的实现：
//! 先生成钩子/优惠/行动号召，再驱动文案与海报两个生成器。

mod director;
mod guardrail;

use async_trait::async_trait;
use serde::Serialize;

use crate::catalog::{CampaignPlan, Captions};
use crate::error::Result;
use crate::generation::FallbackNote;

pub use director::CreativeDirector;
pub use guardrail::{log_guardrail_event, GuardrailConfig};

pub const DEFAULT_OFFER: &str = "Special opportunity for you";
pub const DEFAULT_CTA: &str = "Join us now";

/// 策划结果
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Planned {
    pub plan: CampaignPlan,
    pub captions: Captions,
    pub image_url: String,
    /// 哪些阶段用了兜底
    pub fallbacks: Vec<FallbackNote>,
}

#[async_trait]
pub trait CampaignPlanner: Send + Sync {
    async fn plan(&self, goal: &str, user_id: &str) -> Result<Planned>;
}

/// 从模型输出中提取 `Hook:` / `Offer:` / `CTA:` 行
///
/// 没找到钩子时返回 `None`，由调用方改用目录方案；优惠和行动号召缺失时用默认值。
pub fn extract_plan(text: &str) -> Option<CampaignPlan> {
    let mut hook = None;
    let mut offer = None;
    let mut cta = None;

    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value
            .trim()
            .trim_matches(|c: char| c == '*' || c == '"' || c == '\'' || c.is_whitespace());
        if value.is_empty() {
            continue;
        }

        // 只看冒号前的标签，避免正文里的词误触发
        let label = label.to_lowercase();
        if label.contains("hook") {
            hook = Some(value.to_string());
        } else if label.contains("offer") {
            offer = Some(value.to_string());
        } else if ["cta", "call-to-action", "call to action"]
            .iter()
            .any(|marker| label.contains(marker))
        {
            cta = Some(value.to_string());
        }
    }

    hook.map(|hook| CampaignPlan {
        hook,
        offer: offer.unwrap_or_else(|| DEFAULT_OFFER.to_string()),
        cta: cta.unwrap_or_else(|| DEFAULT_CTA.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_labelled_lines() {
        let text = "Here is the plan:\n**Hook:** Robots ka mela!\nOffer: Free workshop\n\
                    Call to Action: \"Register today\"";
        let plan = extract_plan(text).unwrap();
        assert_eq!(plan.hook, "Robots ka mela!");
        assert_eq!(plan.offer, "Free workshop");
        assert_eq!(plan.cta, "Register today");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let plan = extract_plan("1. Hook: Big news").unwrap();
        assert_eq!(plan.hook, "Big news");
        assert_eq!(plan.offer, DEFAULT_OFFER);
        assert_eq!(plan.cta, DEFAULT_CTA);
    }

    #[test]
    fn no_hook_is_none() {
        assert!(extract_plan("Offer: something\nCTA: go").is_none());
        assert!(extract_plan("").is_none());
        assert!(extract_plan("Hook:   ").is_none());
    }
}
