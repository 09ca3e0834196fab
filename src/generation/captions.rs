use std::sync::Arc;

use tracing::instrument;

use crate::catalog::{CampaignPlan, Captions};
use crate::error::{PracharError, Result};
use crate::generation::brand::{brand_context, BrandRetriever, NoBrandRetriever};
use crate::generation::outcome::{FailureKind, LiveOutcome};
use crate::generation::prompt::{caption_prompt, TONE_QUERY};
use crate::generation::retry::{bounded, RetryPolicy};
use crate::generation::TextSettings;
use crate::llm::{DynLlmClient, LlmRequest};
use crate::matching::Matcher;

/// 解析模型输出的编号文案
///
/// 只保留以数字或 `-` 开头的行，去掉编号前缀；不足三条时用第一条补齐，超过三条截断。
/// 一条都没有时返回 `None`。
pub fn parse_captions(text: &str) -> Option<Captions> {
    let mut captions: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()) || line.starts_with('-'))
        .map(|line| {
            line.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | ')' | ' '))
                .trim()
                .to_string()
        })
        .filter(|caption| !caption.is_empty())
        .collect();

    let first = captions.first()?.clone();
    while captions.len() < 3 {
        captions.push(first.clone());
    }
    captions.truncate(3);

    let mut iter = captions.into_iter();
    match (iter.next(), iter.next(), iter.next()) {
        (Some(a), Some(b), Some(c)) => Some([a, b, c]),
        _ => None,
    }
}

/// Hinglish 文案生成，限流重试，失败时退回目录文案
pub struct CaptionGenerator {
    client: DynLlmClient,
    brand: Arc<dyn BrandRetriever>,
    matcher: Matcher,
    retry: RetryPolicy,
    settings: TextSettings,
}

impl CaptionGenerator {
    pub fn new(client: DynLlmClient, matcher: Matcher) -> Self {
        Self {
            client,
            brand: Arc::new(NoBrandRetriever),
            matcher,
            retry: RetryPolicy::default(),
            settings: TextSettings::default(),
        }
    }

    pub fn with_brand(mut self, brand: Arc<dyn BrandRetriever>) -> Self {
        self.brand = brand;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_settings(mut self, settings: TextSettings) -> Self {
        self.settings = settings;
        self
    }

    /// 只走实时调用，不做兜底
    #[instrument(skip(self, plan), fields(model = self.client.model()))]
    pub async fn try_generate_captions(
        &self,
        plan: &CampaignPlan,
        user_id: &str,
    ) -> LiveOutcome<Captions> {
        match self.request_captions(plan).await {
            Ok(captions) => {
                tracing::info!(user_id, "captions generated");
                LiveOutcome::Success(captions)
            }
            Err(err) => {
                let kind = FailureKind::from(&err);
                tracing::warn!(
                    phase = "captions",
                    class = err.class(),
                    error = %err,
                    user_id,
                    "caption generation failed"
                );
                LiveOutcome::Failure(kind)
            }
        }
    }

    /// 总是返回三条文案
    pub async fn generate_captions(&self, plan: &CampaignPlan, goal: &str, user_id: &str) -> Captions {
        match self.try_generate_captions(plan, user_id).await {
            LiveOutcome::Success(captions) => captions,
            LiveOutcome::Failure(kind) => {
                tracing::info!(phase = "captions", kind = %kind, "serving catalog captions");
                self.fallback_captions(goal)
            }
        }
    }

    pub fn fallback_captions(&self, goal: &str) -> Captions {
        self.matcher.select_campaign(goal).captions.clone()
    }

    async fn request_captions(&self, plan: &CampaignPlan) -> Result<Captions> {
        let brand = brand_context(self.brand.as_ref(), TONE_QUERY).await;
        let prompt = caption_prompt(plan, &brand);
        let settings = &self.settings;

        let response = self
            .retry
            .run("captions", |_| {
                let request = LlmRequest::new(prompt.clone())
                    .with_temperature(settings.temperature)
                    .with_max_tokens(settings.max_tokens)
                    .with_top_p(settings.top_p);
                bounded("captions", settings.call_timeout, self.client.complete(request))
            })
            .await?;

        parse_captions(&response.content).ok_or_else(|| {
            PracharError::upstream(
                self.client.model().to_string(),
                "model output contained no numbered captions",
            )
        })
    }
}
