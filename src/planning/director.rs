use async_trait::async_trait;
use tracing::instrument;

use crate::error::Result;
use crate::generation::prompt::{planning_prompt, CREATIVE_DIRECTOR_SYSTEM_PROMPT};
use crate::generation::retry::bounded;
use crate::generation::{
    CaptionGenerator, FailureKind, FallbackNote, GenerationPhase, ImageGenerator, LiveOutcome,
    TextSettings,
};
use crate::llm::{DynLlmClient, LlmRequest};
use crate::matching::{ImageFallbackSelector, Matcher};

use super::guardrail::{log_guardrail_event, GuardrailConfig};
use super::{extract_plan, CampaignPlanner, Planned};

/// 基于文本模型的策划者
///
/// 一次策划调用得到钩子/优惠/行动号召，然后依次生成文案和海报（海报使用第一条文案）。
/// 生成器失败时已各自兜底，这里只记录 `FallbackNote`；策划调用本身的错误向上返回。
pub struct CreativeDirector {
    client: DynLlmClient,
    captions: CaptionGenerator,
    images: Option<ImageGenerator>,
    matcher: Matcher,
    selector: ImageFallbackSelector,
    settings: TextSettings,
    guardrail: GuardrailConfig,
}

impl CreativeDirector {
    pub fn new(client: DynLlmClient, captions: CaptionGenerator, matcher: Matcher) -> Self {
        Self {
            client,
            captions,
            images: None,
            matcher,
            selector: ImageFallbackSelector::default(),
            settings: TextSettings::default(),
            guardrail: GuardrailConfig::default(),
        }
    }

    /// 没有配置海报生成器时，海报直接取主题占位图
    pub fn with_images(mut self, images: ImageGenerator) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_selector(mut self, selector: ImageFallbackSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_settings(mut self, settings: TextSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_guardrail(mut self, guardrail: GuardrailConfig) -> Self {
        self.guardrail = guardrail;
        self
    }

    async fn request_plan_text(&self, goal: &str) -> Result<String> {
        let prompt = planning_prompt(goal);
        tracing::debug!(prompt = %prompt, "planning input");
        let request = LlmRequest::new(prompt)
            .with_system(CREATIVE_DIRECTOR_SYSTEM_PROMPT)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens)
            .with_top_p(self.settings.top_p);
        let response = bounded("planning", self.settings.call_timeout, self.client.complete(request)).await?;
        tracing::debug!(output = %response.content, "planning output");
        Ok(response.content)
    }
}

#[async_trait]
impl CampaignPlanner for CreativeDirector {
    #[instrument(skip(self), fields(model = self.client.model()))]
    async fn plan(&self, goal: &str, user_id: &str) -> Result<Planned> {
        let mut fallbacks = Vec::new();

        log_guardrail_event(&self.guardrail, user_id, "input", "checked", goal);
        let text = self.request_plan_text(goal).await?;

        let plan = match extract_plan(&text) {
            Some(plan) => plan,
            None => {
                tracing::info!(phase = "plan", "plan extraction incomplete, using catalog plan");
                fallbacks.push(FallbackNote::new(GenerationPhase::Plan, FailureKind::Upstream));
                self.matcher.select_campaign(goal).plan.clone()
            }
        };
        log_guardrail_event(&self.guardrail, user_id, "plan", "checked", &plan.hook);

        let captions = match self.captions.try_generate_captions(&plan, user_id).await {
            LiveOutcome::Success(captions) => captions,
            LiveOutcome::Failure(kind) => {
                fallbacks.push(FallbackNote::new(GenerationPhase::Captions, kind));
                self.captions.fallback_captions(goal)
            }
        };
        log_guardrail_event(&self.guardrail, user_id, "captions", "checked", &captions.join("\n"));

        let image_url = match &self.images {
            Some(images) => match images.try_generate_image(&captions[0], user_id, None).await {
                LiveOutcome::Success(url) => url,
                LiveOutcome::Failure(kind) => {
                    fallbacks.push(FallbackNote::new(GenerationPhase::Image, kind));
                    images.fallback_image(goal).to_string()
                }
            },
            None => {
                fallbacks.push(FallbackNote::new(GenerationPhase::Image, FailureKind::Unavailable));
                self.selector.select_fallback_image(goal).to_string()
            }
        };
        log_guardrail_event(&self.guardrail, user_id, "image", "checked", &image_url);

        if !fallbacks.is_empty() {
            tracing::info!(count = fallbacks.len(), "planning finished with fallbacks");
        }

        Ok(Planned {
            plan,
            captions,
            image_url,
            fallbacks,
        })
    }
}
