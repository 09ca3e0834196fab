use std::io::Cursor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prachar::generation::image::public_url;
use prachar::llm::ImageRequest;
use prachar::{
    CaptionGenerator, CampaignOrchestrator, CampaignPlanner, CreativeDirector, FailureKind,
    GenerateRequest, GenerationPhase, ImageFallbackSelector, ImageGenerator, ImageModel, LlmClient,
    LlmRequest, LlmResponse, Matcher, MemoryCampaignStore, ObjectStore, PracharError, Result,
    RetryPolicy,
};

/// 带系统提示词的是策划调用，其余是文案调用
struct SplitClient {
    plan: std::result::Result<&'static str, &'static str>,
    captions: std::result::Result<&'static str, &'static str>,
    calls: AtomicU32,
}

impl SplitClient {
    fn new(
        plan: std::result::Result<&'static str, &'static str>,
        captions: std::result::Result<&'static str, &'static str>,
    ) -> Arc<Self> {
        Arc::new(Self {
            plan,
            captions,
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl LlmClient for SplitClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = if request.system.is_some() { self.plan } else { self.captions };
        match scripted {
            Ok(text) => Ok(LlmResponse::text(text)),
            Err("throttle") => Err(PracharError::RateLimited("ThrottlingException".into())),
            Err(message) => Err(PracharError::upstream("bedrock", message)),
        }
    }
}

struct BrokenImages;

#[async_trait]
impl ImageModel for BrokenImages {
    async fn generate(&self, _request: ImageRequest) -> Result<Vec<u8>> {
        Err(PracharError::upstream("bedrock", "ValidationException: model not enabled"))
    }
}

struct GoodImages;

#[async_trait]
impl ImageModel for GoodImages {
    async fn generate(&self, _request: ImageRequest) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image::RgbImage::new(1, 1))
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| PracharError::Serialization(e.to_string()))?;
        Ok(out.into_inner())
    }
}

struct PublicStore;

#[async_trait]
impl ObjectStore for PublicStore {
    async fn put(&self, bucket: &str, key: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<String> {
        Ok(public_url(bucket, key))
    }
}

fn director(client: Arc<SplitClient>, images: Arc<dyn ImageModel>) -> CreativeDirector {
    let matcher = Matcher::default();
    let captions = CaptionGenerator::new(client.clone(), matcher.clone())
        .with_retry(RetryPolicy::new(2, Duration::ZERO));
    let images = ImageGenerator::new(
        images,
        Arc::new(PublicStore),
        "prachar-ai-assets",
        ImageFallbackSelector::default(),
    );
    CreativeDirector::new(client, captions, matcher).with_images(images)
}

fn live(planner: CreativeDirector) -> CampaignOrchestrator {
    CampaignOrchestrator::builder()
        .demo_mode(false)
        .planner(Arc::new(planner))
        .build()
}

const PLAN_TEXT: &str = "Hook: Robots ka dangal!\nOffer: Free kit for first 50\nCTA: Register on the portal";
const CAPTION_TEXT: &str = "1. Robots ka dangal 🔥\n2. Free kit milega 💯\n3. Abhi register karo ✨";

#[tokio::test]
async fn demo_mode_serves_catalog_entry() {
    let orchestrator = CampaignOrchestrator::builder().build();
    let record = orchestrator
        .handle(&GenerateRequest::new("Hype my college tech fest", "u1"))
        .await
        .unwrap();
    let entry = Matcher::default().select_campaign("tech fest").clone();
    assert_eq!(record.plan, entry.plan);
    assert_eq!(record.captions, entry.captions);
    assert_eq!(record.image_url, entry.image_url);
    assert_eq!(record.user_id, "u1");
    assert_eq!(record.goal, "Hype my college tech fest");
}

#[tokio::test]
async fn full_live_path_uses_generated_content() {
    let client = SplitClient::new(Ok(PLAN_TEXT), Ok(CAPTION_TEXT));
    let orchestrator = live(director(client, Arc::new(GoodImages)));
    let record = orchestrator
        .handle(&GenerateRequest::new("robotics workshop", "u7"))
        .await
        .unwrap();

    assert_eq!(record.plan.hook, "Robots ka dangal!");
    assert_eq!(record.captions[0], "Robots ka dangal 🔥");
    assert!(record
        .image_url
        .starts_with("https://prachar-ai-assets.s3.amazonaws.com/campaigns/u7/"));
}

#[tokio::test]
async fn every_live_call_failing_still_succeeds() {
    let client = SplitClient::new(Err("throttle"), Err("throttle"));
    let orchestrator = live(director(client.clone(), Arc::new(BrokenImages)));

    for goal in ["Hype my college fest", "zzz_no_match_xyz", "neural network basics"] {
        let record = orchestrator
            .handle(&GenerateRequest::new(goal, "u1"))
            .await
            .unwrap();
        assert_eq!(record.captions.len(), 3);
        assert!(record.image_url.starts_with("https://"));
        assert_eq!(record.plan, Matcher::default().select_campaign(goal).plan);
    }
    // 策划调用失败直接整体兜底，不进入文案阶段
    assert_eq!(client.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn image_fallback_is_chosen_independently() {
    let client = SplitClient::new(Ok(PLAN_TEXT), Err("AccessDeniedException"));
    let orchestrator = live(director(client, Arc::new(BrokenImages)));
    let goal = "go racing this weekend";
    let record = orchestrator
        .handle(&GenerateRequest::new(goal, "u1"))
        .await
        .unwrap();

    let generic = Matcher::default().select_campaign(goal).clone();
    assert_eq!(generic.key, "generic");
    assert_eq!(record.captions, generic.captions);
    assert_eq!(record.image_url, ImageFallbackSelector::default().select_fallback_image(goal));
    assert_ne!(record.image_url, generic.image_url);
}

#[tokio::test]
async fn planner_records_fallback_notes() {
    let client = SplitClient::new(Ok("I could not decide."), Err("throttle"));
    let planned = director(client, Arc::new(BrokenImages))
        .plan("drone racing finals", "u1")
        .await
        .unwrap();

    let phases: Vec<GenerationPhase> = planned.fallbacks.iter().map(|n| n.phase).collect();
    assert_eq!(
        phases,
        vec![GenerationPhase::Plan, GenerationPhase::Captions, GenerationPhase::Image]
    );
    assert_eq!(planned.fallbacks[1].kind, FailureKind::RateLimited);
    assert_eq!(planned.plan, Matcher::default().select_campaign("drone racing finals").plan);
}

#[tokio::test]
async fn strict_mode_surfaces_masked_failures() {
    let client = SplitClient::new(Ok(PLAN_TEXT), Err("throttle"));
    let orchestrator = CampaignOrchestrator::builder()
        .demo_mode(false)
        .strict_mode(true)
        .planner(Arc::new(director(client, Arc::new(GoodImages))))
        .build();
    let err = orchestrator
        .handle(&GenerateRequest::new("hackathon", "u1"))
        .await
        .unwrap_err();
    assert!(matches!(err, PracharError::Upstream { .. }));
}

#[tokio::test]
async fn missing_planner_fails_over_in_lenient_mode() {
    let orchestrator = CampaignOrchestrator::builder().demo_mode(false).build();
    let record = orchestrator
        .handle(&GenerateRequest::new("sports meet", "u1"))
        .await
        .unwrap();
    assert_eq!(record.plan, Matcher::default().select_campaign("sports meet").plan);
}

#[tokio::test]
async fn records_are_persisted_per_user() {
    let store = Arc::new(MemoryCampaignStore::new());
    let orchestrator = CampaignOrchestrator::builder().store(store.clone()).build();
    let first = orchestrator
        .handle(&GenerateRequest::new("hackathon", "alice"))
        .await
        .unwrap();
    orchestrator
        .handle(&GenerateRequest::new("cultural fest", "bob"))
        .await
        .unwrap();

    let listed = orchestrator.campaigns_for_user("alice").await.unwrap();
    assert_eq!(listed, vec![first]);
    assert_eq!(store.len(), 2);
}
