//! 按配置装配编排器

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::{Backend, CampaignConfig, StoreKind};
use crate::error::{PracharError, Result};
use crate::generation::{BrandRetriever, NoBrandRetriever, StaticBrandRetriever};
use crate::matching::Matcher;
use crate::orchestrator::CampaignOrchestrator;
use crate::planning::{CampaignPlanner, CreativeDirector, GuardrailConfig};
use crate::store::{CampaignStore, NoopCampaignStore};

/// 根据配置创建记录存储
pub fn build_store(config: &CampaignConfig) -> Result<Arc<dyn CampaignStore>> {
    match config.store {
        StoreKind::Noop => Ok(Arc::new(NoopCampaignStore)),
        #[cfg(feature = "memory-store")]
        StoreKind::Memory => Ok(Arc::new(crate::store::MemoryCampaignStore::new())),
        #[cfg(feature = "redis-store")]
        StoreKind::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| PracharError::Config("REDIS_URL 未设置".into()))?;
            Ok(Arc::new(crate::store::RedisCampaignStore::open(url, "prachar")?))
        }
        #[allow(unreachable_patterns)]
        other => Err(PracharError::Config(format!(
            "存储 '{other}' 未编译进当前构建，请启用对应的 feature"
        ))),
    }
}

fn brand_retriever(config: &CampaignConfig) -> Arc<dyn BrandRetriever> {
    if config.knowledge_base_id.is_some() && config.brand_guidelines.is_none() {
        tracing::warn!("BEDROCK_KB_ID is set but knowledge base retrieval is not supported, using default brand tone");
    }
    match &config.brand_guidelines {
        Some(text) => Arc::new(StaticBrandRetriever::new(text.clone())),
        None => Arc::new(NoBrandRetriever),
    }
}

/// 根据后端创建策划者；当前构建不支持所选后端时返回 `None`
pub async fn build_planner(config: &CampaignConfig, catalog: Arc<Catalog>) -> Result<Option<Arc<dyn CampaignPlanner>>> {
    let matcher = Matcher::new(Arc::clone(&catalog));
    let brand = brand_retriever(config);
    let guardrail = GuardrailConfig::new(&config.guardrail_id, &config.guardrail_version);

    let director = match config.backend {
        Backend::Bedrock => bedrock_director(config, matcher, brand).await?,
        Backend::Http => http_director(config, matcher, brand).await?,
    };

    Ok(director.map(|director| {
        Arc::new(
            director
                .with_settings(config.text_settings())
                .with_guardrail(guardrail),
        ) as Arc<dyn CampaignPlanner>
    }))
}

#[cfg(feature = "bedrock")]
async fn bedrock_director(
    config: &CampaignConfig,
    matcher: Matcher,
    brand: Arc<dyn BrandRetriever>,
) -> Result<Option<CreativeDirector>> {
    use crate::aws::{bedrock_runtime_client, load_sdk_config, s3_client, BedrockTextClient, S3ObjectStore, TitanImageClient};
    use crate::generation::{CaptionGenerator, ImageGenerator};
    use crate::matching::ImageFallbackSelector;

    let sdk_config = load_sdk_config(&config.aws_region).await;
    let runtime = bedrock_runtime_client(&sdk_config);

    let text = Arc::new(BedrockTextClient::new(runtime.clone(), &config.text_model_id));
    let images = ImageGenerator::new(
        Arc::new(TitanImageClient::new(runtime, &config.image_model_id)),
        Arc::new(S3ObjectStore::new(s3_client(&sdk_config))),
        &config.s3_bucket,
        ImageFallbackSelector::default(),
    )
    .with_brand(Arc::clone(&brand))
    .with_call_timeout(config.call_timeout());

    let captions = CaptionGenerator::new(text.clone(), matcher.clone())
        .with_brand(brand)
        .with_retry(config.retry_policy())
        .with_settings(config.text_settings());

    tracing::info!(region = %config.aws_region, text_model = %config.text_model_id, "bedrock backend ready");
    Ok(Some(CreativeDirector::new(text, captions, matcher).with_images(images)))
}

#[cfg(not(feature = "bedrock"))]
async fn bedrock_director(
    _config: &CampaignConfig,
    _matcher: Matcher,
    _brand: Arc<dyn BrandRetriever>,
) -> Result<Option<CreativeDirector>> {
    tracing::warn!("bedrock backend selected but this build lacks the `bedrock` feature");
    Ok(None)
}

#[cfg(feature = "openai-client")]
async fn http_director(
    config: &CampaignConfig,
    matcher: Matcher,
    brand: Arc<dyn BrandRetriever>,
) -> Result<Option<CreativeDirector>> {
    use crate::generation::CaptionGenerator;
    use crate::llm::GenericHttpClient;

    let base = config
        .llm_api_base
        .as_deref()
        .ok_or_else(|| PracharError::Config("PRACHAR_BACKEND=http 需要设置 LLM_API_BASE".into()))?;
    let api_key = config.llm_api_key.clone().unwrap_or_default();
    let text = Arc::new(GenericHttpClient::new(base, api_key.clone(), &config.text_model_id, config.call_timeout())?);

    let captions = CaptionGenerator::new(text.clone(), matcher.clone())
        .with_brand(Arc::clone(&brand))
        .with_retry(config.retry_policy())
        .with_settings(config.text_settings());
    let director = CreativeDirector::new(text, captions, matcher);

    Ok(Some(http_images(config, director, brand, api_key).await?))
}

/// 文生图走 HTTP，上传仍需要 S3
#[cfg(all(feature = "openai-client", feature = "bedrock"))]
async fn http_images(
    config: &CampaignConfig,
    director: CreativeDirector,
    brand: Arc<dyn BrandRetriever>,
    api_key: String,
) -> Result<CreativeDirector> {
    use crate::aws::{load_sdk_config, s3_client, S3ObjectStore};
    use crate::generation::ImageGenerator;
    use crate::llm::HttpImageClient;
    use crate::matching::ImageFallbackSelector;

    let Some(base) = config.image_api_base.as_deref() else {
        return Ok(director);
    };
    let sdk_config = load_sdk_config(&config.aws_region).await;
    let images = ImageGenerator::new(
        Arc::new(HttpImageClient::new(base, api_key, &config.image_model_id, config.call_timeout())?),
        Arc::new(S3ObjectStore::new(s3_client(&sdk_config))),
        &config.s3_bucket,
        ImageFallbackSelector::default(),
    )
    .with_brand(brand)
    .with_call_timeout(config.call_timeout());
    Ok(director.with_images(images))
}

#[cfg(all(feature = "openai-client", not(feature = "bedrock")))]
async fn http_images(
    config: &CampaignConfig,
    director: CreativeDirector,
    _brand: Arc<dyn BrandRetriever>,
    _api_key: String,
) -> Result<CreativeDirector> {
    if config.image_api_base.is_some() {
        tracing::warn!("IMAGE_API_BASE is set but uploads need the `bedrock` feature, posters use placeholders");
    }
    Ok(director)
}

#[cfg(not(feature = "openai-client"))]
async fn http_director(
    _config: &CampaignConfig,
    _matcher: Matcher,
    _brand: Arc<dyn BrandRetriever>,
) -> Result<Option<CreativeDirector>> {
    tracing::warn!("http backend selected but this build lacks the `openai-client` feature");
    Ok(None)
}

/// 完整装配：目录、存储、策划者、模式开关
pub async fn build_orchestrator(config: &CampaignConfig) -> Result<CampaignOrchestrator> {
    let catalog = Catalog::builtin();
    let store = build_store(config)?;

    let mut builder = CampaignOrchestrator::builder()
        .catalog(Arc::clone(&catalog))
        .store(store)
        .demo_mode(config.demo_mode)
        .strict_mode(config.strict_mode)
        .planning_timeout(config.planning_timeout());

    if config.demo_mode {
        tracing::info!("demo mode enabled, live generation is skipped");
    } else if let Some(planner) = build_planner(config, catalog).await? {
        builder = builder.planner(planner);
    }

    Ok(builder.build())
}
