pub mod app;
#[cfg(feature = "bedrock")]
pub mod aws;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod llm;
pub mod matching;
pub mod orchestrator;
pub mod planning;
pub mod server;
pub mod store;
pub mod utils;

pub use app::build_orchestrator;
pub use catalog::{CampaignPlan, Captions, Catalog, CatalogEntry, FuzzyRule};
pub use config::{CampaignConfig, EnvConfig};
pub use error::{PracharError, Result};
pub use generation::{
    parse_captions, BrandRetriever, CaptionGenerator, FailureKind, FallbackNote, GenerationPhase,
    ImageGenerator, LiveOutcome, ObjectStore, RetryPolicy, TextSettings,
};
#[cfg(feature = "openai-client")]
pub use llm::{GenericHttpClient, HttpImageClient};
pub use llm::{DynImageModel, DynLlmClient, ImageModel, LlmClient, LlmRequest, LlmResponse, LocalEchoClient};
pub use matching::{CampaignMatch, ImageFallbackSelector, MatchPhase, Matcher};
pub use orchestrator::{CampaignOrchestrator, CampaignRecord, GenerateRequest, OrchestratorBuilder};
pub use planning::{extract_plan, CampaignPlanner, CreativeDirector, Planned};
pub use store::{CampaignStore, NoopCampaignStore};
#[cfg(feature = "memory-store")]
pub use store::MemoryCampaignStore;
#[cfg(feature = "redis-store")]
pub use store::RedisCampaignStore;
pub use utils::{logging, validation};
