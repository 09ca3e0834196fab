//! 活动编排
//!
//! 请求流转：`Received -> (DemoShortcut | Planning) -> Assembled -> Responded`。
//! 非严格模式下，任何格式正确的请求都会得到完整的活动记录。

mod record;

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::timeout;

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{PracharError, Result};
use crate::generation::FailureKind;
use crate::matching::Matcher;
use crate::planning::{CampaignPlanner, Planned};
use crate::store::{CampaignStore, NoopCampaignStore};

pub use record::{CampaignRecord, CampaignStatus, GenerateRequest, MISSING_FIELDS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    Received,
    DemoShortcut,
    Planning,
    Assembled,
    Responded,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlowState::Received => "received",
            FlowState::DemoShortcut => "demo_shortcut",
            FlowState::Planning => "planning",
            FlowState::Assembled => "assembled",
            FlowState::Responded => "responded",
        })
    }
}

pub struct CampaignOrchestrator {
    matcher: Matcher,
    planner: Option<Arc<dyn CampaignPlanner>>,
    store: Arc<dyn CampaignStore>,
    demo_mode: bool,
    strict_mode: bool,
    planning_timeout: Duration,
}

impl CampaignOrchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// 处理一次生成请求
    ///
    /// 只有缺少 `goal`/`user_id` 会返回 `Validation` 错误；严格模式下上游失败返回
    /// `Upstream`，存储失败返回 `Store`。
    pub async fn handle(&self, request: &GenerateRequest) -> Result<CampaignRecord> {
        let (goal, user_id) = request.validate()?;
        tracing::info!(state = %FlowState::Received, user_id, goal, "campaign request");

        let (plan, captions, image_url) = if self.demo_mode {
            tracing::info!(state = %FlowState::DemoShortcut, "demo mode, serving catalog campaign");
            let entry = self.matcher.select_campaign(goal);
            (entry.plan.clone(), entry.captions.clone(), entry.image_url.clone())
        } else {
            tracing::info!(state = %FlowState::Planning, "running planner");
            let planned = self.plan_or_failover(goal, user_id).await?;
            (planned.plan, planned.captions, planned.image_url)
        };

        let record = CampaignRecord::assemble(user_id, goal, plan, captions, image_url);
        tracing::info!(state = %FlowState::Assembled, campaign_id = %record.campaign_id, "campaign assembled");

        if let Err(err) = self.store.put(&record).await {
            tracing::error!(class = err.class(), error = %err, campaign_id = %record.campaign_id, "failed to store campaign");
            if self.strict_mode {
                return Err(PracharError::Store(err.to_string()));
            }
        }

        tracing::info!(state = %FlowState::Responded, campaign_id = %record.campaign_id, "campaign ready");
        Ok(record)
    }

    pub async fn campaigns_for_user(&self, user_id: &str) -> Result<Vec<CampaignRecord>> {
        self.store.list_for_user(user_id).await
    }

    async fn plan_or_failover(&self, goal: &str, user_id: &str) -> Result<Planned> {
        let outcome = match &self.planner {
            Some(planner) => self.run_planner(planner.as_ref(), goal, user_id).await,
            None => Err(PracharError::Config("no planner configured".into())),
        };

        match outcome {
            Ok(planned) if planned.fallbacks.is_empty() || !self.strict_mode => Ok(planned),
            Ok(planned) => {
                let phases: Vec<String> = planned
                    .fallbacks
                    .iter()
                    .map(|note| format!("{}:{}", note.phase, note.kind))
                    .collect();
                Err(PracharError::upstream("planner", format!("fallbacks applied: {}", phases.join(", "))))
            }
            Err(err) => {
                let kind = FailureKind::from(&err);
                tracing::warn!(
                    phase = "planning",
                    class = err.class(),
                    kind = %kind,
                    error = %err,
                    "planning failed"
                );
                if self.strict_mode {
                    return Err(PracharError::upstream("planner", err.to_string()));
                }
                tracing::info!(phase = "planning", "total failover to catalog campaign");
                Ok(failover(self.matcher.select_campaign(goal)))
            }
        }
    }

    /// 在超时与 panic 保护下运行策划
    async fn run_planner(&self, planner: &dyn CampaignPlanner, goal: &str, user_id: &str) -> Result<Planned> {
        let guarded = AssertUnwindSafe(planner.plan(goal, user_id)).catch_unwind();
        match timeout(self.planning_timeout, guarded).await {
            Err(_) => Err(PracharError::Timeout {
                phase: "planning".into(),
                secs: self.planning_timeout.as_secs(),
            }),
            Ok(Err(panic)) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(PracharError::Other(anyhow::anyhow!("planner panicked: {message}")))
            }
            Ok(Ok(result)) => result,
        }
    }
}

fn failover(entry: &CatalogEntry) -> Planned {
    Planned {
        plan: entry.plan.clone(),
        captions: entry.captions.clone(),
        image_url: entry.image_url.clone(),
        fallbacks: Vec::new(),
    }
}

/// 编排器装配
pub struct OrchestratorBuilder {
    catalog: Arc<Catalog>,
    planner: Option<Arc<dyn CampaignPlanner>>,
    store: Arc<dyn CampaignStore>,
    demo_mode: bool,
    strict_mode: bool,
    planning_timeout: Duration,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self {
            catalog: Catalog::builtin(),
            planner: None,
            store: Arc::new(NoopCampaignStore),
            demo_mode: true,
            strict_mode: false,
            planning_timeout: Duration::from_secs(120),
        }
    }
}

impl OrchestratorBuilder {
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn planner(mut self, planner: Arc<dyn CampaignPlanner>) -> Self {
        self.planner = Some(planner);
        self
    }

    pub fn store(mut self, store: Arc<dyn CampaignStore>) -> Self {
        self.store = store;
        self
    }

    pub fn demo_mode(mut self, enabled: bool) -> Self {
        self.demo_mode = enabled;
        self
    }

    pub fn strict_mode(mut self, enabled: bool) -> Self {
        self.strict_mode = enabled;
        self
    }

    pub fn planning_timeout(mut self, limit: Duration) -> Self {
        self.planning_timeout = limit;
        self
    }

    pub fn build(self) -> CampaignOrchestrator {
        CampaignOrchestrator {
            matcher: Matcher::new(self.catalog),
            planner: self.planner,
            store: self.store,
            demo_mode: self.demo_mode,
            strict_mode: self.strict_mode,
            planning_timeout: self.planning_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CampaignPlan;
    use async_trait::async_trait;

    struct PanickingPlanner;

    #[async_trait]
    impl CampaignPlanner for PanickingPlanner {
        async fn plan(&self, _goal: &str, _user_id: &str) -> Result<Planned> {
            panic!("planner exploded");
        }
    }

    struct SlowPlanner;

    #[async_trait]
    impl CampaignPlanner for SlowPlanner {
        async fn plan(&self, _goal: &str, _user_id: &str) -> Result<Planned> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Planned {
                plan: CampaignPlan::new("h", "o", "c"),
                captions: ["a".into(), "b".into(), "c".into()],
                image_url: "https://example.com/a.png".into(),
                fallbacks: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let orchestrator = CampaignOrchestrator::builder().build();
        let err = orchestrator
            .handle(&GenerateRequest { goal: Some("x".into()), user_id: None })
            .await
            .unwrap_err();
        assert!(matches!(err, PracharError::Validation(ref m) if m == MISSING_FIELDS));
    }

    #[tokio::test]
    async fn panic_in_planner_is_masked() {
        let orchestrator = CampaignOrchestrator::builder()
            .demo_mode(false)
            .planner(Arc::new(PanickingPlanner))
            .build();
        let record = orchestrator
            .handle(&GenerateRequest::new("drone racing league", "u1"))
            .await
            .unwrap();
        let entry = orchestrator.matcher().select_campaign("drone racing league");
        assert_eq!(record.plan, entry.plan);
        assert_eq!(record.image_url, entry.image_url);
    }

    #[tokio::test]
    async fn planning_timeout_fails_over() {
        let orchestrator = CampaignOrchestrator::builder()
            .demo_mode(false)
            .planner(Arc::new(SlowPlanner))
            .planning_timeout(Duration::from_millis(20))
            .build();
        let record = orchestrator
            .handle(&GenerateRequest::new("zzz_no_match_xyz", "u1"))
            .await
            .unwrap();
        assert_eq!(record.plan, orchestrator.matcher().catalog().generic().plan);
    }

    #[tokio::test]
    async fn strict_mode_surfaces_missing_planner() {
        let orchestrator = CampaignOrchestrator::builder()
            .demo_mode(false)
            .strict_mode(true)
            .build();
        let err = orchestrator
            .handle(&GenerateRequest::new("tech fest", "u1"))
            .await
            .unwrap_err();
        assert_eq!(err.class(), "upstream");
    }
}
