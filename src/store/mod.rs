//! 活动记录存储
//!
//! 默认接线使用 `NoopCampaignStore`，不做任何持久化。

#[cfg(feature = "memory-store")]
use std::collections::HashMap;

use async_trait::async_trait;
#[cfg(feature = "memory-store")]
use parking_lot::RwLock;

use crate::error::Result;
use crate::orchestrator::CampaignRecord;

/// 活动记录存储 trait
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// 按 `campaign_id` 幂等写入
    async fn put(&self, record: &CampaignRecord) -> Result<()>;
    /// 按创建顺序返回某用户的全部记录
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<CampaignRecord>>;
}

/// 空实现：写入直接丢弃，查询总是为空
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCampaignStore;

#[async_trait]
impl CampaignStore for NoopCampaignStore {
    async fn put(&self, record: &CampaignRecord) -> Result<()> {
        tracing::debug!(campaign_id = %record.campaign_id, "noop store, record not persisted");
        Ok(())
    }

    async fn list_for_user(&self, _user_id: &str) -> Result<Vec<CampaignRecord>> {
        Ok(Vec::new())
    }
}

/// 内存存储实现
#[cfg(feature = "memory-store")]
#[derive(Default)]
pub struct MemoryCampaignStore {
    records: RwLock<HashMap<String, CampaignRecord>>,
    by_user: RwLock<HashMap<String, Vec<String>>>,
}

#[cfg(feature = "memory-store")]
impl MemoryCampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[cfg(feature = "memory-store")]
#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    async fn put(&self, record: &CampaignRecord) -> Result<()> {
        let previous = self
            .records
            .write()
            .insert(record.campaign_id.clone(), record.clone());
        if previous.is_none() {
            self.by_user
                .write()
                .entry(record.user_id.clone())
                .or_default()
                .push(record.campaign_id.clone());
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<CampaignRecord>> {
        let ids = self.by_user.read().get(user_id).cloned().unwrap_or_default();
        let records = self.records.read();
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }
}

#[cfg(feature = "redis-store")]
pub use redis_store::RedisCampaignStore;

#[cfg(feature = "redis-store")]
pub mod redis_store {
    use super::*;
    use crate::error::PracharError;
    use redis::AsyncCommands;

    /// 记录以 JSON 存在 `{prefix}:campaign:{id}`，用户索引为 `{prefix}:user:{user_id}` 列表
    pub struct RedisCampaignStore {
        client: redis::Client,
        prefix: String,
    }

    impl RedisCampaignStore {
        pub fn new(client: redis::Client, prefix: impl Into<String>) -> Self {
            Self {
                client,
                prefix: prefix.into(),
            }
        }

        pub fn open(url: &str, prefix: impl Into<String>) -> Result<Self> {
            let client = redis::Client::open(url).map_err(|e| PracharError::Store(e.to_string()))?;
            Ok(Self::new(client, prefix))
        }

        fn record_key(&self, campaign_id: &str) -> String {
            format!("{}:campaign:{}", self.prefix, campaign_id)
        }

        fn user_key(&self, user_id: &str) -> String {
            format!("{}:user:{}", self.prefix, user_id)
        }

        async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
            self.client
                .get_multiplexed_async_connection()
                .await
                .map_err(|e| PracharError::Store(e.to_string()))
        }
    }

    #[async_trait]
    impl CampaignStore for RedisCampaignStore {
        async fn put(&self, record: &CampaignRecord) -> Result<()> {
            let mut conn = self.connection().await?;
            let payload = serde_json::to_string(record)?;
            let created: bool = conn
                .set_nx(self.record_key(&record.campaign_id), &payload)
                .await
                .map_err(|e| PracharError::Store(e.to_string()))?;
            if created {
                let _: () = conn
                    .rpush(self.user_key(&record.user_id), &record.campaign_id)
                    .await
                    .map_err(|e| PracharError::Store(e.to_string()))?;
            } else {
                let _: () = conn
                    .set(self.record_key(&record.campaign_id), payload)
                    .await
                    .map_err(|e| PracharError::Store(e.to_string()))?;
            }
            Ok(())
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<CampaignRecord>> {
            let mut conn = self.connection().await?;
            let ids: Vec<String> = conn
                .lrange(self.user_key(user_id), 0, -1)
                .await
                .map_err(|e| PracharError::Store(e.to_string()))?;

            let mut records = Vec::with_capacity(ids.len());
            for id in ids {
                let raw: Option<String> = conn
                    .get(self.record_key(&id))
                    .await
                    .map_err(|e| PracharError::Store(e.to_string()))?;
                if let Some(raw) = raw {
                    records.push(serde_json::from_str(&raw)?);
                }
            }
            Ok(records)
        }
    }
}
