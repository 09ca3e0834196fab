//! 目标匹配
//!
//! `Matcher` 把自由文本目标映射到目录条目；`ImageFallbackSelector`
//! 按关键词类别挑选占位配图。两者互相独立，都是全函数，不会失败。

mod image;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, CatalogEntry};

pub use self::image::{ImageCategory, ImageFallbackSelector, GENERIC_IMAGE_URL};

/// 命中阶段
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "via", rename_all = "lowercase")]
pub enum MatchPhase {
    /// 目录键本身是目标的子串
    Exact(String),
    /// 某条模糊规则的触发词是目标的子串
    Fuzzy(String),
    Default,
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPhase::Exact(key) => write!(f, "exact({key})"),
            MatchPhase::Fuzzy(trigger) => write!(f, "fuzzy({trigger})"),
            MatchPhase::Default => f.write_str("default"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CampaignMatch<'a> {
    pub entry: &'a CatalogEntry,
    pub phase: MatchPhase,
}

#[derive(Clone, Debug)]
pub struct Matcher {
    catalog: Arc<Catalog>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl Matcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// 为目标挑选目录条目
    pub fn select_campaign(&self, goal: &str) -> &CatalogEntry {
        self.select_with_phase(goal).entry
    }

    /// 同 `select_campaign`，额外返回命中阶段
    ///
    /// 只做小写化，不做其他归一化；子串检查是字面匹配。
    pub fn select_with_phase(&self, goal: &str) -> CampaignMatch<'_> {
        let goal = goal.to_lowercase();

        if let Some(entry) = self
            .catalog
            .entries()
            .iter()
            .find(|entry| goal.contains(entry.key.as_str()))
        {
            return CampaignMatch {
                entry,
                phase: MatchPhase::Exact(entry.key.clone()),
            };
        }

        for rule in self.catalog.rules() {
            if goal.contains(rule.trigger.as_str()) {
                if let Some(entry) = self.catalog.get(&rule.target) {
                    return CampaignMatch {
                        entry,
                        phase: MatchPhase::Fuzzy(rule.trigger.clone()),
                    };
                }
            }
        }

        CampaignMatch {
            entry: self.catalog.generic(),
            phase: MatchPhase::Default,
        }
    }
}
