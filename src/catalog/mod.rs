//! 活动目录
//!
//! 预先编写好的活动样例（钩子/优惠/行动号召 + 三条文案 + 配图），
//! 进程启动时构建一次，之后只读共享。

mod builtin;

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{PracharError, Result};

pub use builtin::GENERIC_KEY;

/// 三条文案，类型层面保证数量
pub type Captions = [String; 3];

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| {
    Arc::new(Catalog {
        entries: builtin::entries(),
        rules: builtin::fuzzy_rules(),
        generic_key: GENERIC_KEY.to_string(),
    })
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPlan {
    pub hook: String,
    pub offer: String,
    pub cta: String,
}

impl CampaignPlan {
    pub fn new(hook: impl Into<String>, offer: impl Into<String>, cta: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            offer: offer.into(),
            cta: cta.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub plan: CampaignPlan,
    pub captions: Captions,
    pub image_url: String,
}

/// 触发词（小写子串）到目录键的映射
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyRule {
    pub trigger: String,
    pub target: String,
}

impl FuzzyRule {
    pub fn new(trigger: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    rules: Vec<FuzzyRule>,
    generic_key: String,
}

impl Catalog {
    /// 构建并校验目录
    pub fn new(
        entries: Vec<CatalogEntry>,
        rules: Vec<FuzzyRule>,
        generic_key: impl Into<String>,
    ) -> Result<Self> {
        let catalog = Self {
            entries,
            rules,
            generic_key: generic_key.into(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// 内置目录，全进程共享一份
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// 校验目录不变量：
    /// - 键为小写且唯一
    /// - 通用条目存在
    /// - 每条规则都指向已存在的键
    /// - 配图为 https 地址
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            if entry.key.is_empty() || entry.key != entry.key.to_lowercase() {
                return Err(PracharError::Config(format!(
                    "catalog key `{}` must be non-empty lowercase text",
                    entry.key
                )));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(PracharError::Config(format!(
                    "duplicate catalog key `{}`",
                    entry.key
                )));
            }
            if !entry.image_url.starts_with("https://") {
                return Err(PracharError::Config(format!(
                    "catalog entry `{}` has non-https image url",
                    entry.key
                )));
            }
        }

        if self.get(&self.generic_key).is_none() {
            return Err(PracharError::Config(format!(
                "generic catalog key `{}` is missing",
                self.generic_key
            )));
        }

        for rule in &self.rules {
            if rule.trigger != rule.trigger.to_lowercase() {
                return Err(PracharError::Config(format!(
                    "fuzzy trigger `{}` must be lowercase",
                    rule.trigger
                )));
            }
            if self.get(&rule.target).is_none() {
                return Err(PracharError::Config(format!(
                    "fuzzy rule `{}` points to unknown key `{}`",
                    rule.trigger, rule.target
                )));
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn generic(&self) -> &CatalogEntry {
        // validate() 保证通用条目存在；万一被绕过，退到最后一条
        self.get(&self.generic_key)
            .or_else(|| self.entries.last())
            .unwrap_or_else(|| &BUILTIN.entries[BUILTIN.entries.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.generic().key, GENERIC_KEY);
    }

    #[test]
    fn every_rule_target_exists() {
        let catalog = Catalog::builtin();
        for rule in catalog.rules() {
            assert!(catalog.get(&rule.target).is_some(), "{}", rule.trigger);
        }
    }

    #[test]
    fn rejects_rule_to_missing_key() {
        let generic = Catalog::builtin().generic().clone();
        let result = Catalog::new(
            vec![generic],
            vec![FuzzyRule::new("robot", "kiit robotics")],
            GENERIC_KEY,
        );
        assert!(matches!(result, Err(PracharError::Config(_))));
    }

    #[test]
    fn rejects_missing_generic_entry() {
        let mut entry = Catalog::builtin().generic().clone();
        entry.key = "tech fest".into();
        let result = Catalog::new(vec![entry], vec![], GENERIC_KEY);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_uppercase_key() {
        let mut entry = Catalog::builtin().generic().clone();
        entry.key = "Generic".into();
        assert!(Catalog::new(vec![entry], vec![], "Generic").is_err());
    }
}
