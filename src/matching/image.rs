use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

pub const GENERIC_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1540575467063-178a50c2df87?w=1024&h=1024&fit=crop";

static BUILTIN_CATEGORIES: Lazy<Arc<Vec<ImageCategory>>> = Lazy::new(|| {
    Arc::new(vec![
        ImageCategory::new(
            "robotics",
            &["robot", "tech", "hack"],
            "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=1024&h=1024&fit=crop",
        ),
        ImageCategory::new(
            "coding",
            &["python", "ai", "code", "neural", "automation", "ml", "machine learning"],
            "https://images.unsplash.com/photo-1515879218367-8466d910aaa4?w=1024&h=1024&fit=crop",
        ),
        ImageCategory::new(
            "drone",
            &["drone", "fly", "racing"],
            "https://images.unsplash.com/photo-1473968512647-3e447244af8f?w=1024&h=1024&fit=crop",
        ),
        ImageCategory::new(
            "culture",
            &["cultural", "music", "dance", "fest"],
            "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?w=1024&h=1024&fit=crop",
        ),
        ImageCategory::new(
            "sports",
            &["sport", "fitness", "game"],
            "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?w=1024&h=1024&fit=crop",
        ),
        ImageCategory::new(
            "web",
            &["web", "website", "design"],
            "https://images.unsplash.com/photo-1547658719-da2b51169166?w=1024&h=1024&fit=crop",
        ),
    ])
});

/// 配图类别：任一触发词命中即返回该类配图
#[derive(Clone, Debug, Serialize)]
pub struct ImageCategory {
    pub name: String,
    pub triggers: Vec<String>,
    pub image_url: String,
}

impl ImageCategory {
    pub fn new(name: &str, triggers: &[&str], image_url: &str) -> Self {
        Self {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            image_url: image_url.to_string(),
        }
    }

    fn matches(&self, goal: &str) -> bool {
        self.triggers.iter().any(|t| goal.contains(t.as_str()))
    }
}

/// 占位配图选择器，和目录匹配相互独立（类别粒度更粗）
#[derive(Clone, Debug)]
pub struct ImageFallbackSelector {
    categories: Arc<Vec<ImageCategory>>,
    generic_url: String,
}

impl Default for ImageFallbackSelector {
    fn default() -> Self {
        Self {
            categories: Arc::clone(&BUILTIN_CATEGORIES),
            generic_url: GENERIC_IMAGE_URL.to_string(),
        }
    }
}

impl ImageFallbackSelector {
    pub fn new(categories: Vec<ImageCategory>, generic_url: impl Into<String>) -> Self {
        Self {
            categories: Arc::new(categories),
            generic_url: generic_url.into(),
        }
    }

    pub fn categories(&self) -> &[ImageCategory] {
        &self.categories
    }

    pub fn select_fallback_image(&self, goal: &str) -> &str {
        self.select_category(goal)
            .map(|category| category.image_url.as_str())
            .unwrap_or(self.generic_url.as_str())
    }

    pub fn select_category(&self, goal: &str) -> Option<&ImageCategory> {
        let goal = goal.to_lowercase();
        self.categories.iter().find(|category| category.matches(&goal))
    }
}
