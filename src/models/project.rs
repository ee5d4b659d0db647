use serde::{Deserialize, Serialize};

use crate::listing::Listable;
use crate::models::category::Category;

/// Filter value → keywords searched for in the lower-cased tech stack.
pub const FILTER_KEYWORDS: &[(&str, &[&str])] = &[
    ("web", &["html", "css", "javascript", "react", "vue", "angular"]),
    ("api", &["python", "flask", "django", "node", "express", "fastapi"]),
    ("mobile", &["react native", "flutter", "ionic", "mobile", "pwa"]),
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Project {
    /// Comma-separated stack split into trimmed, non-empty tags.
    pub fn tech_tags(&self) -> Vec<&str> {
        self.tech_stack
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl Listable for Project {
    fn matches(&self, filter: &str, _categories: &[Category]) -> bool {
        let tech = self.tech_stack.as_deref().unwrap_or("").to_lowercase();
        let filter = filter.to_lowercase();
        match FILTER_KEYWORDS.iter().find(|(name, _)| *name == filter) {
            Some((_, keywords)) => keywords.iter().any(|k| tech.contains(k)),
            None => true,
        }
    }
}
