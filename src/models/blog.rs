use serde::{Deserialize, Serialize};

use crate::listing::Listable;
use crate::models::category::Category;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlogImage {
    pub image_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Filled in by the backend on the detail endpoint.
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub images: Vec<BlogImage>,
}

impl Listable for Blog {
    /// Case-insensitive match on the resolved category name. A blog whose
    /// category cannot be resolved never matches a specific category.
    fn matches(&self, filter: &str, categories: &[Category]) -> bool {
        match Category::find_by_id(categories, self.category_id) {
            Some(category) => category.matches_name(filter),
            None => false,
        }
    }
}
