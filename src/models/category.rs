use serde::{Deserialize, Serialize};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn find_by_id(categories: &[Category], id: Option<i64>) -> Option<&Category> {
        let id = id?;
        categories.iter().find(|c| c.id == id)
    }

    /// Resolved display name, or "Uncategorized" when the reference dangles.
    pub fn name_for(categories: &[Category], id: Option<i64>) -> &str {
        Self::find_by_id(categories, id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    pub fn matches_name(&self, filter: &str) -> bool {
        self.name.to_lowercase() == filter.to_lowercase()
    }
}
