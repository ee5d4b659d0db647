use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::listing::Listable;
use crate::models::category::Category;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Skill {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    /// 0–100. The backend stores this as text, so numeric strings are
    /// accepted too.
    #[serde(default, deserialize_with = "deserialize_level")]
    pub level: u8,
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(parse_level(&raw))
}

pub fn parse_level(raw: &Value) -> u8 {
    let n = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() => n.clamp(0.0, 100.0).round() as u8,
        _ => 0,
    }
}

/// Label/colour shown on a skill card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTier {
    Expert,
    Advanced,
    Intermediate,
    Beginner,
    Learning,
}

impl SkillTier {
    pub fn for_level(level: u8) -> Self {
        match level {
            90..=u8::MAX => SkillTier::Expert,
            75..=89 => SkillTier::Advanced,
            60..=74 => SkillTier::Intermediate,
            40..=59 => SkillTier::Beginner,
            _ => SkillTier::Learning,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillTier::Expert => "Expert",
            SkillTier::Advanced => "Advanced",
            SkillTier::Intermediate => "Intermediate",
            SkillTier::Beginner => "Beginner",
            SkillTier::Learning => "Learning",
        }
    }

    /// Bootstrap contextual colour.
    pub fn color(&self) -> &'static str {
        match self {
            SkillTier::Expert => "success",
            SkillTier::Advanced => "primary",
            SkillTier::Intermediate => "info",
            SkillTier::Beginner => "warning",
            SkillTier::Learning => "secondary",
        }
    }
}

/// Section a skill is listed under on the skills page. Beginner and
/// Learning tiers share the last section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillGroup {
    Expert,
    Advanced,
    Intermediate,
    Learning,
}

impl SkillGroup {
    pub const ALL: [SkillGroup; 4] = [
        SkillGroup::Expert,
        SkillGroup::Advanced,
        SkillGroup::Intermediate,
        SkillGroup::Learning,
    ];

    pub fn for_level(level: u8) -> Self {
        match level {
            90..=u8::MAX => SkillGroup::Expert,
            75..=89 => SkillGroup::Advanced,
            60..=74 => SkillGroup::Intermediate,
            _ => SkillGroup::Learning,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            SkillGroup::Expert => "expert",
            SkillGroup::Advanced => "advanced",
            SkillGroup::Intermediate => "intermediate",
            SkillGroup::Learning => "learning",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|g| g.slug() == s)
    }

    pub fn heading(&self) -> &'static str {
        match self {
            SkillGroup::Expert => "Expert Level",
            SkillGroup::Advanced => "Advanced Level",
            SkillGroup::Intermediate => "Intermediate Level",
            SkillGroup::Learning => "Learning",
        }
    }

    /// (text colour, bootstrap icon)
    pub fn style(&self) -> (&'static str, &'static str) {
        match self {
            SkillGroup::Expert => ("text-success", "bi-star-fill"),
            SkillGroup::Advanced => ("text-primary", "bi-star"),
            SkillGroup::Intermediate => ("text-info", "bi-star-half"),
            SkillGroup::Learning => ("text-warning", "bi-star"),
        }
    }
}

impl Skill {
    pub fn tier(&self) -> SkillTier {
        SkillTier::for_level(self.level)
    }

    pub fn group(&self) -> SkillGroup {
        SkillGroup::for_level(self.level)
    }
}

impl Listable for Skill {
    fn matches(&self, filter: &str, _categories: &[Category]) -> bool {
        match SkillGroup::parse(filter) {
            Some(group) => self.group() == group,
            None => true,
        }
    }
}
