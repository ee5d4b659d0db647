use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::i18n::Language;
use crate::listing::PAGE_SIZE;
use crate::theme::Theme;

const DEFAULT_PATH: &str = "folio.toml";

/// Front-end settings. Rocket's own settings (address, port, ...) live in
/// `Rocket.toml` / `ROCKET_*` as usual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Backend API origin, e.g. `http://127.0.0.1:5000`.
    pub api_base: String,
    pub site_name: String,
    /// Items per page and per load-more step.
    pub page_size: usize,
    pub blog_excerpt_chars: usize,
    pub home_project_chars: usize,
    pub home_project_count: usize,
    pub default_language: Language,
    pub default_theme: Theme,
    /// chrono strftime pattern for card dates.
    pub date_format: String,
    /// IANA zone the dates are shown in.
    pub timezone: String,
    /// How long the contact success notice stays up.
    pub notice_hide_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: "http://127.0.0.1:5000".to_string(),
            site_name: "Portfolio".to_string(),
            page_size: PAGE_SIZE,
            blog_excerpt_chars: 150,
            home_project_chars: 120,
            home_project_count: 6,
            default_language: Language::Uz,
            default_theme: Theme::Light,
            date_format: "%B %-d, %Y".to_string(),
            timezone: "UTC".to_string(),
            notice_hide_ms: 5000,
        }
    }
}

impl Config {
    /// Load from `FOLIO_CONFIG` (or `folio.toml`), then apply env overrides.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, FolioError> {
        let path = std::env::var("FOLIO_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::load_from(Path::new(&path))?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config.normalized())
    }

    pub fn load_from(path: &Path) -> Result<Self, FolioError> {
        if !path.exists() {
            log::info!("[config] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| FolioError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, FolioError> {
        let config: Config =
            toml::from_str(content).map_err(|e| FolioError::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Overrides from the environment. Unparseable values are ignored with
    /// a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("FOLIO_API_BASE").filter(|v| !v.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        if let Some(raw) = lookup("FOLIO_DEFAULT_LANGUAGE") {
            match Language::parse(&raw) {
                Some(lang) => self.default_language = lang,
                None => log::warn!("[config] ignoring FOLIO_DEFAULT_LANGUAGE={}", raw),
            }
        }
        if let Some(raw) = lookup("FOLIO_DEFAULT_THEME") {
            match Theme::parse(&raw) {
                Some(theme) => self.default_theme = theme,
                None => log::warn!("[config] ignoring FOLIO_DEFAULT_THEME={}", raw),
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            log::warn!("[config] unknown timezone {}, using UTC", self.timezone);
            self.timezone = "UTC".to_string();
        }
        if !is_valid_date_format(&self.date_format) {
            let fallback = Config::default().date_format;
            log::warn!(
                "[config] bad date_format {:?}, using {:?}",
                self.date_format,
                fallback
            );
            self.date_format = fallback;
        }
        self
    }

    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

fn is_valid_date_format(fmt: &str) -> bool {
    StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            api_base = "http://api.local/"
            default_language = "en"
            page_size = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base, "http://api.local");
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.page_size, 1);
        assert_eq!(config.blog_excerpt_chars, 150);
        assert_eq!(config.default_theme, Theme::Light);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            Config::from_toml("page_size = \"six\""),
            Err(FolioError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "FOLIO_API_BASE" => Some("http://other:8000".to_string()),
            "FOLIO_DEFAULT_THEME" => Some("dark".to_string()),
            "FOLIO_DEFAULT_LANGUAGE" => Some("klingon".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base, "http://other:8000");
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.default_language, Language::Uz);
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/folio.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let config = Config::from_toml("timezone = \"Mars/Olympus\"").unwrap();
        assert_eq!(config.timezone, "UTC");
        let config = Config::from_toml("timezone = \"Asia/Tashkent\"").unwrap();
        assert_eq!(config.tz(), chrono_tz::Asia::Tashkent);
    }

    #[test]
    fn test_bad_date_format_falls_back() {
        let config = Config::from_toml("date_format = \"%Q %B\"").unwrap();
        assert_eq!(config.date_format, "%B %-d, %Y");
        let config = Config::from_toml("date_format = \"%d.%m.%Y\"").unwrap();
        assert_eq!(config.date_format, "%d.%m.%Y");
    }
}
