//! Item → view model → markup, one module per content type.

pub mod blog;
pub mod contact;
pub mod home;
pub mod project;
pub mod repo;
pub mod skill;

use crate::config::Config;
use crate::render::{alert_with_retry, format_date, html_escape, section_header, AlertKind};
use crate::error::FolioError;
use crate::listing::LoadState;

/// How card dates are shown.
#[derive(Debug, Clone)]
pub struct DateStyle {
    pub format: String,
    pub tz: chrono_tz::Tz,
}

impl DateStyle {
    pub fn from_config(config: &Config) -> Self {
        DateStyle {
            format: config.date_format.clone(),
            tz: config.tz(),
        }
    }

    pub fn render(&self, raw: Option<&str>) -> String {
        match raw {
            Some(raw) if !raw.trim().is_empty() => format_date(raw, &self.format, self.tz),
            _ => String::new(),
        }
    }
}

impl Default for DateStyle {
    fn default() -> Self {
        DateStyle::from_config(&Config::default())
    }
}

/// Messages a list page shows for its non-ready states.
pub struct ListMessages {
    pub failed: &'static str,
    pub empty: &'static str,
    pub no_match: &'static str,
}

/// Alert for a load that didn't produce cards, or `None` when there is
/// something to render.
pub fn state_alert(state: &LoadState, messages: &ListMessages, retry_href: &str) -> Option<String> {
    match state {
        LoadState::Failed(e) => Some(failure_alert(messages.failed, e, retry_href)),
        LoadState::Empty => Some(crate::render::alert(AlertKind::Warning, messages.empty)),
        LoadState::Idle | LoadState::Loading => Some(loading_placeholder()),
        LoadState::Ready => None,
    }
}

pub fn failure_alert(message: &str, err: &FolioError, retry_href: &str) -> String {
    alert_with_retry(message, &err.to_string(), retry_href)
}

pub fn loading_placeholder() -> String {
    r#"<div class="col-12 text-center">
    <div class="spinner-border text-primary" role="status">
        <span class="visually-hidden">Loading...</span>
    </div>
</div>"#
        .to_string()
}

/// A page section with a translatable header and a card row.
pub fn section(id: &str, key: &str, title: &str, description: &str, inner: &str) -> String {
    format!(
        r#"<section id="{id}" class="py-5">
<div class="container">
{header}
{inner}
</div>
</section>"#,
        id = html_escape(id),
        header = section_header(key, title, description),
        inner = inner,
    )
}

pub fn row(cards: &str) -> String {
    format!(r#"<div class="row g-4">{}</div>"#, cards)
}
