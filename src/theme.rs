//! Light/dark theme state.
//!
//! Resolution order for the initial theme: stored preference, then the
//! OS-reported colour scheme, then the configured default. While nothing is
//! stored the manager follows OS changes; an explicit [`ThemeManager::set_theme`]
//! persists the choice and OS changes are ignored from then on.

use std::sync::{Arc, Mutex, OnceLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::events::{Emitter, SubscriptionId};
use crate::prefs::Storage;

pub const THEME_KEY: &str = "theme";
/// Image service for cards without their own image.
pub const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/";
pub const THEME_ATTR: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Opacity of the sun/moon icons inside the toggle control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleIcons {
    pub sun: f32,
    pub moon: f32,
}

impl ToggleIcons {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => ToggleIcons { sun: 0.0, moon: 1.0 },
            Theme::Light => ToggleIcons { sun: 1.0, moon: 0.0 },
        }
    }
}

/// What the page shell reads when rendering: the `data-theme` attribute
/// value and the toggle icon state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentTheme {
    pub attr: Theme,
    pub icons: ToggleIcons,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeChanged {
    pub theme: Theme,
}

pub struct ThemeManager<S: Storage> {
    storage: S,
    theme: Theme,
    document: Option<DocumentTheme>,
    listeners: Emitter<ThemeChanged>,
}

impl<S: Storage> ThemeManager<S> {
    /// Resolve the initial theme. Nothing is applied or persisted until
    /// [`init`](Self::init).
    pub fn new(storage: S, system: Option<Theme>, default: Theme) -> Self {
        let stored = storage.get_item(THEME_KEY).and_then(|v| Theme::parse(&v));
        let theme = stored.or(system).unwrap_or(default);
        ThemeManager {
            storage,
            theme,
            document: None,
            listeners: Emitter::new(),
        }
    }

    /// Apply the resolved theme to the document and notify subscribers.
    /// The resolved value is not persisted, so OS tracking stays live.
    pub fn init(&mut self) {
        let theme = self.theme;
        self.apply(theme);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Document state; falls back to the resolved theme before `init`.
    pub fn document(&self) -> DocumentTheme {
        self.document.unwrap_or(DocumentTheme {
            attr: self.theme,
            icons: ToggleIcons::for_theme(self.theme),
        })
    }

    pub fn has_stored_preference(&self) -> bool {
        self.storage
            .get_item(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .is_some()
    }

    /// Explicit user choice.
    pub fn set_theme(&mut self, theme: Theme) {
        self.storage.set_item(THEME_KEY, theme.as_str());
        log::debug!("[theme] set to {}", theme.as_str());
        self.apply(theme);
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(next);
        next
    }

    /// OS colour scheme changed. Ignored once a preference is stored.
    pub fn on_system_change(&mut self, system: Theme) -> bool {
        if self.has_stored_preference() {
            return false;
        }
        self.apply(system);
        true
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeChanged) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn apply(&mut self, theme: Theme) {
        self.theme = theme;
        self.document = Some(DocumentTheme {
            attr: theme,
            icons: ToggleIcons::for_theme(theme),
        });
        self.listeners.emit(&ThemeChanged { theme });
    }
}

/// Background/foreground colour pair used in placeholder image URLs.
pub fn placeholder_palette(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Dark => ("1E293B", "F1F5F9"),
        Theme::Light => ("1E40AF", "FFFFFF"),
    }
}

/// Tracks the current theme for placeholder images. Attach it to a
/// [`ThemeManager`] and run rendered markup through [`apply`](Self::apply).
#[derive(Clone)]
pub struct PlaceholderTint {
    theme: Arc<Mutex<Option<Theme>>>,
}

impl PlaceholderTint {
    pub fn attach<S: Storage>(manager: &mut ThemeManager<S>) -> Self {
        let tint = PlaceholderTint {
            theme: Arc::new(Mutex::new(None)),
        };
        let slot = tint.theme.clone();
        manager.subscribe(move |event| {
            if let Ok(mut current) = slot.lock() {
                *current = Some(event.theme);
            }
        });
        tint
    }

    pub fn current(&self) -> Option<Theme> {
        self.theme.lock().ok().and_then(|t| *t)
    }

    /// Rewrite `src` attributes that point at placeholder images so their
    /// `/BG/FG` colour pair matches the current theme. No-op until the first
    /// theme event.
    pub fn apply(&self, html: &str) -> String {
        match self.current() {
            Some(theme) => retint_placeholders(html, theme),
            None => html.to_string(),
        }
    }
}

pub fn retint_placeholders(html: &str, theme: Theme) -> String {
    static SRC_RE: OnceLock<Regex> = OnceLock::new();
    let src_re = SRC_RE.get_or_init(|| {
        Regex::new(&format!(
            r#"src="{}(\d+x\d+)/[0-9A-Fa-f]{{6}}/[0-9A-Fa-f]{{6}}([?"])"#,
            regex::escape(PLACEHOLDER_BASE)
        ))
        .expect("static regex")
    });
    let (bg, fg) = placeholder_palette(theme);

    src_re
        .replace_all(html, |caps: &Captures| {
            format!(
                "src=\"{}{}/{}/{}{}",
                PLACEHOLDER_BASE, &caps[1], bg, fg, &caps[2]
            )
        })
        .into_owned()
}
