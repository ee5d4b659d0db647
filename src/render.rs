//! Markup helpers and the page shell every route renders into.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::i18n::Language;
use crate::theme::DocumentTheme;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn url_encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Cut `text` to `limit` characters, trim what's left and add `...`.
/// Text within limit comes back unchanged.
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

/// Render a backend timestamp with `fmt` in `tz`. Anything we can't parse,
/// or can't format with `fmt`, is shown as-is.
pub fn format_date(raw: &str, fmt: &str, tz: chrono_tz::Tz) -> String {
    let raw = raw.trim();
    let parsed: Option<DateTime<Utc>> = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .or_else(|| {
            DateTime::parse_from_rfc2822(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        });

    let Some(dt) = parsed else {
        return raw.to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", dt.with_timezone(&tz).format(fmt)) {
        Ok(()) => out,
        Err(_) => {
            log::warn!("[render] bad date format {:?}", fmt);
            raw.to_string()
        }
    }
}

/// Build `path?k=v&...`, skipping empty values.
pub fn query_href(path: &str, params: &[(&str, &str)]) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (k, v) in params {
        if v.is_empty() {
            continue;
        }
        ser.append_pair(k, v);
        any = true;
    }
    if any {
        format!("{}?{}", path, ser.finish())
    } else {
        path.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Danger,
    Warning,
    Info,
    Success,
}

impl AlertKind {
    fn class(&self) -> &'static str {
        match self {
            AlertKind::Danger => "alert-danger",
            AlertKind::Warning => "alert-warning",
            AlertKind::Info => "alert-info",
            AlertKind::Success => "alert-success",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            AlertKind::Danger | AlertKind::Warning => "bi-exclamation-triangle",
            AlertKind::Info => "bi-info-circle",
            AlertKind::Success => "bi-check-circle",
        }
    }
}

/// Full-width alert in place of a card grid.
pub fn alert(kind: AlertKind, message: &str) -> String {
    format!(
        r#"<div class="col-12 text-center">
    <div class="alert {class}">
        <i class="bi {icon}"></i>
        {message}
    </div>
</div>"#,
        class = kind.class(),
        icon = kind.icon(),
        message = html_escape(message),
    )
}

/// Danger alert with a detail line and a link that re-issues the load.
pub fn alert_with_retry(title: &str, detail: &str, retry_href: &str) -> String {
    format!(
        r#"<div class="col-12 text-center">
    <div class="alert alert-danger">
        <i class="bi bi-exclamation-triangle"></i>
        <strong>{title}</strong><br>
        <small class="text-muted">{detail}</small>
        <div class="mt-3">
            <a class="btn btn-outline-primary btn-sm" href="{href}">
                <i class="bi bi-arrow-clockwise"></i>
                Try Again
            </a>
        </div>
    </div>
</div>"#,
        title = html_escape(title),
        detail = html_escape(detail),
        href = html_escape(retry_href),
    )
}

pub fn load_more_button(href: &str) -> String {
    format!(
        r#"<div class="text-center mt-4">
    <a id="loadMoreBtn" class="btn btn-outline-primary" href="{}">
        <i class="bi bi-plus-circle me-1"></i>
        Load More
    </a>
</div>"#,
        html_escape(href)
    )
}

/// Everything the shell needs besides the body.
pub struct PageContext<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub language: Language,
    pub theme: DocumentTheme,
    /// Request path plus query, used as the `next` target of the
    /// theme and language controls.
    pub location: &'a str,
    /// Nav key (`home`, `blog`, ...) to mark active.
    pub active: &'a str,
}

const NAV: [(&str, &str); 6] = [
    ("home", "/"),
    ("blog", "/blog"),
    ("projects", "/projects"),
    ("skills", "/skills"),
    ("about", "/#about"),
    ("contact", "/contact"),
];

fn build_nav(ctx: &PageContext) -> String {
    let mut html = String::from(r#"<ul class="navbar-nav ms-auto">"#);
    for (key, href) in NAV {
        let active = if key == ctx.active { " active" } else { "" };
        let label = crate::i18n::t(ctx.language, &format!("nav.{}", key)).unwrap_or(key);
        html.push_str(&format!(
            r#"<li class="nav-item"><a class="nav-link{}" href="{}" data-lang="nav.{}">{}</a></li>"#,
            active,
            href,
            key,
            html_escape(label)
        ));
    }
    html.push_str("</ul>");
    html
}

fn build_theme_toggle(ctx: &PageContext) -> String {
    let next = url_encode(ctx.location);
    format!(
        r#"<a id="themeToggle" class="btn btn-link theme-toggle" href="/theme/toggle?next={next}" aria-label="Toggle theme">
    <i class="bi bi-sun-fill" style="opacity: {sun}"></i>
    <i class="bi bi-moon-fill" style="opacity: {moon}"></i>
</a>"#,
        next = next,
        sun = ctx.theme.icons.sun,
        moon = ctx.theme.icons.moon,
    )
}

fn build_language_selector(ctx: &PageContext) -> String {
    let next = url_encode(ctx.location);
    let mut options = String::new();
    for lang in Language::ALL {
        let active = lang == ctx.language;
        options.push_str(&format!(
            r#"<li><a class="dropdown-item{cls}" role="menuitemradio" aria-checked="{checked}" data-language-option="{code}" href="/lang/{code}?next={next}">{name}</a></li>"#,
            cls = if active { " active" } else { "" },
            checked = active,
            code = lang.code(),
            next = next,
            name = html_escape(lang.native_name()),
        ));
    }
    format!(
        r#"<div class="language-selector dropdown">
    <button class="btn btn-link dropdown-toggle" type="button" data-bs-toggle="dropdown" aria-expanded="false">
        <i class="bi bi-translate"></i> <span class="current-language">{label}</span>
    </button>
    <ul class="dropdown-menu dropdown-menu-end" role="menu">{options}</ul>
</div>"#,
        label = ctx.language.label(),
        options = options,
    )
}

/// Wrap `body` in the site shell. Translation of `data-lang` nodes happens
/// afterwards, on the whole document.
pub fn render_page(ctx: &PageContext, body: &str) -> String {
    let site = html_escape(ctx.site_name);
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" {attr}="{theme}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css">
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.1/font/bootstrap-icons.css">
</head>
<body>
<nav class="navbar navbar-expand-lg sticky-top">
<div class="container">
    <a class="navbar-brand" href="/">{site}</a>
    {nav}
    <div class="d-flex align-items-center gap-2">
    {toggle}
    {languages}
    </div>
</div>
</nav>
<main>
{body}
</main>
<footer class="footer py-4 text-center">
    <span>&copy; {site}.</span> <span data-lang="footer.copyright">All rights reserved.</span>
</footer>
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>"#,
        lang = ctx.language.code(),
        attr = crate::theme::THEME_ATTR,
        theme = ctx.theme.attr.as_str(),
        title = html_escape(ctx.title),
        site = site,
        nav = build_nav(ctx),
        toggle = build_theme_toggle(ctx),
        languages = build_language_selector(ctx),
        body = body,
    )
}

/// Section heading with translatable title and description.
pub fn section_header(key: &str, title: &str, description: &str) -> String {
    format!(
        r#"<div class="text-center mb-5">
    <h2 class="section-title" data-lang="{key}.title">{title}</h2>
    <p class="section-subtitle text-muted" data-lang="{key}.description">{description}</p>
</div>"#,
        key = key,
        title = html_escape(title),
        description = html_escape(description),
    )
}

pub fn render_404() -> String {
    r#"<section class="py-5"><div class="container text-center error-page">
    <h1>404</h1>
    <p>Page not found.</p>
    <a href="/">&larr; Back to home</a>
</div></section>"#
        .to_string()
}

pub fn render_500() -> String {
    r#"<section class="py-5"><div class="container text-center error-page">
    <h1>500</h1>
    <p>Internal server error.</p>
    <a href="/">&larr; Back to home</a>
</div></section>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeManager};
    use crate::prefs::MemoryStorage;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_text("short", 150), "short");
        let exact = "a".repeat(150);
        assert_eq!(truncate_text(&exact, 150), exact);
    }

    #[test]
    fn test_truncate_trims_before_ellipsis() {
        let text = "Hello world this is long";
        // first 6 chars: "Hello " -> "Hello"
        assert_eq!(truncate_text(text, 6), "Hello...");
        let long = "x".repeat(400);
        let out = truncate_text(&long, 150);
        assert!(out.chars().count() <= 153);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "o'zbekcha ".repeat(30);
        let out = truncate_text(&text, 5);
        assert_eq!(out, "o'zbe...");
        let cyr = "Ўзбекистон";
        assert_eq!(truncate_text(cyr, 3), "Ўзб...");
    }

    #[test]
    fn test_format_date_variants() {
        let tz = chrono_tz::UTC;
        let fmt = "%B %-d, %Y";
        assert_eq!(format_date("2024-01-05T10:30:00", fmt, tz), "January 5, 2024");
        assert_eq!(format_date("2024-01-05T10:30:00.123456", fmt, tz), "January 5, 2024");
        assert_eq!(format_date("2024-01-05T23:30:00+00:00", fmt, tz), "January 5, 2024");
        assert_eq!(format_date("2024-01-05", fmt, tz), "January 5, 2024");
        assert_eq!(format_date("not a date", fmt, tz), "not a date");
    }

    #[test]
    fn test_format_date_applies_timezone() {
        let out = format_date("2024-01-05T22:00:00", "%Y-%m-%d", chrono_tz::Asia::Tashkent);
        assert_eq!(out, "2024-01-06");
    }

    #[test]
    fn test_format_date_bad_pattern_shows_raw() {
        let out = format_date("2024-01-05T10:00:00", "%Q %B", chrono_tz::UTC);
        assert_eq!(out, "2024-01-05T10:00:00");
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_query_href_skips_empty() {
        assert_eq!(query_href("/blog", &[("category", ""), ("shown", "")]), "/blog");
        assert_eq!(
            query_href("/blog", &[("category", "Rust & Go"), ("shown", "12")]),
            "/blog?category=Rust+%26+Go&shown=12"
        );
    }

    #[test]
    fn test_alert_escapes_message() {
        let html = alert(AlertKind::Info, "<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("alert-info"));
        assert!(html.contains("bi-info-circle"));
    }

    #[test]
    fn test_shell_reflects_theme_and_language() {
        let mut manager = ThemeManager::new(MemoryStorage::new(), None, Theme::Dark);
        manager.init();
        let ctx = PageContext {
            site_name: "Folio",
            title: "Blog",
            language: Language::En,
            theme: manager.document(),
            location: "/blog?category=Rust",
            active: "blog",
        };
        let html = render_page(&ctx, "<p>body</p>");
        assert!(html.contains(r#"<html lang="en" data-theme="dark">"#));
        assert!(html.contains(r#"class="bi bi-moon-fill" style="opacity: 1""#));
        assert!(html.contains(r#"class="bi bi-sun-fill" style="opacity: 0""#));
        assert!(html.contains(r#"<span class="current-language">EN</span>"#));
        assert!(html.contains(r#"aria-checked="true" data-language-option="en""#));
        assert!(html.contains(r#"aria-checked="false" data-language-option="uz""#));
        assert!(html.contains("/theme/toggle?next=%2Fblog%3Fcategory%3DRust"));
        assert!(html.contains(r#"class="nav-link active" href="/blog""#));
    }
}
