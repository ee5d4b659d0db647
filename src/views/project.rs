use crate::binder::{load_more_control, FilterBar};
use crate::listing::ListController;
use crate::models::project::Project;
use crate::render::{alert, html_escape, truncate_text, AlertKind};
use crate::theme::{placeholder_palette, Theme, PLACEHOLDER_BASE};
use crate::views::{row, state_alert, DateStyle, ListMessages};

pub const MESSAGES: ListMessages = ListMessages {
    failed: "Failed to load projects. Please try again later.",
    empty: "No projects found. Add some projects through the admin panel to get started.",
    no_match: "No projects found for the selected filter. Try a different category or add some projects through the admin panel.",
};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub title: String,
    pub date: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub github_link: Option<String>,
    pub demo_link: Option<String>,
}

impl ProjectCard {
    /// `limit` truncates the description; `None` keeps it whole.
    pub fn build(project: &Project, limit: Option<usize>, dates: &DateStyle) -> Self {
        let description = match limit {
            Some(n) => truncate_text(&project.description, n),
            None => project.description.clone(),
        };
        let non_empty = |s: &Option<String>| s.clone().filter(|v| !v.trim().is_empty());
        ProjectCard {
            title: project.title.clone(),
            date: dates.render(project.created_at.as_deref()),
            description,
            tags: project.tech_tags().into_iter().map(str::to_string).collect(),
            image_url: non_empty(&project.image_url),
            github_link: non_empty(&project.github_link),
            demo_link: non_empty(&project.demo_link),
        }
    }
}

/// Placeholder image for cards without one, coloured for `theme`.
pub fn placeholder_image(title: &str, theme: Theme) -> String {
    let (bg, fg) = placeholder_palette(theme);
    format!(
        "{}600x360/{}/{}?text={}",
        PLACEHOLDER_BASE,
        bg,
        fg,
        crate::render::url_encode(title)
    )
}

pub fn render_tech_badges(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!(r#"<span class="tech-badge">{}</span>"#, html_escape(t)))
        .collect()
}

pub fn render_project_card(card: &ProjectCard, theme: Theme) -> String {
    let image = card
        .image_url
        .clone()
        .unwrap_or_else(|| placeholder_image(&card.title, theme));
    let mut links = String::new();
    if let Some(href) = &card.github_link {
        links.push_str(&format!(
            r#"<a class="btn btn-sm btn-outline-primary" href="{}" target="_blank" rel="noopener"><i class="bi bi-github"></i> Code</a>"#,
            html_escape(href)
        ));
    }
    if let Some(href) = &card.demo_link {
        links.push_str(&format!(
            r#"<a class="btn btn-sm btn-accent" href="{}" target="_blank" rel="noopener"><i class="bi bi-box-arrow-up-right"></i> Demo</a>"#,
            html_escape(href)
        ));
    }
    let date = if card.date.is_empty() {
        String::new()
    } else {
        format!(r#"<small class="text-muted">{}</small>"#, html_escape(&card.date))
    };
    format!(
        r#"<div class="col-lg-4 col-md-6">
    <div class="card project-card h-100 hover-lift">
        <img src="{image}" alt="{title}" class="card-img-top" style="object-fit: cover; height: 180px;">
        <div class="card-body d-flex flex-column">
            <div class="d-flex justify-content-between align-items-start mb-2">
                <h5 class="card-title">{title}</h5>
                {date}
            </div>
            <p class="card-text">{description}</p>
            <div class="project-tech mb-3">{badges}</div>
            <div class="project-links mt-auto">{links}</div>
        </div>
    </div>
</div>"#,
        image = html_escape(&image),
        title = html_escape(&card.title),
        date = date,
        description = html_escape(&card.description),
        badges = render_tech_badges(&card.tags),
        links = links,
    )
}

pub fn render_project_list(
    ctl: &ListController<Project>,
    bar: &FilterBar,
    dates: &DateStyle,
    theme: Theme,
    location: &str,
) -> String {
    let mut html = String::new();
    if let Some(alert) = state_alert(ctl.load_state(), &MESSAGES, location) {
        html.push_str(&row(&alert));
        return html;
    }

    html.push_str(&bar.render("/projects"));
    let view = ctl.compute_view();
    if view.items.is_empty() {
        html.push_str(&row(&alert(AlertKind::Info, MESSAGES.no_match)));
        return html;
    }
    let cards: String = view
        .items
        .iter()
        .map(|p| render_project_card(&ProjectCard::build(p, None, dates), theme))
        .collect();
    html.push_str(&row(&cards));
    if let Some(more) = load_more_control(bar, ctl, "/projects") {
        html.push_str(&more);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: Some(1),
            title: "Folio".into(),
            description: "A long description of a portfolio site built with care".into(),
            tech_stack: Some("Rust, , Rocket ,HTML".into()),
            github_link: Some("https://github.com/x/folio".into()),
            demo_link: Some("  ".into()),
            image_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_card_model() {
        let card = ProjectCard::build(&project(), Some(6), &DateStyle::default());
        assert_eq!(card.description, "A long...");
        assert_eq!(card.tags, vec!["Rust", "Rocket", "HTML"]);
        assert!(card.demo_link.is_none());
        assert!(card.date.is_empty());
    }

    #[test]
    fn test_card_markup_uses_themed_placeholder() {
        let card = ProjectCard::build(&project(), None, &DateStyle::default());
        let html = render_project_card(&card, Theme::Dark);
        assert!(html.contains("/1E293B/F1F5F9?text=Folio"));
        assert!(html.contains("bi-github"));
        assert!(!html.contains("Demo"));
        assert_eq!(html.matches(r#"class="tech-badge""#).count(), 3);
    }
}
