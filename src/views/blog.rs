use pulldown_cmark::{html, Event, Options, Parser};

use crate::binder::{load_more_control, FilterBar};
use crate::listing::ListController;
use crate::models::blog::Blog;
use crate::models::category::{Category, UNCATEGORIZED};
use crate::render::{alert, html_escape, query_href, truncate_text, AlertKind};
use crate::views::{row, state_alert, DateStyle, ListMessages};

pub const MESSAGES: ListMessages = ListMessages {
    failed: "Failed to load blog posts. Please try again later.",
    empty: "No blog posts found. Add some posts through the admin panel to get started.",
    no_match: "No blog posts found for the selected category. Try a different filter or add some posts through the admin panel.",
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlogCard {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub date: String,
}

impl BlogCard {
    pub fn build(blog: &Blog, categories: &[Category], excerpt_chars: usize, dates: &DateStyle) -> Self {
        BlogCard {
            id: blog.id,
            title: blog.title.clone(),
            excerpt: truncate_text(&blog.content, excerpt_chars),
            category: Category::name_for(categories, blog.category_id).to_string(),
            date: dates.render(blog.created_at.as_deref()),
        }
    }
}

pub fn render_blog_card(card: &BlogCard) -> String {
    let category = html_escape(&card.category);
    let category_link = if card.category == UNCATEGORIZED {
        format!(r#"<span class="text-muted"><i class="bi bi-tag me-1"></i>{}</span>"#, category)
    } else {
        format!(
            r#"<a class="text-muted text-decoration-none" href="{}" aria-label="View category"><i class="bi bi-tag me-1"></i>{}</a>"#,
            html_escape(&query_href("/blog", &[("category", &card.category)])),
            category
        )
    };
    format!(
        r#"<div class="col-lg-6 col-md-6">
    <div class="card blog-card h-100 hover-lift">
        <div class="card-body d-flex flex-column">
            <div class="d-flex justify-content-between align-items-center mb-2">
                <span class="blog-category">{category}</span>
                <small class="text-muted"><i class="bi bi-calendar3 me-1"></i>{date}</small>
            </div>
            <h5 class="card-title mb-2">{title}</h5>
            <p class="card-text">{excerpt}</p>
            <div class="mt-auto d-flex justify-content-between align-items-center">
                <a href="/blog/{id}" class="btn btn-primary btn-sm"><i class="bi bi-journal-text me-1"></i>Read More</a>
                {category_link}
            </div>
        </div>
    </div>
</div>"#,
        category = category,
        date = html_escape(&card.date),
        title = html_escape(&card.title),
        excerpt = html_escape(&card.excerpt),
        id = card.id,
        category_link = category_link,
    )
}

/// Filter bar, card grid and load-more control for `/blog`.
pub fn render_blog_list(
    ctl: &ListController<Blog>,
    bar: &FilterBar,
    excerpt_chars: usize,
    dates: &DateStyle,
    location: &str,
) -> String {
    let mut html = String::new();
    if let Some(alert) = state_alert(ctl.load_state(), &MESSAGES, location) {
        html.push_str(&row(&alert));
        return html;
    }

    html.push_str(&bar.render("/blog"));
    let view = ctl.compute_view();
    if view.items.is_empty() {
        html.push_str(&row(&alert(AlertKind::Info, MESSAGES.no_match)));
        return html;
    }
    let cards: String = view
        .items
        .iter()
        .map(|blog| render_blog_card(&BlogCard::build(blog, ctl.categories(), excerpt_chars, dates)))
        .collect();
    html.push_str(&row(&cards));
    if let Some(more) = load_more_control(bar, ctl, "/blog") {
        html.push_str(&more);
    }
    html
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogDetail {
    pub title: String,
    pub category: String,
    pub date: String,
    /// (url, alt)
    pub images: Vec<(String, String)>,
    pub body_html: String,
}

impl BlogDetail {
    pub fn build(blog: &Blog, categories: &[Category], dates: &DateStyle) -> Self {
        let category = blog
            .category_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| Category::find_by_id(categories, blog.category_id).map(|c| c.name.clone()))
            .unwrap_or_default();
        BlogDetail {
            title: blog.title.clone(),
            category,
            date: dates.render(blog.created_at.as_deref()),
            images: blog
                .images
                .iter()
                .map(|img| {
                    let alt = img.alt_text.clone().unwrap_or_else(|| blog.title.clone());
                    (img.image_url.clone(), alt)
                })
                .collect(),
            body_html: render_markdown(&blog.content),
        }
    }
}

/// Markdown to HTML. Raw HTML in the source is shown as text.
pub fn render_markdown(src: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(src, opts).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

pub fn render_blog_detail(detail: &BlogDetail) -> String {
    let gallery = if detail.images.is_empty() {
        String::new()
    } else {
        let imgs: String = detail
            .images
            .iter()
            .map(|(url, alt)| {
                format!(
                    r#"<div class="col-md-4"><img src="{}" alt="{}" class="img-fluid rounded border"></div>"#,
                    html_escape(url),
                    html_escape(alt)
                )
            })
            .collect();
        format!(r#"<div class="row g-3 my-3">{}</div>"#, imgs)
    };
    let meta = match (detail.category.is_empty(), detail.date.is_empty()) {
        (false, false) => format!("{} &bull; {}", html_escape(&detail.category), html_escape(&detail.date)),
        (false, true) => html_escape(&detail.category),
        (true, false) => html_escape(&detail.date),
        (true, true) => String::new(),
    };
    format!(
        r#"<section class="py-5"><div class="container" id="blogDetail">
<a href="/blog" class="btn btn-link px-0 mb-3"><i class="bi bi-arrow-left"></i> <span data-lang="nav.blog">Blog</span></a>
<h1 class="mb-2">{title}</h1>
<div class="text-muted mb-3">{meta}</div>
{gallery}
<div class="blog-content">{body}</div>
</div></section>"#,
        title = html_escape(&detail.title),
        meta = meta,
        gallery = gallery,
        body = detail.body_html,
    )
}

pub fn render_blog_detail_failure() -> String {
    format!(
        r#"<section class="py-5"><div class="container" id="blogDetail">{}</div></section>"#,
        alert(AlertKind::Danger, "Failed to load blog.")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blog::BlogImage;

    fn blog() -> Blog {
        Blog {
            id: 7,
            title: "Ownership <explained>".into(),
            content: "# Heading\n\nSome **bold** text <script>alert(1)</script>".into(),
            category_id: Some(99),
            category_name: None,
            created_at: Some("2024-03-02T08:00:00".into()),
            images: vec![BlogImage {
                image_url: "/uploads/a.png".into(),
                alt_text: None,
            }],
        }
    }

    #[test]
    fn test_card_dangling_category_is_uncategorized() {
        let card = BlogCard::build(&blog(), &[], 150, &DateStyle::default());
        assert_eq!(card.category, UNCATEGORIZED);
        assert_eq!(card.date, "March 2, 2024");
        let html = render_blog_card(&card);
        assert!(html.contains("Ownership &lt;explained&gt;"));
        assert!(html.contains(r#"href="/blog/7""#));
        assert!(!html.contains("?category="));
    }

    #[test]
    fn test_card_category_link_applies_filter() {
        let cats = vec![Category { id: 99, name: "Rust Lang".into() }];
        let card = BlogCard::build(&blog(), &cats, 10, &DateStyle::default());
        assert_eq!(card.excerpt, "# Heading...");
        let html = render_blog_card(&card);
        assert!(html.contains(r#"href="/blog?category=Rust+Lang""#));
    }

    #[test]
    fn test_markdown_neutralises_raw_html() {
        let out = render_markdown("Some **bold** text <script>alert(1)</script>");
        assert!(out.contains("<strong>bold</strong>"));
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_detail_uses_title_as_alt_and_lookup_for_category() {
        let cats = vec![Category { id: 99, name: "Rust".into() }];
        let detail = BlogDetail::build(&blog(), &cats, &DateStyle::default());
        assert_eq!(detail.category, "Rust");
        assert_eq!(detail.images[0].1, "Ownership <explained>");
        let html = render_blog_detail(&detail);
        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains(r#"alt="Ownership &lt;explained&gt;""#));
    }
}
