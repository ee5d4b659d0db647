use rocket::form::Form;
use rocket::response::content::RawHtml;
use rocket::State;

use crate::api::ApiClient;
use crate::binder::{click_filter, reveal, FilterBar};
use crate::config::Config;
use crate::contact::{self, validate_all, SubmitControl};
use crate::error::FolioError;
use crate::guards::PagePrefs;
use crate::listing::ListController;
use crate::models::blog::Blog;
use crate::models::contact::{ContactForm, ContactMessage};
use crate::models::project::Project;
use crate::models::skill::Skill;
use crate::render::{render_page, PageContext};
use crate::views::blog::{render_blog_detail, render_blog_detail_failure, render_blog_list, BlogDetail};
use crate::views::contact::{render_contact_page, ContactView};
use crate::views::home::{render_home, HomeView};
use crate::views::project::render_project_list;
use crate::views::repo::render_repos;
use crate::views::skill::render_skill_list;
use crate::views::{section, DateStyle};

/// Shell, translation and retint for a page body.
fn page(prefs: &PagePrefs<'_>, config: &Config, title: &str, active: &str, body: &str) -> RawHtml<String> {
    let ctx = PageContext {
        site_name: &config.site_name,
        title,
        language: prefs.language.current(),
        theme: prefs.theme.document(),
        location: &prefs.location,
        active,
    };
    RawHtml(prefs.finish(&render_page(&ctx, body)))
}

/// Apply the filter and `shown` parameters of a list request.
fn bind<T: crate::listing::Listable>(
    ctl: &mut ListController<T>,
    bar: &mut FilterBar,
    filter: Option<&str>,
    shown: Option<usize>,
) {
    if let Some(value) = filter {
        click_filter(bar, ctl, value);
    }
    if let Some(n) = shown {
        reveal(ctl, n);
    }
}

// ── Home ───────────────────────────────────────────────

#[get("/")]
pub async fn home(prefs: PagePrefs<'_>, api: &State<ApiClient>, config: &State<Config>) -> RawHtml<String> {
    let (projects, skills) = futures::join!(api.projects(), api.skills());
    let dates = DateStyle::from_config(config);
    let body = render_home(&HomeView {
        site_name: &config.site_name,
        projects: &projects,
        skills: &skills,
        project_count: config.home_project_count,
        project_chars: config.home_project_chars,
        dates: &dates,
        theme: prefs.theme.theme(),
    });
    page(&prefs, config, "Home", "home", &body)
}

// ── Blog ───────────────────────────────────────────────

#[get("/blog?<category>&<shown>")]
pub async fn blog_list(
    category: Option<&str>,
    shown: Option<usize>,
    prefs: PagePrefs<'_>,
    api: &State<ApiClient>,
    config: &State<Config>,
) -> RawHtml<String> {
    let mut ctl: ListController<Blog> = ListController::new(config.page_size);
    ctl.load(api.blogs_with_categories()).await;
    let mut bar = FilterBar::for_categories(ctl.categories());
    bind(&mut ctl, &mut bar, category, shown);

    let list = render_blog_list(
        &ctl,
        &bar,
        config.blog_excerpt_chars,
        &DateStyle::from_config(config),
        &prefs.location,
    );
    let body = section("blog", "blog", "Blog", "Notes, write-ups and articles.", &list);
    page(&prefs, config, "Blog", "blog", &body)
}

#[get("/blog/<id>")]
pub async fn blog_detail(
    id: i64,
    prefs: PagePrefs<'_>,
    api: &State<ApiClient>,
    config: &State<Config>,
) -> RawHtml<String> {
    let (blog, categories) = futures::join!(api.blog(id), api.categories());
    let categories = categories.unwrap_or_else(|e| {
        log::warn!("[api] categories unavailable for blog {}: {}", id, e);
        Vec::new()
    });
    match blog {
        Ok(blog) => {
            let detail = BlogDetail::build(&blog, &categories, &DateStyle::from_config(config));
            page(&prefs, config, &blog.title, "blog", &render_blog_detail(&detail))
        }
        Err(e) => {
            log::warn!("[api] blog {} failed: {}", id, e);
            page(&prefs, config, "Blog", "blog", &render_blog_detail_failure())
        }
    }
}

// ── Projects ───────────────────────────────────────────

#[get("/projects?<filter>&<shown>")]
pub async fn projects(
    filter: Option<&str>,
    shown: Option<usize>,
    prefs: PagePrefs<'_>,
    api: &State<ApiClient>,
    config: &State<Config>,
) -> RawHtml<String> {
    let mut ctl: ListController<Project> = ListController::new(config.page_size);
    ctl.load_items(api.projects()).await;
    let mut bar = FilterBar::for_projects();
    bind(&mut ctl, &mut bar, filter, shown);

    let list = render_project_list(
        &ctl,
        &bar,
        &DateStyle::from_config(config),
        prefs.theme.theme(),
        &prefs.location,
    );
    let body = section(
        "projects",
        "projects",
        "Featured Projects",
        "A selection of my recent work showcasing different technologies and solutions.",
        &list,
    );
    page(&prefs, config, "Projects", "projects", &body)
}

// ── Skills ─────────────────────────────────────────────

#[get("/skills?<level>&<shown>")]
pub async fn skills(
    level: Option<&str>,
    shown: Option<usize>,
    prefs: PagePrefs<'_>,
    api: &State<ApiClient>,
    config: &State<Config>,
) -> RawHtml<String> {
    let mut ctl: ListController<Skill> = ListController::new(config.page_size);
    ctl.load_items(api.skills()).await;
    let mut bar = FilterBar::for_skills();
    bind(&mut ctl, &mut bar, level, shown);

    let list = render_skill_list(&ctl, &bar, &prefs.location);
    let body = section(
        "skills",
        "skills",
        "Skills",
        "A quick overview of my technical skills and proficiency levels.",
        &list,
    );
    page(&prefs, config, "Skills", "skills", &body)
}

// ── GitHub ─────────────────────────────────────────────

#[get("/github")]
pub async fn github(prefs: PagePrefs<'_>, api: &State<ApiClient>, config: &State<Config>) -> RawHtml<String> {
    let repos = api.repos().await;
    let body = section(
        "github",
        "github",
        "GitHub Repositories",
        "Explore my open-source contributions and personal projects.",
        &render_repos(&repos, &prefs.location),
    );
    page(&prefs, config, "GitHub", "home", &body)
}

// ── Contact ────────────────────────────────────────────

#[get("/contact")]
pub fn contact_page(prefs: PagePrefs<'_>, config: &State<Config>) -> RawHtml<String> {
    page(&prefs, config, "Contact", "contact", &render_contact_page(&ContactView::default()))
}

#[post("/contact", data = "<form>")]
pub async fn contact_submit(
    form: Form<ContactForm>,
    prefs: PagePrefs<'_>,
    api: &State<ApiClient>,
    config: &State<Config>,
) -> RawHtml<String> {
    let msg: ContactMessage = form.into_inner().into();
    let mut control = SubmitControl::default();
    let outcome = contact::submit(api, &msg, &mut control, config.notice_hide_ms).await;

    let values = if outcome.reset {
        ContactMessage::default()
    } else {
        msg.clone()
    };
    let fields = match outcome.result {
        Err(FolioError::ValidationFailed(_)) => validate_all(&msg),
        _ => Vec::new(),
    };
    let view = ContactView {
        values,
        fields,
        notice: Some(outcome.notice),
        control,
    };
    page(&prefs, config, "Contact", "contact", &render_contact_page(&view))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        home,
        blog_list,
        blog_detail,
        projects,
        skills,
        github,
        contact_page,
        contact_submit
    ]
}
