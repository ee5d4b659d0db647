use crate::error::FolioError;
use crate::models::project::Project;
use crate::models::skill::Skill;
use crate::render::{alert, AlertKind};
use crate::theme::Theme;
use crate::views::project::{render_project_card, ProjectCard};
use crate::views::skill::render_skill_groups;
use crate::views::{failure_alert, row, section, DateStyle};

pub const NO_PROJECTS: &str = "No projects found. Add some projects through the admin panel.";

pub struct HomeView<'a> {
    pub site_name: &'a str,
    pub projects: &'a Result<Vec<Project>, FolioError>,
    pub skills: &'a Result<Vec<Skill>, FolioError>,
    pub project_count: usize,
    pub project_chars: usize,
    pub dates: &'a DateStyle,
    pub theme: Theme,
}

fn hero(site_name: &str) -> String {
    format!(
        r#"<section id="home" class="hero py-5">
<div class="container text-center">
    <h1 class="display-4"><span data-lang="hero.greeting">Hi, I'm</span> <span class="text-primary">{name}</span></h1>
    <p class="lead" data-lang="hero.subtitle">Full-stack developer crafting reliable, scalable web applications with modern technologies.</p>
    <div class="d-flex justify-content-center gap-3 mt-4">
        <a class="btn btn-primary" href="/projects"><i class="bi bi-grid me-1"></i><span data-lang="hero.viewProjects">View Projects</span></a>
        <a class="btn btn-outline-primary" href="/github"><i class="bi bi-github me-1"></i><span data-lang="hero.githubRepos">GitHub Repos</span></a>
    </div>
</div>
</section>"#,
        name = crate::render::html_escape(site_name),
    )
}

fn about() -> String {
    let features = [
        ("cleanCode", "bi-code-slash", "Clean Code", "Writing maintainable, well-documented code"),
        ("performance", "bi-lightning", "Performance", "Optimizing for speed and efficiency"),
        ("responsive", "bi-phone", "Responsive", "Mobile-first design approach"),
    ];
    let cards: String = features
        .iter()
        .map(|(key, icon, title, description)| {
            format!(
                r#"<div class="col-md-4"><div class="card h-100 text-center p-3">
    <i class="bi {icon} fs-2 text-primary"></i>
    <h5 class="mt-2" data-lang="about.features.{key}.title">{title}</h5>
    <p class="text-muted" data-lang="about.features.{key}.description">{description}</p>
</div></div>"#,
                icon = icon,
                key = key,
                title = title,
                description = description,
            )
        })
        .collect();
    section(
        "about",
        "about",
        "About Me",
        "I am a software engineer specialized in creating efficient, optimized, and user-friendly solutions.",
        &row(&cards),
    )
}

pub fn render_home(view: &HomeView) -> String {
    let projects = match view.projects {
        Ok(list) if !list.is_empty() => row(&list
            .iter()
            .take(view.project_count)
            .map(|p| {
                render_project_card(
                    &ProjectCard::build(p, Some(view.project_chars), view.dates),
                    view.theme,
                )
            })
            .collect::<String>()),
        // A failed fetch reads the same as an empty list here.
        _ => row(&alert(AlertKind::Warning, NO_PROJECTS)),
    };

    let skills = match view.skills {
        Ok(list) if list.is_empty() => row(&alert(
            AlertKind::Info,
            crate::views::skill::MESSAGES.empty,
        )),
        Ok(list) => {
            let refs: Vec<&Skill> = list.iter().collect();
            format!(r#"<div class="row">{}</div>"#, render_skill_groups(&refs))
        }
        Err(e) => row(&failure_alert(crate::views::skill::MESSAGES.failed, e, "/")),
    };

    let contact = r#"<div class="text-center"><a class="btn btn-primary btn-lg" href="/contact"><i class="bi bi-envelope me-2"></i><span data-lang="nav.contact">Contact</span></a></div>"#;

    [
        hero(view.site_name),
        about(),
        section(
            "projects",
            "projects",
            "Featured Projects",
            "A selection of my recent work showcasing different technologies and solutions.",
            &projects,
        ),
        section(
            "skills",
            "skills",
            "Skills",
            "A quick overview of my technical skills and proficiency levels.",
            &skills,
        ),
        section(
            "contact",
            "contact",
            "Contact Me",
            "Have a question or want to work together? Send me a message.",
            contact,
        ),
    ]
    .concat()
}
