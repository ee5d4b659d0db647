use crate::api::repo_error_message;
use crate::error::FolioError;
use crate::models::repo::Repo;
use crate::render::{alert, alert_with_retry, html_escape, AlertKind};
use crate::views::row;

pub const NO_REPOS: &str =
    "No public repositories found. Check your GitHub username in the environment variables.";

#[derive(Debug, Clone, PartialEq)]
pub struct RepoCard {
    pub name: String,
    pub description: String,
    pub badges: Vec<(&'static str, String)>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub url: String,
}

impl RepoCard {
    pub fn build(repo: &Repo) -> Self {
        let mut badges = Vec::new();
        if let Some(lang) = repo.language.as_deref().filter(|l| !l.is_empty()) {
            badges.push(("bg-secondary", lang.to_string()));
        }
        if repo.fork {
            badges.push(("bg-info", "Fork".to_string()));
        }
        if repo.archived {
            badges.push(("bg-warning", "Archived".to_string()));
        }
        RepoCard {
            name: repo.name.clone(),
            description: repo
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description available".to_string()),
            badges,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: repo.watchers_count,
            url: repo.html_url.clone(),
        }
    }
}

pub fn render_repo_card(card: &RepoCard) -> String {
    let badges: String = card
        .badges
        .iter()
        .map(|(class, text)| format!(r#"<span class="badge {}">{}</span>"#, class, html_escape(text)))
        .collect();
    format!(
        r#"<div class="col-lg-4 col-md-6">
    <div class="card h-100 hover-lift">
        <div class="card-body d-flex flex-column">
            <div class="d-flex align-items-center mb-2">
                <i class="bi bi-github text-primary fs-4 me-2"></i>
                <h5 class="card-title mb-0">{name}</h5>
            </div>
            <p class="card-text flex-grow-1">{description}</p>
            <div class="mt-3">
                <div class="d-flex flex-wrap gap-2 mb-3">{badges}</div>
                <div class="d-flex justify-content-between align-items-center">
                    <div class="d-flex gap-2">
                        <span class="badge bg-warning text-dark" title="Stars"><i class="bi bi-star-fill me-1"></i>{stars}</span>
                        <span class="badge bg-info text-dark" title="Forks"><i class="bi bi-git-branch me-1"></i>{forks}</span>
                        <span class="badge bg-success text-dark" title="Watchers"><i class="bi bi-eye me-1"></i>{watchers}</span>
                    </div>
                    <a class="btn btn-sm btn-primary" href="{url}" target="_blank" rel="noopener"><i class="bi bi-box-arrow-up-right"></i> View</a>
                </div>
            </div>
        </div>
    </div>
</div>"#,
        name = html_escape(&card.name),
        description = html_escape(&card.description),
        badges = badges,
        stars = card.stars,
        forks = card.forks,
        watchers = card.watchers,
        url = html_escape(&card.url),
    )
}

/// Repository grid, or the matching alert.
pub fn render_repos(result: &Result<Vec<Repo>, FolioError>, retry_href: &str) -> String {
    match result {
        Err(e) => row(&alert_with_retry(
            "Failed to load GitHub repositories",
            &repo_error_message(e),
            retry_href,
        )),
        Ok(repos) if repos.is_empty() => row(&alert(AlertKind::Info, NO_REPOS)),
        Ok(repos) => row(&repos.iter().map(|r| render_repo_card(&RepoCard::build(r))).collect::<String>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_fallbacks_and_badges() {
        let repo = Repo {
            name: "dotfiles".into(),
            description: None,
            language: Some("Shell".into()),
            fork: true,
            archived: false,
            stargazers_count: 3,
            forks_count: 0,
            watchers_count: 1,
            html_url: "https://github.com/x/dotfiles".into(),
        };
        let card = RepoCard::build(&repo);
        assert_eq!(card.description, "No description available");
        assert_eq!(
            card.badges,
            vec![
                ("bg-secondary", "Shell".to_string()),
                ("bg-info", "Fork".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_states() {
        let html = render_repos(&Ok(Vec::new()), "/github");
        assert!(html.contains(NO_REPOS));
        let html = render_repos(&Err(FolioError::Upstream(429, "rate limit hit".into())), "/github");
        assert!(html.contains("GitHub API rate limit exceeded"));
        assert!(html.contains(r#"href="/github""#));
        assert!(html.contains("Try Again"));
    }
}
