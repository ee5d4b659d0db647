//! Client for the portfolio backend API.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FolioError;
use crate::models::blog::Blog;
use crate::models::category::Category;
use crate::models::contact::ContactMessage;
use crate::models::project::Project;
use crate::models::repo::Repo;
use crate::models::skill::Skill;

/// Status and body of a backend response, before any decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The wire. `Err` means no status was received at all.
#[rocket::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, String>;
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, String>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FolioError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FolioError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(HttpTransport { client })
    }
}

#[rocket::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, String> {
        let resp = self.client.get(url).send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        Ok(RawResponse { status, body })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, String> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        Ok(RawResponse { status, body })
    }
}

pub struct ApiClient {
    base: String,
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(base: &str, transport: Box<dyn Transport>) -> Self {
        ApiClient {
            base: base.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> Result<RawResponse, FolioError> {
        let url = self.url(path);
        log::debug!("[api] GET {}", url);
        self.transport.get(&url).await.map_err(|e| {
            log::warn!("[api] GET {} failed: {}", url, e);
            FolioError::Transport(e)
        })
    }

    /// GET `path` and decode the JSON body. Non-2xx is `RequestFailed`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FolioError> {
        let resp = self.get(path).await?;
        if !resp.is_success() {
            log::warn!("[api] GET {} -> {}", path, resp.status);
            return Err(FolioError::RequestFailed(resp.status));
        }
        serde_json::from_str(&resp.body).map_err(|e| FolioError::Decode(e.to_string()))
    }

    pub async fn blogs(&self) -> Result<Vec<Blog>, FolioError> {
        self.fetch_json("/api/blogs").await
    }

    pub async fn blog(&self, id: i64) -> Result<Blog, FolioError> {
        self.fetch_json(&format!("/api/blogs/{}", id)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, FolioError> {
        self.fetch_json("/api/categories").await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, FolioError> {
        self.fetch_json("/api/projects").await
    }

    pub async fn skills(&self) -> Result<Vec<Skill>, FolioError> {
        self.fetch_json("/api/skills").await
    }

    /// Blogs and categories, fetched concurrently. Either failure fails both.
    pub async fn blogs_with_categories(&self) -> Result<(Vec<Blog>, Vec<Category>), FolioError> {
        let (blogs, categories) = futures::join!(self.blogs(), self.categories());
        Ok((blogs?, categories?))
    }

    /// GitHub repositories as proxied by the backend. Error bodies of the
    /// form `{"error": "..."}` are kept so they can be shown to the user.
    pub async fn repos(&self) -> Result<Vec<Repo>, FolioError> {
        let resp = self.get("/api/github/repos").await?;
        if !resp.is_success() {
            let message = serde_json::from_str::<Value>(&resp.body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            log::warn!("[api] github repos -> {}: {}", resp.status, message);
            return Err(FolioError::Upstream(resp.status, message));
        }
        serde_json::from_str(&resp.body).map_err(|e| FolioError::Decode(e.to_string()))
    }

    /// POST a contact message. Every failure, including a non-2xx status,
    /// comes back as `SubmissionFailed`.
    pub async fn submit_contact(&self, msg: &ContactMessage) -> Result<Value, FolioError> {
        let url = self.url("/api/contact");
        let body = serde_json::to_value(msg)
            .map_err(|e| FolioError::SubmissionFailed(e.to_string()))?;
        let resp = self
            .transport
            .post_json(&url, &body)
            .await
            .map_err(FolioError::SubmissionFailed)?;
        if !resp.is_success() {
            return Err(FolioError::SubmissionFailed(format!(
                "HTTP error! status: {}",
                resp.status
            )));
        }
        if resp.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&resp.body).map_err(|e| FolioError::SubmissionFailed(e.to_string()))
    }
}

/// Human-readable explanation of a repository fetch failure.
pub fn repo_error_message(err: &FolioError) -> String {
    let raw = err.to_string();
    if matches!(err, FolioError::Transport(_)) {
        "Network error. Please check your internet connection and try again.".to_string()
    } else if raw.contains("username not configured") {
        "GitHub username not configured. Please set GITHUB_USERNAME in your environment variables."
            .to_string()
    } else if raw.contains("not found") {
        "GitHub user not found. Please check your username.".to_string()
    } else if raw.contains("rate limit") {
        "GitHub API rate limit exceeded. Please try again later.".to_string()
    } else {
        raw
    }
}
