/// Everything that can go wrong between a page request and the backend API.
#[derive(Debug, Clone, PartialEq)]
pub enum FolioError {
    /// Backend answered with a non-2xx status.
    RequestFailed(u16),
    /// Non-2xx status with an `{"error": "..."}` body.
    Upstream(u16, String),
    /// Connection or protocol failure before a status was received.
    Transport(String),
    /// Body was not the JSON shape we expected.
    Decode(String),
    /// Contact form input rejected locally; never reaches the network.
    ValidationFailed(Vec<String>),
    /// Contact write rejected or not delivered.
    SubmissionFailed(String),
    Config(String),
}

impl std::fmt::Display for FolioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FolioError::RequestFailed(status) => write!(f, "Request failed: {}", status),
            FolioError::Upstream(status, msg) => write!(f, "HTTP {}: {}", status, msg),
            FolioError::Transport(msg) => write!(f, "Failed to fetch: {}", msg),
            FolioError::Decode(msg) => write!(f, "Invalid response body: {}", msg),
            FolioError::ValidationFailed(errors) => write!(f, "{}", errors.join("; ")),
            FolioError::SubmissionFailed(msg) => write!(f, "Submission failed: {}", msg),
            FolioError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for FolioError {}
