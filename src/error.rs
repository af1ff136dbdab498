use std::fmt;

#[derive(Debug)]
pub enum GitAiError {
    NotAGitRepo,
    NoCommits,
    MissingApiKey,
    InvalidApiKey(String),
    ApiError { status: u16, message: String },
    NetworkError(String),
    CommitFailed(String),
    GitError(String),
    IoError(String),
}

impl fmt::Display for GitAiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitAiError::NotAGitRepo => write!(f, "Not inside a git repository"),
            GitAiError::NoCommits => write!(f, "No commits yet"),
            GitAiError::MissingApiKey => write!(
                f,
                "No API key configured (set GIT_AI_API_KEY or run git-ai config --api-key)"
            ),
            GitAiError::InvalidApiKey(msg) => write!(f, "Invalid API key: {}", msg),
            GitAiError::ApiError { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            GitAiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            GitAiError::CommitFailed(msg) => write!(f, "Git commit failed: {}", msg),
            GitAiError::GitError(msg) => write!(f, "Git error: {}", msg),
            GitAiError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for GitAiError {}

impl From<std::io::Error> for GitAiError {
    fn from(err: std::io::Error) -> Self {
        GitAiError::IoError(err.to_string())
    }
}

impl From<git2::Error> for GitAiError {
    fn from(err: git2::Error) -> Self {
        GitAiError::GitError(err.message().to_string())
    }
}

impl From<toml::de::Error> for GitAiError {
    fn from(err: toml::de::Error) -> Self {
        GitAiError::IoError(format!("Config parse error: {}", err))
    }
}

impl From<serde_json::Error> for GitAiError {
    fn from(err: serde_json::Error) -> Self {
        GitAiError::IoError(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, GitAiError>;
