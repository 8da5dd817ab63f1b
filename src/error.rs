use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Problems loading the configuration file. None of these reach the network.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file '{}' not found", path.display())]
    Missing { path: PathBuf },

    #[error("could not read configuration file '{}'", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration file is malformed: {0}")]
    Malformed(String),

    #[error("missing required setting '{key}'")]
    MissingKey { key: &'static str },

    #[error("invalid date for '{key}': '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        key: &'static str,
        value: String,
        source: chrono::ParseError,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}

/// Failure of a single remote call.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{status} from {url}: {message}")]
    Status {
        status: StatusCode,
        url: String,
        message: String,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("access token contains characters not allowed in a header")]
    InvalidToken,
}

impl ApiError {
    /// The remote refused to show the resource (404 or 403).
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status, .. }
                if *status == StatusCode::NOT_FOUND || *status == StatusCode::FORBIDDEN
        )
    }
}

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("user '{username}' not found")]
    UserNotFound { username: String },

    #[error("failed to look up user")]
    UserLookup(#[source] ApiError),

    #[error("failed to list projects")]
    ProjectList(#[source] ApiError),
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => 2,
            RunError::UserNotFound { .. } => 3,
            RunError::UserLookup(_) | RunError::ProjectList(_) => 4,
        }
    }
}
