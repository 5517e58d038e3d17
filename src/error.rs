use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with HTTP {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn malformed<T: Into<String>>(msg: T) -> Self {
        AppError::MalformedResponse(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        AppError::Config(msg.into())
    }
}
