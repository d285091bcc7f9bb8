use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CIGateError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no builds found for request '{0}'")]
    NotFound(String),

    #[error("timed out waiting for a build result after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CIGateError>;
