//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("Generic error: {0}")]
    Generic(String),
}

impl Error {
    /// Wrap an error with the pipeline stage that produced it.
    pub fn stage(stage: &'static str, source: Error) -> Self {
        Error::Stage {
            stage,
            source: Box::new(source),
        }
    }

    /// Whether this failure is a transient rate limit worth retrying.
    ///
    /// HTTP 429 is classified structurally at the transport layer. Some
    /// providers tunnel the status through free-text error bodies, so
    /// provider-reported errors are additionally scanned for a "429" marker.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Error::RateLimited(_) => true,
            Error::AiProvider(message) => message.contains("429"),
            Error::Stage { source, .. } => source.is_rate_limited(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
