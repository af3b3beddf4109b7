//! Error types for gitlab-tools

use thiserror::Error;

/// Errors produced by the library
#[derive(Debug, Error)]
pub enum Error {
    /// GitLab answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, usually a JSON message from GitLab
        body: String,
    },

    /// Transport failure (connect, timeout, decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Other GitLab client failures (client construction, bad base URL)
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Invalid run configuration or unreadable config file
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing base URL or token
    #[error("authentication error: {0}")]
    Auth(String),

    /// Anything else (prompt I/O, serialization)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
