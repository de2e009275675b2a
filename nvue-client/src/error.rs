//! Error types for nvue-client.

use serde_json::Value;
use thiserror::Error;

use crate::transport::Method;

/// Main error type for nvue-client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport and response errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Revision workflow errors
    #[error("Revision error: {0}")]
    Revision(#[from] RevisionError),

    /// Client configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// HTTP status code of a failed request, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::RequestFailed { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is a failed revision precondition.
    pub fn is_revision(&self) -> bool {
        matches!(self, Error::Revision(_))
    }
}

/// Transport layer errors (HTTP status, response decoding, connectivity).
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with a failing status code
    #[error(
        "The request for URL {url} failed with code {status} {reason}{}",
        describe_detail(.detail)
    )]
    RequestFailed {
        method: Method,
        url: String,
        status: u16,
        reason: String,
        request_body: Option<String>,
        detail: Option<Value>,
    },

    /// The server answered successfully but the body is not JSON
    #[error("The URL {url} returned non json data")]
    InvalidData {
        url: String,
        request_body: Option<String>,
        body: String,
    },

    /// The request never produced a response
    #[error("{method} request to {url} failed: {source}")]
    Connection {
        method: Method,
        url: String,
        #[source]
        source: BoxError,
    },

    /// A request header could not be encoded
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },
}

/// Boxed error reported by a [`Transport`](crate::transport::Transport)
/// implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl TransportError {
    /// Wrap a failure to obtain any response for `method` on `url`.
    pub fn connection(
        method: Method,
        url: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        TransportError::Connection {
            method,
            url: url.into(),
            source: source.into(),
        }
    }
}

fn describe_detail(detail: &Option<Value>) -> String {
    match detail {
        Some(detail) => format!(": {}", detail),
        None => " without additional information.".to_string(),
    }
}

/// Revision workflow errors.
#[derive(Error, Debug)]
pub enum RevisionError {
    /// No revision has been created or switched to
    #[error("No revision to {action}")]
    NoRevision { action: &'static str },

    /// The create response did not name exactly one revision
    #[error("Revision create returned {keys} top-level keys, expected exactly one")]
    UnexpectedCreateResponse { keys: usize },
}

/// Client configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The root URL could not be used
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// A required builder setting is missing or invalid
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias using nvue-client's Error.
pub type Result<T> = std::result::Result<T, Error>;
