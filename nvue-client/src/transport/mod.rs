//! HTTP transport layer wrapping reqwest.
//!
//! This module defines the request/response shapes exchanged with the
//! switch and the [`Transport`] trait the client layer is written against.
//! [`HttpTransport`] is the reqwest-backed implementation; any other type
//! implementing [`Transport`] can be plugged into a [`Client`](crate::Client).

pub mod config;
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use config::ClientConfig;
pub use http::HttpTransport;

use std::fmt;
use std::future::Future;

use bytes::Bytes;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;

/// Ordered query parameters sent with a request.
pub type QueryParams = IndexMap<String, String>;

/// HTTP verbs used by the NVUE API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Upper-case verb as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP verb.
    pub method: Method,

    /// Absolute request URL, without query string.
    pub url: String,

    /// JSON body, if any.
    pub body: Option<Value>,

    /// Query parameters.
    pub query: QueryParams,

    /// Request headers.
    pub headers: IndexMap<String, String>,
}

/// Raw response returned by a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,

    /// Reason phrase for the status code.
    pub reason: String,

    /// Final URL of the request, including the query string.
    pub url: String,

    /// Undecoded response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Check if the status code indicates success (anything below 400).
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    /// Get the body as a string (lossy UTF-8 conversion).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for HTTP transports.
///
/// A transport only reports failures to obtain a response at all. Status
/// codes and body decoding are interpreted by the client layer.
pub trait Transport: Send + Sync {
    /// Issue the request and return the raw response.
    fn request(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_response_success_boundary() {
        let mut response = HttpResponse {
            status: 399,
            reason: String::new(),
            url: String::new(),
            body: Bytes::new(),
        };
        assert!(response.is_success());
        response.status = 400;
        assert!(!response.is_success());
    }
}
