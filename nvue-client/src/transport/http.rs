//! HTTP transport implementation using reqwest.

use log::trace;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;

use super::config::ClientConfig;
use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::{ConfigError, Result, TransportError};

/// HTTP transport wrapping a reqwest client.
///
/// One instance holds one connection pool and the basic auth credentials.
/// It is shared by every resource created from the same [`Client`](crate::Client).
pub struct HttpTransport {
    /// The reqwest client (connection pool).
    client: reqwest::Client,

    /// Configuration used for this transport.
    config: ClientConfig,
}

impl HttpTransport {
    /// Build the underlying HTTP client from the configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { client, config })
    }

    /// Get the configuration this transport was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn to_reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            body,
            query,
            headers,
        } = request;

        let mut header_map = HeaderMap::with_capacity(headers.len());
        for (name, value) in &headers {
            let invalid = |message: String| TransportError::InvalidHeader {
                name: name.clone(),
                message,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            header_map.insert(header_name, header_value);
        }

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(method), &url)
            .basic_auth(
                &self.config.username,
                Some(self.config.password.expose_secret()),
            )
            .headers(header_map)
            .query(&query.iter().collect::<Vec<_>>());

        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::connection(method, url.as_str(), e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::connection(method, url.as_str(), e))?;

        trace!("{} {} -> {} ({} bytes)", method, final_url, status, body.len());

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            url: final_url,
            body,
        })
    }
}
