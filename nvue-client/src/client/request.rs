//! Single request/response round trip against the API.

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::error::{Result, TransportError};
use crate::transport::{HttpRequest, Method, QueryParams, Transport};

/// A request bound to one URL and the shared transport.
///
/// Interprets the raw [`HttpResponse`](crate::transport::HttpResponse):
/// failing status codes become [`TransportError::RequestFailed`] and
/// bodies that are not JSON become [`TransportError::InvalidData`].
pub struct Request<'a, T> {
    url: &'a str,
    transport: &'a Arc<T>,
}

impl<'a, T: Transport> Request<'a, T> {
    /// Create a request for `url` using `transport`.
    pub fn new(url: &'a str, transport: &'a Arc<T>) -> Self {
        Self { url, transport }
    }

    /// Make a GET request.
    pub async fn get(&self, params: QueryParams) -> Result<Value> {
        self.send(Method::Get, None, params).await
    }

    /// Make a POST request without a body.
    pub async fn post(&self, params: QueryParams) -> Result<Value> {
        self.send(Method::Post, None, params).await
    }

    /// Make a PATCH request with `data` as body.
    pub async fn patch(&self, data: Value, params: QueryParams) -> Result<Value> {
        self.send(Method::Patch, Some(data), params).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, params: QueryParams) -> Result<Value> {
        self.send(Method::Delete, None, params).await
    }

    /// Send the request and decode the JSON response body.
    pub async fn send(
        &self,
        method: Method,
        body: Option<Value>,
        params: QueryParams,
    ) -> Result<Value> {
        debug!("{} {} {:?}", method, self.url, params);

        let request_body = body.as_ref().map(Value::to_string);

        let mut headers = IndexMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = self
            .transport
            .request(HttpRequest {
                method,
                url: self.url.to_string(),
                body,
                query: params,
                headers,
            })
            .await?;

        if !response.is_success() {
            return Err(TransportError::RequestFailed {
                method,
                url: response.url.clone(),
                status: response.status,
                reason: response.reason.clone(),
                request_body,
                detail: serde_json::from_slice(&response.body).ok(),
            }
            .into());
        }

        serde_json::from_slice::<Value>(&response.body).map_err(|_| {
            TransportError::InvalidData {
                url: response.url.clone(),
                request_body,
                body: response.text(),
            }
            .into()
        })
    }
}
