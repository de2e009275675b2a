//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use bytes::Bytes;
use serde_json::Value;

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::Result;

/// Transport that replays queued responses and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body.
    pub(crate) fn push_json(&self, body: Value) {
        self.push_raw(200, "OK", body.to_string());
    }

    /// Queue a response with an arbitrary status and body.
    pub(crate) fn push_raw(&self, status: u16, reason: &str, body: impl Into<String>) {
        let body: String = body.into();
        self.responses.lock().unwrap().push_back(HttpResponse {
            status,
            reason: reason.to_string(),
            url: String::new(),
            body: Bytes::from(body),
        });
    }

    /// All requests seen so far, oldest first.
    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request.
    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was made")
    }
}

impl Transport for MockTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let mut response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no response queued for request");
        if response.url.is_empty() {
            response.url = url;
        }
        Ok(response)
    }
}
