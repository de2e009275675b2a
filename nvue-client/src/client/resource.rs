//! Path-addressed configuration resource.

use std::sync::Arc;

use serde_json::Value;

use super::path::make_path;
use super::request::Request;
use crate::error::Result;
use crate::transport::{QueryParams, Transport};

/// Query parameter carrying the revision a mutation is staged on.
pub const REV_PARAM: &str = "rev";

/// A configuration subtree exposed at `<base>/<endpoint>`.
///
/// Every call addresses `<url>/<target_path>`, or the resource URL itself
/// when `target_path` is empty. The last document fetched with
/// [`get`](Self::get) is kept as the resource's snapshot; mutations do not
/// touch it, so re-fetch to observe their effect.
///
/// # Example
///
/// ```rust,no_run
/// use nvue_client::{Category, ClientBuilder};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), nvue_client::Error> {
/// let mut client = ClientBuilder::new("https://leaf01:8765")
///     .username("cumulus")
///     .password("secret")
///     .build()?;
///
/// let lo = client.catalog[Category::Interface].get("lo").await?;
/// println!("{}", lo);
///
/// client.revision.create().await?;
/// let rev = client.revision.rev().unwrap_or_default().to_string();
/// client.catalog[Category::Interface]
///     .patch(&rev, json!({"address": {"10.10.10.4/32": {}}}), "lo/ip")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Resource<T> {
    /// Shared transport.
    transport: Arc<T>,

    /// Endpoint relative to the API base (may be empty).
    endpoint: String,

    /// Absolute URL of the resource.
    url: String,

    /// Last fetched configuration.
    config: Option<Value>,
}

impl<T: Transport> Resource<T> {
    /// Create a resource for `endpoint` below `base_url`.
    pub fn new(transport: Arc<T>, base_url: &str, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let url = make_path(base_url, &endpoint);
        Self {
            transport,
            endpoint,
            url,
            config: None,
        }
    }

    /// Absolute URL of the resource.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Endpoint relative to the API base.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Last configuration fetched with [`get`](Self::get).
    pub fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }

    pub(crate) fn set_config(&mut self, config: Value) {
        self.config = Some(config);
    }

    pub(crate) fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Construct the URL for a path relative to the resource.
    pub fn make_path(&self, target_path: &str) -> String {
        make_path(&self.url, target_path)
    }

    /// Fetch the configuration at `target_path` and keep it as the snapshot.
    pub async fn get(&mut self, target_path: &str) -> Result<Value> {
        self.get_with(target_path, QueryParams::new()).await
    }

    /// [`get`](Self::get) with additional endpoint parameters.
    pub async fn get_with(&mut self, target_path: &str, params: QueryParams) -> Result<Value> {
        let url = self.make_path(target_path);
        let config = Request::new(&url, &self.transport).get(params).await?;
        self.config = Some(config.clone());
        Ok(config)
    }

    /// Patch the configuration at `target_path` on revision `rev`.
    pub async fn patch(&self, rev: &str, data: Value, target_path: &str) -> Result<Value> {
        self.patch_with(rev, data, target_path, QueryParams::new()).await
    }

    /// [`patch`](Self::patch) with additional endpoint parameters.
    ///
    /// A `rev` key in `params` is replaced by `rev`.
    pub async fn patch_with(
        &self,
        rev: &str,
        data: Value,
        target_path: &str,
        mut params: QueryParams,
    ) -> Result<Value> {
        let url = self.make_path(target_path);
        params.insert(REV_PARAM.to_string(), rev.to_string());
        Request::new(&url, &self.transport).patch(data, params).await
    }

    /// Make a POST request at `target_path`.
    pub async fn post(&self, target_path: &str) -> Result<Value> {
        self.post_with(target_path, QueryParams::new()).await
    }

    /// [`post`](Self::post) with additional endpoint parameters.
    pub async fn post_with(&self, target_path: &str, params: QueryParams) -> Result<Value> {
        let url = self.make_path(target_path);
        Request::new(&url, &self.transport).post(params).await
    }

    /// Delete the configuration at `target_path` on revision `rev`.
    pub async fn delete(&self, rev: &str, target_path: &str) -> Result<Value> {
        self.delete_with(rev, target_path, QueryParams::new()).await
    }

    /// [`delete`](Self::delete) with additional endpoint parameters.
    ///
    /// A `rev` key in `params` is replaced by `rev`.
    pub async fn delete_with(
        &self,
        rev: &str,
        target_path: &str,
        mut params: QueryParams,
    ) -> Result<Value> {
        let url = self.make_path(target_path);
        params.insert(REV_PARAM.to_string(), rev.to_string());
        Request::new(&url, &self.transport).delete(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;
    use crate::transport::mock::MockTransport;
    use serde_json::json;

    const BASE: &str = "https://localhost:8765/nvue_v1";

    fn interface(transport: &Arc<MockTransport>) -> Resource<MockTransport> {
        Resource::new(transport.clone(), BASE, "interface")
    }

    #[test]
    fn test_urls() {
        let transport = Arc::new(MockTransport::new());
        let resource = interface(&transport);
        assert_eq!(resource.url(), format!("{BASE}/interface"));
        assert_eq!(resource.make_path(""), format!("{BASE}/interface"));
        assert_eq!(resource.make_path("lo/ip"), format!("{BASE}/interface/lo/ip"));

        let root = Resource::new(transport, BASE, "");
        assert_eq!(root.url(), BASE);
    }

    #[tokio::test]
    async fn test_get_stores_snapshot() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"127.0.0.1/8": {}, "::1/128": {}}));

        let mut resource = interface(&transport);
        assert!(resource.config().is_none());

        let config = resource.get("lo/ip/address").await.unwrap();
        assert_eq!(resource.config(), Some(&config));

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, format!("{BASE}/interface/lo/ip/address"));
        assert!(sent.query.is_empty());
    }

    #[tokio::test]
    async fn test_get_failure_keeps_previous_snapshot() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"lo": {}}));
        transport.push_raw(404, "Not Found", "");

        let mut resource = interface(&transport);
        resource.get("").await.unwrap();
        assert!(resource.get("missing").await.is_err());
        assert_eq!(resource.config(), Some(&json!({"lo": {}})));
    }

    #[tokio::test]
    async fn test_patch_overrides_rev_param() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"address": {"10.10.10.4/32": {}}}));

        let mut params = QueryParams::new();
        params.insert("rev".to_string(), "stale".to_string());
        params.insert("other".to_string(), "x".to_string());

        let resource = interface(&transport);
        let data = json!({"address": {"10.10.10.4/32": {}}});
        resource
            .patch_with("2", data.clone(), "lo/ip", params)
            .await
            .unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, format!("{BASE}/interface/lo/ip"));
        assert_eq!(sent.body, Some(data));
        assert_eq!(sent.query["rev"], "2");
        assert_eq!(sent.query["other"], "x");
        assert_eq!(sent.query.len(), 2);
    }

    #[tokio::test]
    async fn test_patch_does_not_update_snapshot() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"mtu": 9216}));

        let resource = interface(&transport);
        resource.patch("1", json!({"mtu": 9216}), "swp1/link").await.unwrap();
        assert!(resource.config().is_none());
    }

    #[tokio::test]
    async fn test_delete_injects_rev() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({}));

        let mut params = QueryParams::new();
        params.insert("rev".to_string(), "old".to_string());

        let resource = interface(&transport);
        let result = resource.delete_with("5", "bond21", params).await.unwrap();
        assert_eq!(result, json!({}));

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, format!("{BASE}/interface/bond21"));
        assert_eq!(sent.body, None);
        assert_eq!(sent.query["rev"], "5");
    }

    #[tokio::test]
    async fn test_post_without_body() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({"ok": true}));

        let resource = interface(&transport);
        resource.post("").await.unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, format!("{BASE}/interface"));
        assert_eq!(sent.body, None);
        assert!(sent.query.is_empty());
    }

    #[tokio::test]
    async fn test_default_params_are_fresh_per_call() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(json!({}));
        transport.push_json(json!({}));

        let mut resource = interface(&transport);
        resource.delete("9", "swp1").await.unwrap();
        resource.get("swp1").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].query["rev"], "9");
        assert!(requests[1].query.is_empty());
    }
}
