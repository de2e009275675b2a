//! High-level client for the NVUE API.
//!
//! The client layer owns the shared transport and hands it to every
//! resource it creates: the revision handle, the root (for diffs) and one
//! resource per configuration [`Category`].

mod builder;
pub mod catalog;
pub mod path;
mod request;
pub mod resource;
pub mod revision;
pub mod root;

pub use builder::ClientBuilder;
pub use catalog::{Catalog, Category};
pub use request::Request;
pub use resource::Resource;
pub use revision::Revision;
pub use root::Root;

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::transport::{HttpTransport, QueryParams, Transport};

/// Client for one NVUE API endpoint.
///
/// Fields are public so that a revision identifier borrowed from
/// [`revision`](Self::revision) can be passed to a catalog resource in the
/// same expression.
pub struct Client<T = HttpTransport> {
    /// Shared transport.
    transport: Arc<T>,

    /// API base URL (`<root>/nvue_v1`).
    url: String,

    /// Revision handle for staged changes.
    pub revision: Revision<T>,

    /// The whole configuration tree, used for diffs.
    pub root: Root<T>,

    /// Named configuration categories.
    pub catalog: Catalog<T>,
}

impl<T: Transport> Client<T> {
    /// Create a client for the switch at `url` using a custom transport.
    ///
    /// `url` is the root of the device, e.g. `https://leaf01:8765`.
    pub fn with_transport(url: &str, transport: T) -> Result<Self> {
        let url = path::format_base_url(url)?;
        let transport = Arc::new(transport);

        Ok(Self {
            revision: Revision::new(transport.clone(), &url),
            root: Root::new(transport.clone(), &url),
            catalog: Catalog::new(transport.clone(), &url),
            transport,
            url,
        })
    }

    /// API base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The shared transport.
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Resource for a configuration category.
    pub fn resource(&mut self, category: Category) -> &mut Resource<T> {
        &mut self.catalog[category]
    }

    /// Verify the connection to the device.
    ///
    /// Returns the system document (build, hostname, timezone, uptime).
    /// No snapshot is updated.
    pub async fn health(&self) -> Result<Value> {
        let url = path::make_path(&self.url, Category::System.path());
        Request::new(&url, &self.transport)
            .get(QueryParams::new())
            .await
    }

    /// Diff `revision_a` against `revision_b`. See [`Root::diff`].
    pub async fn diff(&mut self, revision_a: &str, revision_b: &str) -> Result<Value> {
        self.root.diff(revision_a, revision_b).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;
    use crate::transport::mock::MockTransport;
    use serde_json::json;

    const ROOT: &str = "https://localhost:8765";

    #[test]
    fn test_format_url() {
        let client = Client::with_transport(ROOT, MockTransport::new()).unwrap();
        assert_eq!(client.url(), "https://localhost:8765/nvue_v1");

        let client =
            Client::with_transport("https://localhost:8765/", MockTransport::new()).unwrap();
        assert_eq!(client.url(), "https://localhost:8765/nvue_v1");
    }

    #[test]
    fn test_resources_share_base() {
        let mut client = Client::with_transport(ROOT, MockTransport::new()).unwrap();
        assert_eq!(client.revision.resource().url(), "https://localhost:8765/nvue_v1/revision");
        assert_eq!(client.root.resource().url(), "https://localhost:8765/nvue_v1");
        assert_eq!(
            client.resource(Category::Role).url(),
            "https://localhost:8765/nvue_v1/system/aaa/role"
        );
        // one owner plus revision, root and 15 catalog resources
        assert_eq!(Arc::strong_count(client.transport()), 18);
    }

    #[tokio::test]
    async fn test_health() {
        let client = Client::with_transport(ROOT, MockTransport::new()).unwrap();
        let system = json!({
            "build": "Cumulus Linux 5.3.0",
            "hostname": "leaf01",
            "timezone": "Etc/UTC",
            "uptime": 175827
        });
        client.transport().push_json(system.clone());

        assert_eq!(client.health().await.unwrap(), system);

        let sent = client.transport().last_request();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://localhost:8765/nvue_v1/system");
        assert!(client.catalog[Category::System].config().is_none());
    }

    #[tokio::test]
    async fn test_change_session() {
        let mut client = Client::with_transport(ROOT, MockTransport::new()).unwrap();
        let transport = client.transport().clone();
        transport.push_json(json!({"1": {"state": "pending"}}));
        transport.push_json(json!({"address": {"10.10.10.4/32": {}}}));
        transport.push_json(json!({"interface": {"lo": {}}}));
        transport.push_json(json!({"state": "apply"}));
        transport.push_json(json!({"state": "applied"}));

        client.revision.create().await.unwrap();
        let rev = client.revision.rev().unwrap();
        client.catalog[Category::Interface]
            .patch(rev, json!({"address": {"10.10.10.4/32": {}}}), "lo/ip")
            .await
            .unwrap();

        let rev = rev.to_string();
        client.diff(&rev, "applied").await.unwrap();
        client.revision.apply().await.unwrap();
        assert!(client.revision.is_applied().await.unwrap());

        let requests = transport.requests();
        let summary: Vec<_> = requests
            .iter()
            .map(|r| (r.method, r.url.trim_start_matches(client.url()).to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Method::Post, "/revision".to_string()),
                (Method::Patch, "/interface/lo/ip".to_string()),
                (Method::Get, String::new()),
                (Method::Patch, "/revision/1".to_string()),
                (Method::Get, "/revision/1".to_string()),
            ]
        );
        assert_eq!(requests[1].query["rev"], "1");
    }
}
