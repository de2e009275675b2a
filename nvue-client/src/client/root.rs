//! API root resource and revision diffs.

use std::sync::Arc;

use serde_json::Value;

use super::resource::{REV_PARAM, Resource};
use crate::error::Result;
use crate::transport::{QueryParams, Transport};

/// Revision name the server resolves to the running configuration.
pub const APPLIED_REVISION: &str = "applied";

/// The whole configuration tree at the API base.
pub struct Root<T> {
    resource: Resource<T>,
}

impl<T: Transport> Root<T> {
    /// Create the root resource for the API at `base_url`.
    pub fn new(transport: Arc<T>, base_url: &str) -> Self {
        Self {
            resource: Resource::new(transport, base_url, ""),
        }
    }

    /// The underlying resource, for plain CRUD on the whole tree.
    pub fn resource(&mut self) -> &mut Resource<T> {
        &mut self.resource
    }

    /// Last fetched document (configuration or diff).
    pub fn config(&self) -> Option<&Value> {
        self.resource.config()
    }

    /// Diff `revision_a` against `revision_b`.
    ///
    /// `revision_a` is normally the pending revision about to be applied and
    /// `revision_b` the running configuration ([`APPLIED_REVISION`]) or
    /// another pending revision. Removed fields come back as `null`.
    pub async fn diff(&mut self, revision_a: &str, revision_b: &str) -> Result<Value> {
        self.diff_with(revision_a, revision_b, QueryParams::new()).await
    }

    /// [`diff`](Self::diff) with additional endpoint parameters.
    ///
    /// Entries in `params` override the `rev`, `diff` and `filled` defaults.
    pub async fn diff_with(
        &mut self,
        revision_a: &str,
        revision_b: &str,
        params: QueryParams,
    ) -> Result<Value> {
        let mut query = QueryParams::new();
        query.insert(REV_PARAM.to_string(), revision_a.to_string());
        query.insert("diff".to_string(), revision_b.to_string());
        query.insert("filled".to_string(), "false".to_string());
        query.extend(params);

        self.resource.get_with("", query).await
    }
}
