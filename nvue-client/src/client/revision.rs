//! Revision (staged configuration) lifecycle.
//!
//! NVUE stages every change on a server-side revision. A change session is:
//!
//! 1. [`create`](Revision::create) a pending revision (the server names it)
//! 2. patch/delete any resource with that revision as `rev`
//! 3. [`apply`](Revision::apply) the revision
//! 4. poll with [`is_applied`](Revision::is_applied) until it converges
//!
//! # Example
//!
//! ```rust,no_run
//! use nvue_client::{Category, ClientBuilder};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), nvue_client::Error> {
//! let mut client = ClientBuilder::new("https://leaf01:8765")
//!     .username("cumulus")
//!     .password("secret")
//!     .build()?;
//!
//! client.revision.create().await?;
//! let rev = client.revision.rev().unwrap_or_default().to_string();
//!
//! client.catalog[Category::Interface].delete(&rev, "bond21").await?;
//!
//! client.revision.apply().await?;
//! if client.revision.is_applied().await? {
//!     println!("revision {} applied", rev);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde_json::{Value, json};

use super::path::url_safe;
use super::request::Request;
use super::resource::Resource;
use crate::error::{Result, RevisionError};
use crate::transport::{QueryParams, Transport};

/// Endpoint of the revision collection.
pub const REVISION_ENDPOINT: &str = "revision";

/// State reported once a revision is live on the device.
pub const STATE_APPLIED: &str = "applied";

/// Default number of polls made by [`Revision::is_applied`].
pub const DEFAULT_RETRIES: u32 = 5;

/// Default pause between polls made by [`Revision::is_applied`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Handle on one server-side revision.
///
/// The identifier is only ever set from a server acknowledgement:
/// [`create`](Self::create) or [`switch`](Self::switch).
pub struct Revision<T> {
    resource: Resource<T>,
    rev: Option<String>,
}

impl<T: Transport> Revision<T> {
    /// Create a revision handle for the API at `base_url`.
    pub fn new(transport: Arc<T>, base_url: &str) -> Self {
        Self {
            resource: Resource::new(transport, base_url, REVISION_ENDPOINT),
            rev: None,
        }
    }

    /// Current revision identifier.
    pub fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    /// State of the revision in the last fetched snapshot.
    pub fn state(&self) -> Option<&str> {
        self.resource.config()?.get("state")?.as_str()
    }

    /// Last fetched revision document.
    pub fn config(&self) -> Option<&Value> {
        self.resource.config()
    }

    /// The underlying revision collection resource.
    pub fn resource(&mut self) -> &mut Resource<T> {
        &mut self.resource
    }

    fn require_rev(&self, action: &'static str) -> Result<&str> {
        self.rev
            .as_deref()
            .ok_or_else(|| RevisionError::NoRevision { action }.into())
    }

    /// Create a new pending revision.
    ///
    /// The server answers with a single-key document such as
    /// `{"1": {"state": "pending", ...}}`; the key becomes the current
    /// identifier and the whole document the snapshot.
    pub async fn create(&mut self) -> Result<Value> {
        let response = Request::new(self.resource.url(), self.resource.transport())
            .post(QueryParams::new())
            .await?;

        // The new revision is the only key of the document
        let keys = response.as_object().map_or(0, |map| map.len());
        let rev = match response.as_object() {
            Some(map) if keys == 1 => map.keys().next().cloned(),
            _ => None,
        }
        .ok_or(RevisionError::UnexpectedCreateResponse { keys })?;

        debug!("created revision {}", rev);
        self.rev = Some(rev);
        self.resource.set_config(response.clone());

        Ok(response)
    }

    /// Request that the current revision be applied.
    ///
    /// Returns as soon as the server accepted the request; use
    /// [`is_applied`](Self::is_applied) to wait for convergence.
    pub async fn apply(&mut self) -> Result<Value> {
        let rev = self.require_rev("apply")?;
        debug!("applying revision {}", rev);

        let url = self.resource.make_path(&url_safe(rev));
        let payload = json!({"state": "apply", "auto-prompt": {"ays": "ays_yes"}});

        Request::new(&url, self.resource.transport())
            .patch(payload, QueryParams::new())
            .await
    }

    /// Re-fetch the current revision, updating the snapshot.
    pub async fn refresh(&mut self) -> Result<Value> {
        let path = url_safe(self.require_rev("refresh")?);
        self.resource.get(&path).await
    }

    /// Poll the current revision until it reports `applied`.
    ///
    /// Uses [`DEFAULT_RETRIES`] polls spaced by [`DEFAULT_POLL_INTERVAL`].
    pub async fn is_applied(&mut self) -> Result<bool> {
        self.is_applied_with(DEFAULT_RETRIES, DEFAULT_POLL_INTERVAL).await
    }

    /// Poll the current revision up to `retries` times, pausing `interval`
    /// between polls.
    ///
    /// Returns `Ok(false)` once the polls are used up without seeing
    /// `applied`. Transport errors end the loop immediately.
    pub async fn is_applied_with(&mut self, retries: u32, interval: Duration) -> Result<bool> {
        self.require_rev("refresh")?;

        let mut remaining = retries;
        while remaining > 0 {
            let revision = self.refresh().await?;
            let state = revision.get("state").and_then(Value::as_str);
            debug!(
                "revision {:?} state {:?} ({} polls left)",
                self.rev,
                state,
                remaining - 1
            );

            if state == Some(STATE_APPLIED) {
                return Ok(true);
            }

            remaining -= 1;
            if remaining > 0 {
                tokio::time::sleep(interval).await;
            }
        }

        warn!(
            "revision {:?} not applied after {} polls (last state {:?})",
            self.rev,
            retries,
            self.state()
        );
        Ok(false)
    }

    /// Point this handle at an existing revision.
    ///
    /// The target is fetched first; if the fetch fails the identifier is
    /// left unchanged.
    pub async fn switch(&mut self, rev: impl Into<String>) -> Result<Value> {
        let rev = rev.into();
        let revision = self.resource.get(&url_safe(&rev)).await?;
        debug!("switched to revision {}", rev);
        self.rev = Some(rev);
        Ok(revision)
    }
}
