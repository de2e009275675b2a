//! # nvue-client
//!
//! Async client library for the NVUE switch configuration REST API.
//!
//! The device configuration is a tree of objects (interfaces, routers,
//! bridges, VRFs, ACLs, ...) served under `<root>/nvue_v1`. Any subtree can
//! be read with a GET; changes are staged on a server-side revision and
//! only take effect once the revision is applied.
//!
//! ## Features
//!
//! - Path-addressed get/patch/post/delete on any configuration subtree
//! - Revision workflow: create, apply, poll for convergence, switch
//! - Structural diff between two revisions
//! - Pluggable [`Transport`](transport::Transport), reqwest by default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nvue_client::{Category, ClientBuilder};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nvue_client::Error> {
//!     let mut client = ClientBuilder::new("https://leaf01:8765")
//!         .username("cumulus")
//!         .password("secret")
//!         .build()?;
//!
//!     println!("{}", client.health().await?);
//!
//!     client.revision.create().await?;
//!     let rev = client.revision.rev().unwrap_or_default().to_string();
//!
//!     client.catalog[Category::Interface]
//!         .patch(&rev, json!({"address": {"10.10.10.4/32": {}}}), "lo/ip")
//!         .await?;
//!
//!     println!("{}", client.diff(&rev, "applied").await?);
//!
//!     client.revision.apply().await?;
//!     assert!(client.revision.is_applied().await?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod transport;

// Re-export main types for convenience
pub use client::{Catalog, Category, Client, ClientBuilder, Resource, Revision, Root};
pub use error::Error;
pub use transport::{ClientConfig, HttpTransport, QueryParams, Transport};
