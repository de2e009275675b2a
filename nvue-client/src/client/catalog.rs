//! Named configuration categories.
//!
//! Every category is the same [`Resource`] bound to a different endpoint,
//! so the catalog is data: one [`Category`] per endpoint.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::resource::Resource;
use crate::error::{ConfigError, Error};
use crate::transport::Transport;

/// Configuration categories exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Router,
    Platform,
    Bridge,
    Mlag,
    Evpn,
    Qos,
    Interface,
    Service,
    System,
    Vrf,
    Nve,
    Acl,
    Aaa,
    User,
    Role,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 15] = [
        Category::Router,
        Category::Platform,
        Category::Bridge,
        Category::Mlag,
        Category::Evpn,
        Category::Qos,
        Category::Interface,
        Category::Service,
        Category::System,
        Category::Vrf,
        Category::Nve,
        Category::Acl,
        Category::Aaa,
        Category::User,
        Category::Role,
    ];

    /// Short name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Router => "router",
            Category::Platform => "platform",
            Category::Bridge => "bridge",
            Category::Mlag => "mlag",
            Category::Evpn => "evpn",
            Category::Qos => "qos",
            Category::Interface => "interface",
            Category::Service => "service",
            Category::System => "system",
            Category::Vrf => "vrf",
            Category::Nve => "nve",
            Category::Acl => "acl",
            Category::Aaa => "aaa",
            Category::User => "user",
            Category::Role => "role",
        }
    }

    /// Endpoint below the API base.
    pub fn path(&self) -> &'static str {
        match self {
            Category::Aaa => "system/aaa",
            Category::User => "system/aaa/user",
            Category::Role => "system/aaa/role",
            other => other.name(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ConfigError::InvalidConfig {
                    message: format!("Unknown configuration category '{}'", s),
                }
                .into()
            })
    }
}

/// One resource per [`Category`], all sharing one transport.
pub struct Catalog<T> {
    resources: [Resource<T>; 15],
}

impl<T: Transport> Catalog<T> {
    /// Build the catalog for the API at `base_url`.
    pub fn new(transport: Arc<T>, base_url: &str) -> Self {
        Self {
            resources: Category::ALL
                .map(|category| Resource::new(transport.clone(), base_url, category.path())),
        }
    }

    /// Look up a resource by category name.
    pub fn by_name(&mut self, name: &str) -> Option<&mut Resource<T>> {
        let category = name.parse::<Category>().ok()?;
        Some(&mut self[category])
    }

    /// Iterate over all categories and their resources.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Resource<T>)> {
        Category::ALL.into_iter().zip(self.resources.iter())
    }
}

impl<T> Index<Category> for Catalog<T> {
    type Output = Resource<T>;

    fn index(&self, category: Category) -> &Resource<T> {
        &self.resources[category as usize]
    }
}

impl<T> IndexMut<Category> for Catalog<T> {
    fn index_mut(&mut self, category: Category) -> &mut Resource<T> {
        &mut self.resources[category as usize]
    }
}
