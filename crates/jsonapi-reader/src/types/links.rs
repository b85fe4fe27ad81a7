//! Typed links.
//!
//! A link is either a plain URI string or a link object with an `href`.
//! `Links` is the default target type for every links scope; callers may
//! bind any other `Deserialize` type instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A link object (`{"href": ..., "meta": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkObject {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// A single named reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link {
    /// A plain URI string.
    Href(String),
    /// A link object.
    Object(LinkObject),
}

impl Link {
    /// The target URI.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Href(href) => href,
            Self::Object(object) => &object.href,
        }
    }

    /// The link's meta, only link objects carry one.
    #[must_use]
    pub fn meta(&self) -> Option<&Value> {
        match self {
            Self::Href(_) => None,
            Self::Object(object) => object.meta.as_ref(),
        }
    }
}

/// A `links` member: link name -> link.
///
/// Links explicitly set to `null` (e.g. `"prev": null` on the first page)
/// are kept as names without a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Option<Link>>);

impl Links {
    /// Look up a link by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Link> {
        self.0.get(name).and_then(Option::as_ref)
    }

    /// The `self` link.
    #[must_use]
    pub fn self_link(&self) -> Option<&Link> {
        self.get("self")
    }

    /// The `related` link.
    #[must_use]
    pub fn related(&self) -> Option<&Link> {
        self.get("related")
    }

    /// Pagination: `first`.
    #[must_use]
    pub fn first(&self) -> Option<&Link> {
        self.get("first")
    }

    /// Pagination: `last`.
    #[must_use]
    pub fn last(&self) -> Option<&Link> {
        self.get("last")
    }

    /// Pagination: `prev`.
    #[must_use]
    pub fn prev(&self) -> Option<&Link> {
        self.get("prev")
    }

    /// Pagination: `next`.
    #[must_use]
    pub fn next(&self) -> Option<&Link> {
        self.get("next")
    }

    /// Link names present in the member, including `null` ones.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of link names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the member has no link names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
