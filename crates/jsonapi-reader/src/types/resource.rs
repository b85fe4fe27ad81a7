//! Materialized resources and relationship linkage.

use super::{JsonApiError, ResourceIdentifier, json_kind};
use crate::primitives::{MEMBER_DATA, MEMBER_LINKS, MEMBER_META};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Untyped attributes, for callers that do not declare an attribute struct.
pub type Attributes = Map<String, Value>;

/// Relationship name -> relationship object.
pub type Relationships = BTreeMap<String, Relationship>;

// =============================================================================
// LINKAGE
// =============================================================================

/// The `data` member of a relationship object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Linkage {
    /// An empty to-one relationship (`"data": null`).
    Null,
    /// A to-one relationship.
    One(ResourceIdentifier),
    /// A to-many relationship, in document order.
    Many(Vec<ResourceIdentifier>),
}

impl Linkage {
    /// Read linkage from the value of a relationship's `data` member.
    pub fn from_value(value: &Value) -> Result<Self, JsonApiError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Object(object) => ResourceIdentifier::from_object(object)
                .map(Self::One)
                .ok_or_else(|| {
                    JsonApiError::MalformedDocument(
                        "relationship linkage is missing type or id".to_string(),
                    )
                }),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    ResourceIdentifier::from_value(item).ok_or_else(|| {
                        JsonApiError::MalformedDocument(
                            "relationship linkage entry is missing type or id".to_string(),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Many),
            other => Err(JsonApiError::MalformedDocument(format!(
                "relationship linkage must be null, an object or an array, found {}",
                json_kind(other)
            ))),
        }
    }

    /// The identifiers held by this linkage, in document order.
    #[must_use]
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        match self {
            Self::Null => &[],
            Self::One(id) => std::slice::from_ref(id),
            Self::Many(ids) => ids,
        }
    }

    /// Check if the linkage holds no identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers().is_empty()
    }

    /// Check if this is a to-many linkage (an array, even an empty one).
    #[must_use]
    pub fn is_to_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

// =============================================================================
// RELATIONSHIP
// =============================================================================

/// A named relationship on a resource.
///
/// A relationship may carry only `links` or `meta`; `data` is then `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Resource linkage, if the `data` member is present.
    pub data: Option<Linkage>,
    /// Raw `links` member.
    pub links: Option<Value>,
    /// Raw `meta` member.
    pub meta: Option<Value>,
}

impl Relationship {
    /// Read a relationship object.
    pub fn from_value(value: &Value) -> Result<Self, JsonApiError> {
        let object = value.as_object().ok_or_else(|| {
            JsonApiError::MalformedDocument(format!(
                "relationship must be an object, found {}",
                json_kind(value)
            ))
        })?;

        let data = object.get(MEMBER_DATA).map(Linkage::from_value).transpose()?;

        Ok(Self {
            data,
            links: present(object, MEMBER_LINKS),
            meta: present(object, MEMBER_META),
        })
    }

    /// Identifiers of the linkage; empty when there is no linkage.
    #[must_use]
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        self.data.as_ref().map(Linkage::identifiers).unwrap_or(&[])
    }

    /// Check if the relationship holds at least one identifier.
    #[must_use]
    pub fn has_identifiers(&self) -> bool {
        !self.identifiers().is_empty()
    }
}

/// Clone a member unless it is absent or `null`.
pub(crate) fn present(object: &Map<String, Value>, member: &str) -> Option<Value> {
    object.get(member).filter(|v| !v.is_null()).cloned()
}

// =============================================================================
// RESOURCE
// =============================================================================

/// A resource materialized from a raw resource object.
///
/// Resources are value objects: every accessor call builds a fresh one,
/// so two resources for the same identifier compare equal by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource<A = Attributes> {
    /// The `(type, id)` pair.
    pub identifier: ResourceIdentifier,
    /// Attributes bound by field name.
    pub attributes: A,
    /// Relationships, if the resource has a `relationships` member.
    pub relationships: Option<Relationships>,
    /// Raw `links` member.
    pub links: Option<Value>,
    /// Raw `meta` member.
    pub meta: Option<Value>,
}

impl<A> Resource<A> {
    /// Look up a relationship by name.
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.as_ref()?.get(name)
    }

    /// Check if the named relationship holds at least one identifier.
    ///
    /// Unlike the adapter's query, this never fails.
    #[must_use]
    pub fn has_relationship(&self, name: &str) -> bool {
        self.relationship(name)
            .is_some_and(Relationship::has_identifiers)
    }

    /// Relationship names in deterministic order.
    pub fn relationship_names(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .flat_map(|rels| rels.keys().map(String::as_str))
    }
}

/// Anything that carries a resource's identity and relationships.
///
/// The adapter's graph queries accept any `ResourceView`, so resources bound
/// to different attribute types can be passed interchangeably.
pub trait ResourceView {
    /// The resource's identifier.
    fn identifier(&self) -> &ResourceIdentifier;

    /// The resource's relationships, `None` if it has no `relationships` member.
    fn relationships(&self) -> Option<&Relationships>;
}

impl<A> ResourceView for Resource<A> {
    fn identifier(&self) -> &ResourceIdentifier {
        &self.identifier
    }

    fn relationships(&self) -> Option<&Relationships> {
        self.relationships.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
