//! # Core Type Definitions
//!
//! This module contains the typed views the reader hands out:
//! - Resource identity (`ResourceIdentifier`)
//! - Materialized resources and relationship linkage (`Resource`, `Relationship`, `Linkage`)
//! - Links (`Link`, `Links`)
//! - Error objects from failure documents (`ErrorObject`, `ErrorSource`)
//! - Error types (`JsonApiError`)
//!
//! ## Determinism Guarantees
//!
//! - Identifiers implement `Ord` so they can key a `BTreeMap`
//! - Relationship maps are `BTreeMap`s, iteration order is stable across runs

mod error_object;
mod links;
mod resource;

pub use error_object::{ErrorObject, ErrorSource};
pub use links::{Link, LinkObject, Links};
pub use resource::{Attributes, Linkage, Relationship, Relationships, Resource, ResourceView};

pub(crate) use resource::present;

use crate::primitives::{MEMBER_ID, MEMBER_TYPE};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RESOURCE IDENTIFIER
// =============================================================================

/// The `(type, id)` pair naming a resource within a document.
///
/// Equality is exact and case-sensitive on both fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    resource_type: String,
    id: String,
}

impl ResourceIdentifier {
    /// Create a new identifier.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Read the identifier of a raw resource (or resource identifier) object.
    ///
    /// Returns `None` if `type` is missing or not a string, or if `id` is
    /// missing or neither a string nor a number. Numeric ids are normalized
    /// to their decimal string.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let resource_type = object.get(MEMBER_TYPE)?.as_str()?;
        let id = match object.get(MEMBER_ID)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(Self::new(resource_type, id))
    }

    /// Same as [`from_object`](Self::from_object), for any JSON value.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().and_then(Self::from_object)
    }

    /// The resource type.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The resource id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Check whether this identifier names a resource of the given type.
    #[must_use]
    pub fn is_type(&self, resource_type: &str) -> bool {
        self.resource_type == resource_type
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

// =============================================================================
// DOCUMENT STATE
// =============================================================================

/// Outcome of a parsed document.
///
/// Decided exactly once when the document is parsed, by the presence of a
/// non-empty top-level `errors` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    /// The document describes resources.
    Success,
    /// The document carries errors; no resource graph exists.
    Failure,
}

impl DocumentState {
    /// Check if this is the success state.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

// =============================================================================
// LENIENT STRING FIELDS
// =============================================================================

/// Deserialize an optional string that some servers send as a number or boolean.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string, number or boolean, found {}",
            json_kind(&other)
        ))),
    }
}

/// Short name of a JSON value's kind, for error messages.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while reading a JSON:API document.
///
/// - No silent failures; the only leniency is skipping malformed entries
///   of the `errors` array
/// - No partial results for relationship resolution
/// - The reader never panics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonApiError {
    /// The input text is not valid JSON.
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// The JSON is structurally not a usable JSON:API document.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Single resource requested from list primary data, or the reverse.
    #[error("Type mismatch: expected {expected} primary data, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A success document without primary data.
    #[error("Document has no primary data")]
    NoData,

    /// A resource-graph query was made against a failure document.
    #[error("Failure document: no resource graph exists")]
    FailureDocument,

    /// The resource has no `relationships` member at all.
    #[error("Resource {0} has no relationships member")]
    MissingRelationships(ResourceIdentifier),

    /// The named relationship is absent or carries no linkage.
    #[error("Relationship '{name}' not found on {resource}")]
    RelationshipNotFound {
        resource: ResourceIdentifier,
        name: String,
    },

    /// A to-one lookup hit a relationship holding several identifiers.
    #[error("Relationship '{name}' on {resource} holds {count} identifiers, expected one")]
    AmbiguousCardinality {
        resource: ResourceIdentifier,
        name: String,
        count: usize,
    },

    /// The identifier resolves to neither `included` nor primary data.
    #[error("Included resource missing: {0}")]
    IncludedResourceMissing(ResourceIdentifier),

    /// The resource is not part of the document's primary data.
    #[error("Resource not found in primary data: {0}")]
    ResourceNotFound(ResourceIdentifier),

    /// Errors were requested from a success document.
    #[error("Document is not a failure document")]
    NotAFailure,

    /// A JSON value could not be bound to the requested type.
    #[error("Binding error for {target}: {reason}")]
    Binding { target: String, reason: String },

    /// A configured size limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_equality_is_case_sensitive() {
        let a = ResourceIdentifier::new("articles", "1");
        let b = ResourceIdentifier::new("Articles", "1");
        assert_ne!(a, b);
        assert_eq!(a, ResourceIdentifier::new("articles", "1"));
    }

    #[test]
    fn identifier_from_object() {
        let value = json!({"type": "people", "id": "9", "attributes": {}});
        let id = ResourceIdentifier::from_value(&value).expect("identifier");
        assert_eq!(id.resource_type(), "people");
        assert_eq!(id.id(), "9");
    }

    #[test]
    fn identifier_accepts_numeric_id() {
        let value = json!({"type": "people", "id": 9});
        let id = ResourceIdentifier::from_value(&value).expect("identifier");
        assert_eq!(id.id(), "9");
    }

    #[test]
    fn identifier_requires_type_and_id() {
        assert!(ResourceIdentifier::from_value(&json!({"id": "1"})).is_none());
        assert!(ResourceIdentifier::from_value(&json!({"type": "articles"})).is_none());
        assert!(ResourceIdentifier::from_value(&json!({"type": 3, "id": "1"})).is_none());
        assert!(ResourceIdentifier::from_value(&json!("articles/1")).is_none());
    }

    #[test]
    fn identifier_display() {
        assert_eq!(
            ResourceIdentifier::new("comments", "12").to_string(),
            "comments/12"
        );
    }

    #[test]
    fn identifier_ordering_is_type_then_id() {
        let mut ids = vec![
            ResourceIdentifier::new("people", "1"),
            ResourceIdentifier::new("comments", "5"),
            ResourceIdentifier::new("comments", "12"),
        ];
        ids.sort();
        assert_eq!(ids[0], ResourceIdentifier::new("comments", "12"));
        assert_eq!(ids[2], ResourceIdentifier::new("people", "1"));
    }
}
