//! # Resource Graph Resolver
//!
//! Materializes typed resources and answers relationship queries over one
//! document and its included index.
//!
//! - Resources are re-derived from the raw document on every call, never cached
//! - Identifiers resolve against the included index first, then primary data
//! - No partial results: a to-many resolution fails if any member is missing

use crate::binder::Binder;
use crate::document::{Document, PrimaryData};
use crate::index::ResourceIndex;
use crate::primitives::{MEMBER_ATTRIBUTES, MEMBER_LINKS, MEMBER_META, MEMBER_RELATIONSHIPS};
use crate::types::{json_kind, present};
use crate::{
    JsonApiError, Relationship, Relationships, Resource, ResourceIdentifier, ResourceView,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Read-only view over a document, its index and a binder.
///
/// Cheap to construct; holds borrows only.
#[derive(Debug)]
pub struct Resolver<'a, B> {
    document: &'a Document,
    index: &'a ResourceIndex,
    binder: &'a B,
}

impl<'a, B: Binder> Resolver<'a, B> {
    /// Create a resolver. `index` must have been built from `document`.
    #[must_use]
    pub fn new(document: &'a Document, index: &'a ResourceIndex, binder: &'a B) -> Self {
        Self {
            document,
            index,
            binder,
        }
    }

    // =========================================================================
    // MATERIALIZATION
    // =========================================================================

    /// Materialize a raw resource object.
    ///
    /// Attributes are bound into `A` (a missing `attributes` member binds from
    /// `{}`); relationships, links and meta are attached alongside.
    pub fn materialize<A: DeserializeOwned>(&self, raw: &Value) -> Result<Resource<A>, JsonApiError> {
        let object = raw.as_object().ok_or_else(|| {
            JsonApiError::MalformedDocument(format!(
                "resource must be an object, found {}",
                json_kind(raw)
            ))
        })?;
        self.materialize_object(object)
    }

    fn materialize_object<A: DeserializeOwned>(
        &self,
        object: &Map<String, Value>,
    ) -> Result<Resource<A>, JsonApiError> {
        let identifier = ResourceIdentifier::from_object(object).ok_or_else(|| {
            JsonApiError::MalformedDocument("resource is missing type or id".to_string())
        })?;

        let attributes = match object.get(MEMBER_ATTRIBUTES) {
            Some(value) if !value.is_null() => self.binder.bind(value),
            _ => self.binder.bind(&Value::Object(Map::new())),
        }
        .map_err(|e| match e {
            JsonApiError::Binding { target, reason } => JsonApiError::Binding {
                target: format!("{} attributes of {}", target, identifier),
                reason,
            },
            other => other,
        })?;

        let relationships = match object.get(MEMBER_RELATIONSHIPS) {
            None | Some(Value::Null) => None,
            Some(Value::Object(members)) => Some(
                members
                    .iter()
                    .map(|(name, rel)| Ok((name.clone(), Relationship::from_value(rel)?)))
                    .collect::<Result<Relationships, JsonApiError>>()?,
            ),
            Some(other) => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "relationships of {} must be an object, found {}",
                    identifier,
                    json_kind(other)
                )));
            }
        };

        Ok(Resource {
            identifier,
            attributes,
            relationships,
            links: present(object, MEMBER_LINKS),
            meta: present(object, MEMBER_META),
        })
    }

    // =========================================================================
    // PRIMARY DATA
    // =========================================================================

    /// The single primary resource.
    ///
    /// # Errors
    /// - `JsonApiError::NoData` if primary data is absent or `null`
    /// - `JsonApiError::TypeMismatch` if primary data is a list
    pub fn primary<A: DeserializeOwned>(&self) -> Result<Resource<A>, JsonApiError> {
        match self.document.data() {
            None | Some(PrimaryData::Null) => Err(JsonApiError::NoData),
            Some(PrimaryData::Single(raw)) => self.materialize(raw),
            Some(PrimaryData::Many(_)) => Err(JsonApiError::TypeMismatch {
                expected: "single",
                found: "list",
            }),
        }
    }

    /// The primary resources, in document order.
    ///
    /// # Errors
    /// - `JsonApiError::NoData` if primary data is absent or `null`
    /// - `JsonApiError::TypeMismatch` if primary data is a single object
    pub fn primary_list<A: DeserializeOwned>(&self) -> Result<Vec<Resource<A>>, JsonApiError> {
        match self.document.data() {
            None | Some(PrimaryData::Null) => Err(JsonApiError::NoData),
            Some(PrimaryData::Single(_)) => Err(JsonApiError::TypeMismatch {
                expected: "list",
                found: "single",
            }),
            Some(PrimaryData::Many(items)) => items.iter().map(|raw| self.materialize(raw)).collect(),
        }
    }

    // =========================================================================
    // RELATIONSHIPS
    // =========================================================================

    /// Check if the named relationship holds at least one identifier.
    ///
    /// Returns `JsonApiError::MissingRelationships` if the resource has no
    /// `relationships` member at all.
    pub fn has_relationship(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<bool, JsonApiError> {
        let relationships = resource
            .relationships()
            .ok_or_else(|| JsonApiError::MissingRelationships(resource.identifier().clone()))?;

        Ok(relationships
            .get(name)
            .is_some_and(Relationship::has_identifiers))
    }

    /// Find a named relationship on a resource.
    pub fn relationship<'r>(
        &self,
        resource: &'r impl ResourceView,
        name: &str,
    ) -> Result<&'r Relationship, JsonApiError> {
        resource
            .relationships()
            .and_then(|relationships| relationships.get(name))
            .ok_or_else(|| JsonApiError::RelationshipNotFound {
                resource: resource.identifier().clone(),
                name: name.to_string(),
            })
    }

    /// Resolve a to-one relationship to its resource.
    ///
    /// # Errors
    /// - `JsonApiError::RelationshipNotFound` if the relationship is absent or
    ///   has no identifier
    /// - `JsonApiError::AmbiguousCardinality` if it holds several identifiers
    /// - `JsonApiError::IncludedResourceMissing` if the identifier is neither
    ///   included nor primary data
    pub fn included<R: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<Resource<R>, JsonApiError> {
        let relationship = self.relationship(resource, name)?;

        match relationship.identifiers() {
            [] => Err(JsonApiError::RelationshipNotFound {
                resource: resource.identifier().clone(),
                name: name.to_string(),
            }),
            [identifier] => {
                tracing::debug!(
                    resource = %resource.identifier(),
                    relationship = name,
                    target = %identifier,
                    "resolving to-one relationship"
                );
                self.resolve(identifier)
            }
            identifiers => Err(JsonApiError::AmbiguousCardinality {
                resource: resource.identifier().clone(),
                name: name.to_string(),
                count: identifiers.len(),
            }),
        }
    }

    /// Resolve a to-many relationship, preserving linkage order.
    ///
    /// All-or-nothing: fails with `JsonApiError::IncludedResourceMissing` on
    /// the first identifier that cannot be resolved.
    pub fn included_collection<R: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<Vec<Resource<R>>, JsonApiError> {
        let relationship = self.relationship(resource, name)?;
        let identifiers = relationship.identifiers();

        tracing::debug!(
            resource = %resource.identifier(),
            relationship = name,
            count = identifiers.len(),
            "resolving to-many relationship"
        );

        identifiers.iter().map(|id| self.resolve(id)).collect()
    }

    /// Every included resource of one type, in document order.
    pub fn included_of_type<R: DeserializeOwned>(
        &self,
        resource_type: &str,
    ) -> Result<Vec<Resource<R>>, JsonApiError> {
        self.index
            .identifiers_of_type(resource_type)
            .map(|id| self.resolve(id))
            .collect()
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Find the raw object for an identifier: included first, then primary data.
    #[must_use]
    pub fn lookup(&self, identifier: &ResourceIdentifier) -> Option<&'a Map<String, Value>> {
        self.index
            .get(self.document, identifier)
            .or_else(|| self.document.primary_resource(identifier))
    }

    /// Materialize the resource an identifier points to.
    pub fn resolve<R: DeserializeOwned>(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<Resource<R>, JsonApiError> {
        let object = self
            .lookup(identifier)
            .ok_or_else(|| JsonApiError::IncludedResourceMissing(identifier.clone()))?;
        self.materialize_object(object)
    }
}

// =============================================================================
// TESTS
// =============================================================================
