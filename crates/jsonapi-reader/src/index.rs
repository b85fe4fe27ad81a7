//! # Resource Identity Index
//!
//! `(type, id)` -> position of the raw object in the root `included` array.
//!
//! - Built once per document, read-only afterwards
//! - Flat walk of `included` only; nested relationship objects are not indexed
//! - Primary data is NOT indexed, lookups fall back to it in the resolver

use crate::document::Document;
use crate::options::ParseOptions;
use crate::{JsonApiError, ResourceIdentifier};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Index over the `included` array of one document.
///
/// Uses `BTreeMap` for deterministic ordering; `order` keeps the identifiers
/// in document order for listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceIndex {
    /// Identifier -> position in `Document::included()`.
    positions: BTreeMap<ResourceIdentifier, usize>,
    /// Unique identifiers in document order.
    order: Vec<ResourceIdentifier>,
}

impl ResourceIndex {
    /// Build the index for a document.
    ///
    /// # Errors
    /// - `JsonApiError::LimitExceeded` if `included` is longer than allowed
    /// - `JsonApiError::MalformedDocument` if an entry is not an object or
    ///   lacks `type` or `id`
    pub fn build(document: &Document, options: &ParseOptions) -> Result<Self, JsonApiError> {
        let included = document.included();
        options.check_included_count(included.len())?;

        let mut index = Self::default();

        for (position, entry) in included.iter().enumerate() {
            let identifier = ResourceIdentifier::from_value(entry).ok_or_else(|| {
                JsonApiError::MalformedDocument(format!(
                    "included entry {} is missing type or id",
                    position
                ))
            })?;

            if index.positions.contains_key(&identifier) {
                tracing::debug!(
                    resource = %identifier,
                    position,
                    "duplicate included resource ignored"
                );
                continue;
            }

            index.positions.insert(identifier.clone(), position);
            index.order.push(identifier);
        }

        tracing::debug!(entries = index.order.len(), "included index built");
        Ok(index)
    }

    /// Position of an identifier in the `included` array.
    #[must_use]
    pub fn position(&self, identifier: &ResourceIdentifier) -> Option<usize> {
        self.positions.get(identifier).copied()
    }

    /// Check if an identifier is included.
    #[must_use]
    pub fn contains(&self, identifier: &ResourceIdentifier) -> bool {
        self.positions.contains_key(identifier)
    }

    /// Look up the raw included object for an identifier.
    ///
    /// `document` must be the document the index was built from.
    #[must_use]
    pub fn get<'d>(
        &self,
        document: &'d Document,
        identifier: &ResourceIdentifier,
    ) -> Option<&'d Map<String, Value>> {
        let position = self.position(identifier)?;
        document.included().get(position)?.as_object()
    }

    /// Included identifiers in document order.
    pub fn identifiers(&self) -> impl Iterator<Item = &ResourceIdentifier> {
        self.order.iter()
    }

    /// Included identifiers of one type, in document order.
    pub fn identifiers_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a ResourceIdentifier> + 'a {
        self.order.iter().filter(move |id| id.is_type(resource_type))
    }

    /// Number of indexed resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing is included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(included: Value) -> Document {
        Document::from_value(json!({"data": null, "included": included})).expect("document")
    }

    #[test]
    fn index_maps_identifiers_to_objects() {
        let doc = document(json!([
            {"type": "people", "id": "9", "attributes": {"firstName": "Dan"}},
            {"type": "comments", "id": "5"}
        ]));
        let index = ResourceIndex::build(&doc, &ParseOptions::default()).expect("index");

        assert_eq!(index.len(), 2);
        let person = index
            .get(&doc, &ResourceIdentifier::new("people", "9"))
            .expect("person");
        assert_eq!(person.get("attributes"), Some(&json!({"firstName": "Dan"})));
        assert!(!index.contains(&ResourceIdentifier::new("people", "2")));
    }

    #[test]
    fn index_rejects_entry_without_type() {
        let doc = document(json!([{"id": "9"}]));
        let result = ResourceIndex::build(&doc, &ParseOptions::default());
        assert!(matches!(result, Err(JsonApiError::MalformedDocument(_))));
    }

    #[test]
    fn index_rejects_non_object_entry() {
        let doc = document(json!(["people/9"]));
        let result = ResourceIndex::build(&doc, &ParseOptions::default());
        assert!(matches!(result, Err(JsonApiError::MalformedDocument(_))));
    }

    #[test]
    fn index_keeps_first_duplicate() {
        let doc = document(json!([
            {"type": "people", "id": "9", "attributes": {"n": 1}},
            {"type": "people", "id": "9", "attributes": {"n": 2}}
        ]));
        let index = ResourceIndex::build(&doc, &ParseOptions::default()).expect("index");

        assert_eq!(index.len(), 1);
        assert_eq!(index.position(&ResourceIdentifier::new("people", "9")), Some(0));
    }

    #[test]
    fn index_preserves_document_order() {
        let doc = document(json!([
            {"type": "people", "id": "9"},
            {"type": "comments", "id": "12"},
            {"type": "comments", "id": "5"}
        ]));
        let index = ResourceIndex::build(&doc, &ParseOptions::default()).expect("index");

        let comments: Vec<_> = index.identifiers_of_type("comments").map(|i| i.id()).collect();
        assert_eq!(comments, vec!["12", "5"]);
    }

    #[test]
    fn index_enforces_included_limit() {
        let doc = document(json!([
            {"type": "people", "id": "1"},
            {"type": "people", "id": "2"}
        ]));
        let options = ParseOptions::default().with_max_included_resources(1);
        let result = ResourceIndex::build(&doc, &options);
        assert!(matches!(result, Err(JsonApiError::LimitExceeded(_))));
    }
}
