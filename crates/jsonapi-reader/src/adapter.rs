//! # Response Adapter
//!
//! The single entry point: parses a document once, builds its included
//! index, decides success or failure, and answers every query from there.
//!
//! ## State
//!
//! The adapter is either `Success` or `Failure`, decided once in `parse`.
//! It never changes afterwards; every accessor is a pure read.
//!
//! Resource-graph queries (data, relationships, included resources, scoped
//! links) fail with `JsonApiError::FailureDocument` on failure documents.
//! Root links, meta and version are readable in both states.

use crate::binder::{Binder, SerdeBinder};
use crate::document::{Document, JsonReader, PrimaryData, SerdeJsonReader};
use crate::failures::ErrorCollection;
use crate::index::ResourceIndex;
use crate::links::LinksExtractor;
use crate::options::ParseOptions;
use crate::resolver::Resolver;
use crate::{
    Attributes, DocumentState, ErrorObject, JsonApiError, Resource, ResourceIdentifier,
    ResourceView,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// A parsed JSON:API response whose primary data binds to `T`.
///
/// `B` is the binder used for attributes, links, meta and errors.
#[derive(Debug)]
pub struct ResponseAdapter<T = Attributes, B = SerdeBinder> {
    document: Document,
    index: ResourceIndex,
    binder: B,
    state: DocumentState,
    _data: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ResponseAdapter<T, SerdeBinder> {
    /// Parse raw text with the default reader, binder and limits.
    ///
    /// # Errors
    /// - `JsonApiError::MalformedJson` if the text is not valid JSON
    /// - `JsonApiError::MalformedDocument` if the document has neither
    ///   `data` nor `errors`, or an included entry lacks `type`/`id`
    /// - `JsonApiError::LimitExceeded` if a default limit is exceeded
    pub fn parse(text: &str) -> Result<Self, JsonApiError> {
        Self::parse_with(text, &SerdeJsonReader, SerdeBinder, &ParseOptions::default())
    }

    /// Build an adapter from an already parsed JSON tree.
    pub fn from_value(value: Value) -> Result<Self, JsonApiError> {
        Self::from_value_with(value, SerdeBinder, &ParseOptions::default())
    }
}

impl<T: DeserializeOwned, B: Binder> ResponseAdapter<T, B> {
    /// Parse raw text with a caller-supplied reader, binder and limits.
    pub fn parse_with(
        text: &str,
        reader: &dyn JsonReader,
        binder: B,
        options: &ParseOptions,
    ) -> Result<Self, JsonApiError> {
        options.check_document_size(text.len())?;
        Self::from_document(Document::parse(text, reader)?, binder, options)
    }

    /// Build an adapter from a JSON tree with a caller-supplied binder and limits.
    pub fn from_value_with(
        value: Value,
        binder: B,
        options: &ParseOptions,
    ) -> Result<Self, JsonApiError> {
        Self::from_document(Document::from_value(value)?, binder, options)
    }

    fn from_document(
        document: Document,
        binder: B,
        options: &ParseOptions,
    ) -> Result<Self, JsonApiError> {
        let index = ResourceIndex::build(&document, options)?;
        let state = document.state();

        tracing::debug!(
            %state,
            primary = document.data().map(PrimaryData::kind).unwrap_or("absent"),
            included = index.len(),
            "document parsed"
        );

        Ok(Self {
            document,
            index,
            binder,
            state,
            _data: PhantomData,
        })
    }

    fn resolver(&self) -> Resolver<'_, B> {
        Resolver::new(&self.document, &self.index, &self.binder)
    }

    fn links_extractor(&self) -> LinksExtractor<'_, B> {
        LinksExtractor::new(&self.document, &self.index, &self.binder)
    }

    /// Fail with `FailureDocument` unless the document describes resources.
    fn require_success(&self) -> Result<(), JsonApiError> {
        if self.state.is_success() {
            Ok(())
        } else {
            Err(JsonApiError::FailureDocument)
        }
    }

    // =========================================================================
    // STATE
    // =========================================================================

    /// True iff the document has no non-empty `errors` array.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }

    /// Success or failure.
    #[must_use]
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// The underlying raw document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The included index.
    #[must_use]
    pub fn index(&self) -> &ResourceIndex {
        &self.index
    }

    // =========================================================================
    // PRIMARY DATA
    // =========================================================================

    /// The single primary resource.
    ///
    /// # Errors
    /// - `JsonApiError::FailureDocument` on a failure document
    /// - `JsonApiError::NoData` if primary data is absent or `null`
    /// - `JsonApiError::TypeMismatch` if primary data is a list
    pub fn data(&self) -> Result<Resource<T>, JsonApiError> {
        self.require_success()?;
        self.resolver().primary()
    }

    /// The primary resources, in document order.
    ///
    /// # Errors
    /// - `JsonApiError::FailureDocument` on a failure document
    /// - `JsonApiError::NoData` if primary data is absent or `null`
    /// - `JsonApiError::TypeMismatch` if primary data is a single object
    pub fn data_list(&self) -> Result<Vec<Resource<T>>, JsonApiError> {
        self.require_success()?;
        self.resolver().primary_list()
    }

    /// Identifiers of the primary data, in document order. Empty on failure.
    #[must_use]
    pub fn primary_identifiers(&self) -> Vec<ResourceIdentifier> {
        self.document
            .data()
            .map(PrimaryData::resources)
            .unwrap_or(&[])
            .iter()
            .filter_map(ResourceIdentifier::from_value)
            .collect()
    }

    /// Identifiers of every indexed included resource, in document order.
    #[must_use]
    pub fn included_identifiers(&self) -> Vec<ResourceIdentifier> {
        self.index.identifiers().cloned().collect()
    }

    // =========================================================================
    // RELATIONSHIPS
    // =========================================================================

    /// Check if the named relationship on `resource` holds at least one identifier.
    ///
    /// # Errors
    /// - `JsonApiError::FailureDocument` on a failure document
    /// - `JsonApiError::MissingRelationships` if the resource has no
    ///   `relationships` member
    pub fn has_relationships(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<bool, JsonApiError> {
        self.require_success()?;
        self.resolver().has_relationship(resource, name)
    }

    /// Same as [`has_relationships`](Self::has_relationships) on the single
    /// primary resource.
    ///
    /// List primary data has no single implicit resource and fails with
    /// `JsonApiError::TypeMismatch`.
    pub fn has_primary_relationships(&self, name: &str) -> Result<bool, JsonApiError> {
        self.require_success()?;
        let resolver = self.resolver();
        let primary: Resource<Value> = resolver.primary()?;
        resolver.has_relationship(&primary, name)
    }

    /// Resolve a to-one relationship to a resource bound as `R`.
    ///
    /// # Errors
    /// - `JsonApiError::FailureDocument` on a failure document
    /// - `JsonApiError::RelationshipNotFound` if the relationship is absent
    /// - `JsonApiError::AmbiguousCardinality` if it holds several identifiers
    /// - `JsonApiError::IncludedResourceMissing` if the target is not in the document
    pub fn included<R: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<Resource<R>, JsonApiError> {
        self.require_success()?;
        self.resolver().included(resource, name)
    }

    /// Resolve a to-many relationship, preserving linkage order.
    ///
    /// All-or-nothing: any unresolvable identifier fails the whole call with
    /// `JsonApiError::IncludedResourceMissing`.
    pub fn included_collection<R: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<Vec<Resource<R>>, JsonApiError> {
        self.require_success()?;
        self.resolver().included_collection(resource, name)
    }

    /// Every included resource of one type, in document order.
    pub fn included_of_type<R: DeserializeOwned>(
        &self,
        resource_type: &str,
    ) -> Result<Vec<Resource<R>>, JsonApiError> {
        self.require_success()?;
        self.resolver().included_of_type(resource_type)
    }

    /// Any resource of the document (included or primary) by identifier.
    pub fn resource<R: DeserializeOwned>(
        &self,
        identifier: &ResourceIdentifier,
    ) -> Result<Resource<R>, JsonApiError> {
        self.require_success()?;
        self.resolver().resolve(identifier)
    }

    // =========================================================================
    // LINKS
    // =========================================================================

    /// Top-level links. Readable on failure documents too.
    pub fn links<L: DeserializeOwned>(&self) -> Result<Option<L>, JsonApiError> {
        self.links_extractor().root()
    }

    /// Links of a primary resource.
    pub fn data_links<L: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
    ) -> Result<Option<L>, JsonApiError> {
        self.require_success()?;
        self.links_extractor().data(resource)
    }

    /// Links of a named relationship on a resource.
    pub fn relationship_links<L: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<Option<L>, JsonApiError> {
        self.require_success()?;
        self.links_extractor().relationship(resource, name)
    }

    /// Links of an included resource.
    pub fn included_links<L: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
    ) -> Result<Option<L>, JsonApiError> {
        self.require_success()?;
        self.links_extractor().included(resource)
    }

    // =========================================================================
    // ERRORS, META, VERSION
    // =========================================================================

    /// Error objects of a failure document; malformed entries are skipped.
    ///
    /// Returns `JsonApiError::NotAFailure` on a success document.
    pub fn errors(&self) -> Result<Vec<ErrorObject>, JsonApiError> {
        self.errors_as()
    }

    /// Error entries bound to a caller type.
    pub fn errors_as<E: DeserializeOwned>(&self) -> Result<Vec<E>, JsonApiError> {
        if self.state.is_success() {
            return Err(JsonApiError::NotAFailure);
        }
        let entries = self.document.errors().unwrap_or(&[]);
        Ok(ErrorCollection::extract(entries, &self.binder))
    }

    /// Top-level meta bound to `M`.
    pub fn meta<M: DeserializeOwned>(&self) -> Result<Option<M>, JsonApiError> {
        self.document
            .meta()
            .map(|meta| self.binder.bind(meta))
            .transpose()
    }

    /// `jsonapi.version`, if present.
    #[must_use]
    pub fn jsonapi_version(&self) -> Option<&str> {
        self.document.jsonapi_version()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Links;

    const ERROR_DOC: &str = r#"{"errors": [{"status": "422", "title": "Invalid"}]}"#;

    #[test]
    fn adapter_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<ResponseAdapter>();
    }

    #[test]
    fn failure_document_blocks_graph_queries() {
        let adapter: ResponseAdapter = ResponseAdapter::parse(ERROR_DOC).expect("parse");

        assert!(!adapter.is_success());
        assert_eq!(adapter.state(), DocumentState::Failure);
        assert!(matches!(adapter.data(), Err(JsonApiError::FailureDocument)));
        assert!(matches!(
            adapter.has_primary_relationships("author"),
            Err(JsonApiError::FailureDocument)
        ));
        assert_eq!(adapter.errors().expect("errors").len(), 1);
    }

    #[test]
    fn error_entry_with_numeric_code_is_kept() {
        let adapter: ResponseAdapter = ResponseAdapter::parse(
            r#"{"errors": [{"status": "500", "code": 42, "title": "Server"}]}"#,
        )
        .expect("parse");

        let errors = adapter.errors().expect("errors");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code.as_deref(), Some("42"));
        assert_eq!(errors[0].title.as_deref(), Some("Server"));
    }

    #[test]
    fn success_document_has_no_errors() {
        let adapter: ResponseAdapter =
            ResponseAdapter::parse(r#"{"data": null}"#).expect("parse");

        assert!(adapter.is_success());
        assert!(matches!(adapter.data(), Err(JsonApiError::NoData)));
        assert!(matches!(adapter.errors(), Err(JsonApiError::NotAFailure)));
    }

    #[test]
    fn primary_relationships_on_list_is_type_mismatch() {
        let adapter: ResponseAdapter = ResponseAdapter::parse(
            r#"{"data": [{"type": "articles", "id": "1", "relationships": {}}]}"#,
        )
        .expect("parse");

        assert!(matches!(
            adapter.has_primary_relationships("author"),
            Err(JsonApiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn root_links_readable_on_failure() {
        let adapter: ResponseAdapter = ResponseAdapter::parse(
            r#"{"errors": [{"status": "404"}], "links": {"about": "http://example.com/help"}}"#,
        )
        .expect("parse");

        let links: Links = adapter.links().expect("links").expect("present");
        assert!(links.get("about").is_some());
    }

    #[test]
    fn document_size_limit() {
        let options = ParseOptions::default().with_max_document_bytes(8);
        let result = ResponseAdapter::<Attributes>::parse_with(
            r#"{"data": null}"#,
            &SerdeJsonReader,
            SerdeBinder,
            &options,
        );
        assert!(matches!(result, Err(JsonApiError::LimitExceeded(_))));
    }

    #[test]
    fn meta_and_version() {
        let adapter: ResponseAdapter = ResponseAdapter::parse(
            r#"{"data": [], "meta": {"total": 0}, "jsonapi": {"version": "1.1"}}"#,
        )
        .expect("parse");

        let meta: Value = adapter.meta().expect("meta").expect("present");
        assert_eq!(meta["total"], 0);
        assert_eq!(adapter.jsonapi_version(), Some("1.1"));
        assert!(adapter.data_list().expect("list").is_empty());
    }
}
