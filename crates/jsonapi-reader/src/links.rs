//! # Links Extractor
//!
//! Reads the `links` member at one of four scopes and binds it to a caller
//! type (usually [`Links`](crate::Links)).
//!
//! Links are optional at every scope: an absent or `null` member yields
//! `Ok(None)`, never an error. Errors are reserved for a scope that does
//! not exist (unknown resource or relationship).

use crate::binder::Binder;
use crate::document::Document;
use crate::index::ResourceIndex;
use crate::primitives::MEMBER_LINKS;
use crate::{JsonApiError, ResourceView};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Where a `links` member is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    /// The document's top-level `links`.
    Root,
    /// A primary resource's `links`.
    Data,
    /// A named relationship's `links`.
    Relationship,
    /// An included resource's `links`.
    Included,
}

/// Links reader over one document.
#[derive(Debug)]
pub struct LinksExtractor<'a, B> {
    document: &'a Document,
    index: &'a ResourceIndex,
    binder: &'a B,
}

impl<'a, B: Binder> LinksExtractor<'a, B> {
    /// Create an extractor. `index` must have been built from `document`.
    #[must_use]
    pub fn new(document: &'a Document, index: &'a ResourceIndex, binder: &'a B) -> Self {
        Self {
            document,
            index,
            binder,
        }
    }

    /// Top-level links.
    pub fn root<L: DeserializeOwned>(&self) -> Result<Option<L>, JsonApiError> {
        self.bind(LinkScope::Root, self.document.links())
    }

    /// Links of a primary resource.
    ///
    /// Returns `JsonApiError::ResourceNotFound` if the resource is not part
    /// of the primary data.
    pub fn data<L: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
    ) -> Result<Option<L>, JsonApiError> {
        let object = self
            .document
            .primary_resource(resource.identifier())
            .ok_or_else(|| JsonApiError::ResourceNotFound(resource.identifier().clone()))?;
        self.bind(LinkScope::Data, object.get(MEMBER_LINKS))
    }

    /// Links of a named relationship on a resource.
    ///
    /// Returns `JsonApiError::RelationshipNotFound` if the relationship is absent.
    pub fn relationship<L: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
        name: &str,
    ) -> Result<Option<L>, JsonApiError> {
        let relationship = resource
            .relationships()
            .and_then(|relationships| relationships.get(name))
            .ok_or_else(|| JsonApiError::RelationshipNotFound {
                resource: resource.identifier().clone(),
                name: name.to_string(),
            })?;
        self.bind(LinkScope::Relationship, relationship.links.as_ref())
    }

    /// Links of an included resource.
    ///
    /// Returns `JsonApiError::IncludedResourceMissing` if the resource is not
    /// in the `included` array.
    pub fn included<L: DeserializeOwned>(
        &self,
        resource: &impl ResourceView,
    ) -> Result<Option<L>, JsonApiError> {
        let object = self
            .index
            .get(self.document, resource.identifier())
            .ok_or_else(|| JsonApiError::IncludedResourceMissing(resource.identifier().clone()))?;
        self.bind(LinkScope::Included, object.get(MEMBER_LINKS))
    }

    fn bind<L: DeserializeOwned>(
        &self,
        scope: LinkScope,
        links: Option<&Value>,
    ) -> Result<Option<L>, JsonApiError> {
        match links {
            None | Some(Value::Null) => {
                tracing::trace!(?scope, "no links at scope");
                Ok(None)
            }
            Some(value) => self.binder.bind(value).map(Some),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::SerdeBinder;
    use crate::options::ParseOptions;
    use crate::resolver::Resolver;
    use crate::{Attributes, Link, Links, Resource};
    use serde_json::json;

    fn fixture() -> (Document, ResourceIndex) {
        let document = Document::from_value(json!({
            "data": {
                "type": "articles",
                "id": "1",
                "relationships": {
                    "author": {
                        "links": {"related": "http://example.com/articles/1/author"},
                        "data": {"type": "people", "id": "9"}
                    },
                    "tags": {"data": []}
                }
            },
            "included": [
                {"type": "people", "id": "9", "links": {"self": "http://example.com/people/9"}}
            ]
        }))
        .expect("document");
        let index = ResourceIndex::build(&document, &ParseOptions::default()).expect("index");
        (document, index)
    }

    #[test]
    fn scopes_resolve_independently() {
        let (doc, index) = fixture();
        let resolver = Resolver::new(&doc, &index, &SerdeBinder);
        let links = LinksExtractor::new(&doc, &index, &SerdeBinder);
        let article: Resource<Attributes> = resolver.primary().expect("article");

        assert!(links.root::<Links>().expect("root").is_none());
        assert!(links.data::<Links>(&article).expect("data").is_none());
        assert!(links.relationship::<Links>(&article, "tags").expect("tags").is_none());

        let author_links: Links = links
            .relationship(&article, "author")
            .expect("relationship")
            .expect("present");
        assert_eq!(
            author_links.related().map(Link::href),
            Some("http://example.com/articles/1/author")
        );
    }

    #[test]
    fn included_links() {
        let (doc, index) = fixture();
        let resolver = Resolver::new(&doc, &index, &SerdeBinder);
        let links = LinksExtractor::new(&doc, &index, &SerdeBinder);
        let article: Resource<Attributes> = resolver.primary().expect("article");
        let author: Resource<Attributes> = resolver.included(&article, "author").expect("author");

        let author_links: Links = links.included(&author).expect("included").expect("present");
        assert_eq!(
            author_links.self_link().map(Link::href),
            Some("http://example.com/people/9")
        );

        assert!(matches!(
            links.data::<Links>(&author),
            Err(JsonApiError::ResourceNotFound(_))
        ));
        assert!(matches!(
            links.included::<Links>(&article),
            Err(JsonApiError::IncludedResourceMissing(_))
        ));
    }

    #[test]
    fn unknown_relationship_is_an_error() {
        let (doc, index) = fixture();
        let resolver = Resolver::new(&doc, &index, &SerdeBinder);
        let links = LinksExtractor::new(&doc, &index, &SerdeBinder);
        let article: Resource<Attributes> = resolver.primary().expect("article");

        assert!(matches!(
            links.relationship::<Links>(&article, "comments"),
            Err(JsonApiError::RelationshipNotFound { .. })
        ));
    }
}
