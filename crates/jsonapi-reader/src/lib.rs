//! # jsonapi-reader
//!
//! Typed, queryable reader for JSON:API documents - THE LOGIC.
//!
//! This crate turns a JSON:API response into a navigable resource graph:
//! primary data, relationship linkage, side-loaded `included` resources,
//! links at every scope and error collections. Callers never walk raw JSON.
//!
//! ## Data Flow
//!
//! ```text
//! raw text ─► JsonReader ─► Document ─► ResourceIndex (built once)
//!                                │              │
//!                                └──► Resolver ◄┘ ─► Resource<T>, Links, ErrorObject
//! ```
//!
//! ## Example
//!
//! ```
//! use jsonapi_reader::{Links, Resource, ResponseAdapter};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Article {
//!     title: String,
//! }
//!
//! #[derive(Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Person {
//!     first_name: String,
//! }
//!
//! let text = r#"{
//!     "data": {
//!         "type": "articles", "id": "1",
//!         "attributes": {"title": "JSON:API paints my bikeshed!"},
//!         "relationships": {"author": {"data": {"type": "people", "id": "9"}}}
//!     },
//!     "included": [
//!         {"type": "people", "id": "9", "attributes": {"firstName": "Dan"}}
//!     ]
//! }"#;
//!
//! let adapter = ResponseAdapter::<Article>::parse(text)?;
//! let article = adapter.data()?;
//! assert_eq!(article.attributes.title, "JSON:API paints my bikeshed!");
//!
//! let author: Resource<Person> = adapter.included(&article, "author")?;
//! assert_eq!(author.attributes.first_name, "Dan");
//! assert!(adapter.links::<Links>()?.is_none());
//! # Ok::<(), jsonapi_reader::JsonApiError>(())
//! ```
//!
//! ## Constraints
//!
//! - Pure and synchronous: no I/O, no async, no global state
//! - Read-only: documents are never serialized back
//! - Permissive: fails only on structural absence of graph elements
//! - The adapter is immutable after parsing and `Send + Sync`

// =============================================================================
// MODULES
// =============================================================================

pub mod adapter;
pub mod binder;
pub mod document;
pub mod failures;
pub mod index;
pub mod links;
pub mod options;
pub mod primitives;
pub mod resolver;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Attributes, DocumentState, ErrorObject, ErrorSource, JsonApiError, Link, LinkObject, Linkage,
    Links, Relationship, Relationships, Resource, ResourceIdentifier, ResourceView,
};

// =============================================================================
// RE-EXPORTS: Reader Engine
// =============================================================================

pub use adapter::ResponseAdapter;
pub use binder::{Binder, SerdeBinder};
pub use document::{Document, JsonReader, PrimaryData, SerdeJsonReader};
pub use failures::ErrorCollection;
pub use index::ResourceIndex;
pub use links::{LinkScope, LinksExtractor};
pub use options::ParseOptions;
pub use resolver::Resolver;
