//! # Raw Document Model
//!
//! The generic JSON tree the resolver walks, and the `Document` view over its
//! top-level members.
//!
//! - Tokenizing is delegated to a `JsonReader`; the reader never tokenizes itself
//! - Top-level members are split out once; the document is immutable afterwards
//! - Members are checked for shape only, resource objects are checked lazily

use crate::primitives::{
    MEMBER_DATA, MEMBER_ERRORS, MEMBER_INCLUDED, MEMBER_JSONAPI, MEMBER_LINKS, MEMBER_META,
    MEMBER_VERSION,
};
use crate::types::json_kind;
use crate::{DocumentState, JsonApiError, ResourceIdentifier};
use serde_json::{Map, Value};

// =============================================================================
// JSON READER CAPABILITY
// =============================================================================

/// Turns raw text into a generic JSON tree.
///
/// Readers must be `Send + Sync` and pure.
pub trait JsonReader: Send + Sync {
    /// Parse `text` into a JSON value.
    ///
    /// Returns `JsonApiError::MalformedJson` if the text is not valid JSON.
    fn read(&self, text: &str) -> Result<Value, JsonApiError>;
}

/// The default reader, backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonReader;

impl JsonReader for SerdeJsonReader {
    fn read(&self, text: &str) -> Result<Value, JsonApiError> {
        serde_json::from_str(text).map_err(|e| JsonApiError::MalformedJson(e.to_string()))
    }
}

// =============================================================================
// PRIMARY DATA
// =============================================================================

/// The top-level `data` member.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryData {
    /// `"data": null`, a valid document without a resource.
    Null,
    /// A single resource object.
    Single(Value),
    /// A list of resource objects, in document order.
    Many(Vec<Value>),
}

impl PrimaryData {
    fn from_value(value: Value) -> Result<Self, JsonApiError> {
        match value {
            Value::Null => Ok(Self::Null),
            single @ Value::Object(_) => Ok(Self::Single(single)),
            Value::Array(items) => Ok(Self::Many(items)),
            other => Err(JsonApiError::MalformedDocument(format!(
                "primary data must be null, an object or an array, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Short name of the shape, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Single(_) => "single",
            Self::Many(_) => "list",
        }
    }

    /// Every raw resource object of the primary data, in document order.
    #[must_use]
    pub fn resources(&self) -> &[Value] {
        match self {
            Self::Null => &[],
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(items) => items,
        }
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// A parsed JSON:API document, split into its top-level members.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    data: Option<PrimaryData>,
    included: Vec<Value>,
    links: Option<Value>,
    errors: Option<Vec<Value>>,
    meta: Option<Value>,
    jsonapi: Option<Value>,
}

impl Document {
    /// Read text with the given reader and split it into members.
    pub fn parse(text: &str, reader: &dyn JsonReader) -> Result<Self, JsonApiError> {
        Self::from_value(reader.read(text)?)
    }

    /// Split an already parsed JSON tree into members.
    ///
    /// # Errors
    /// Returns `JsonApiError::MalformedDocument` if:
    /// - The top level is not an object
    /// - Both `data` and `errors` are absent
    /// - `data`, `included` or `errors` have the wrong shape
    pub fn from_value(value: Value) -> Result<Self, JsonApiError> {
        let mut root = match value {
            Value::Object(map) => map,
            other => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "top level must be an object, found {}",
                    json_kind(&other)
                )));
            }
        };

        let data = root
            .remove(MEMBER_DATA)
            .map(PrimaryData::from_value)
            .transpose()?;

        let included = match root.remove(MEMBER_INCLUDED) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "included must be an array, found {}",
                    json_kind(&other)
                )));
            }
        };

        let errors = match root.remove(MEMBER_ERRORS) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "errors must be an array, found {}",
                    json_kind(&other)
                )));
            }
        };

        if data.is_none() && errors.is_none() {
            return Err(JsonApiError::MalformedDocument(
                "document has neither data nor errors".to_string(),
            ));
        }

        Ok(Self {
            data,
            included,
            links: take_present(&mut root, MEMBER_LINKS),
            errors,
            meta: take_present(&mut root, MEMBER_META),
            jsonapi: take_present(&mut root, MEMBER_JSONAPI),
        })
    }

    /// Success or failure, decided by a non-empty `errors` array.
    #[must_use]
    pub fn state(&self) -> DocumentState {
        match &self.errors {
            Some(errors) if !errors.is_empty() => DocumentState::Failure,
            _ => DocumentState::Success,
        }
    }

    /// The primary data member, if present.
    #[must_use]
    pub fn data(&self) -> Option<&PrimaryData> {
        self.data.as_ref()
    }

    /// Find a raw resource object in the primary data by identifier.
    ///
    /// Linear scan; primary data is not indexed.
    #[must_use]
    pub fn primary_resource(&self, identifier: &ResourceIdentifier) -> Option<&Map<String, Value>> {
        self.data()?
            .resources()
            .iter()
            .filter_map(Value::as_object)
            .find(|object| ResourceIdentifier::from_object(object).as_ref() == Some(identifier))
    }

    /// Raw entries of the `included` array; empty if absent.
    #[must_use]
    pub fn included(&self) -> &[Value] {
        &self.included
    }

    /// Raw top-level `links`.
    #[must_use]
    pub fn links(&self) -> Option<&Value> {
        self.links.as_ref()
    }

    /// Raw entries of the `errors` array, if present.
    #[must_use]
    pub fn errors(&self) -> Option<&[Value]> {
        self.errors.as_deref()
    }

    /// Raw top-level `meta`.
    #[must_use]
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// `jsonapi.version`, if the server sent one.
    #[must_use]
    pub fn jsonapi_version(&self) -> Option<&str> {
        self.jsonapi.as_ref()?.get(MEMBER_VERSION)?.as_str()
    }
}

/// Remove a member, treating `null` as absent.
fn take_present(root: &mut Map<String, Value>, member: &str) -> Option<Value> {
    root.remove(member).filter(|v| !v.is_null())
}

// =============================================================================
// TESTS
// =============================================================================
