//! # Type Binder
//!
//! Maps a JSON value onto a caller's type by field name.
//!
//! The resolver hands attributes, links, meta and error objects to a `Binder`
//! and never inspects the target type itself. Unknown JSON fields must be
//! tolerated so documents from newer servers still bind.

use crate::JsonApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Binds JSON values into typed values.
pub trait Binder: Send + Sync {
    /// Bind `value` into a `T`.
    ///
    /// Returns `JsonApiError::Binding` if the value does not fit `T`.
    fn bind<T: DeserializeOwned>(&self, value: &Value) -> Result<T, JsonApiError>;
}

/// The default binder, backed by serde's derived `Deserialize`.
///
/// Field names follow the target's serde attributes (`rename`,
/// `rename_all`); unknown fields are ignored unless the target opts into
/// `deny_unknown_fields`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeBinder;

impl Binder for SerdeBinder {
    fn bind<T: DeserializeOwned>(&self, value: &Value) -> Result<T, JsonApiError> {
        T::deserialize(value).map_err(|e| JsonApiError::Binding {
            target: std::any::type_name::<T>().to_string(),
            reason: e.to_string(),
        })
    }
}
