//! # Error Collection Extractor
//!
//! Maps the top-level `errors` array of a failure document into typed error
//! objects. Entries are mapped independently: an entry that is not an object,
//! or that does not bind, is skipped with a warning instead of failing the
//! whole collection.

use crate::binder::Binder;
use crate::types::json_kind;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The error collection extractor.
pub struct ErrorCollection;

impl ErrorCollection {
    /// Extract every well-formed entry, in document order.
    pub fn extract<E: DeserializeOwned, B: Binder>(entries: &[Value], binder: &B) -> Vec<E> {
        entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                if !entry.is_object() {
                    tracing::warn!(
                        position,
                        kind = json_kind(entry),
                        "skipping error entry that is not an object"
                    );
                    return None;
                }

                match binder.bind(entry) {
                    Ok(error) => Some(error),
                    Err(e) => {
                        tracing::warn!(position, error = %e, "skipping malformed error entry");
                        None
                    }
                }
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
