//! # Document Primitives
//!
//! Member names of the JSON:API wire format and the default reader limits.
//!
//! Member names are fixed by the JSON:API format and compiled in; limits are
//! defaults for [`ParseOptions`](crate::ParseOptions) and may be overridden
//! per document.

// =============================================================================
// TOP-LEVEL MEMBERS
// =============================================================================

/// Primary data.
pub const MEMBER_DATA: &str = "data";

/// Side-loaded resources.
pub const MEMBER_INCLUDED: &str = "included";

/// Error objects of a failure document.
pub const MEMBER_ERRORS: &str = "errors";

/// Links, at any scope.
pub const MEMBER_LINKS: &str = "links";

/// Non-standard meta information, at any scope.
pub const MEMBER_META: &str = "meta";

/// Server implementation information (`{"version": "1.1"}`).
pub const MEMBER_JSONAPI: &str = "jsonapi";

// =============================================================================
// RESOURCE MEMBERS
// =============================================================================

/// Resource type.
pub const MEMBER_TYPE: &str = "type";

/// Resource id.
pub const MEMBER_ID: &str = "id";

/// Resource attributes.
pub const MEMBER_ATTRIBUTES: &str = "attributes";

/// Resource relationships.
pub const MEMBER_RELATIONSHIPS: &str = "relationships";

/// Version inside the `jsonapi` member.
pub const MEMBER_VERSION: &str = "version";

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Default maximum size of a document's raw text (64 MB).
///
/// Checked before the text is handed to the JSON reader.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;

/// Default maximum number of entries in the `included` array.
pub const DEFAULT_MAX_INCLUDED_RESOURCES: usize = 100_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_non_zero() {
        assert!(DEFAULT_MAX_DOCUMENT_BYTES > 0);
        assert!(DEFAULT_MAX_INCLUDED_RESOURCES > 0);
    }
}
