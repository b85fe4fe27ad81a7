//! # Parse Options
//!
//! Per-document reader configuration. `ParseOptions` deserializes from any
//! serde format, so applications can embed it in their own config files.

use crate::JsonApiError;
use crate::primitives::{DEFAULT_MAX_DOCUMENT_BYTES, DEFAULT_MAX_INCLUDED_RESOURCES};
use serde::{Deserialize, Serialize};

/// Limits applied while reading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum size of the raw document text in bytes.
    pub max_document_bytes: usize,
    /// Maximum number of entries in the `included` array.
    pub max_included_resources: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            max_included_resources: DEFAULT_MAX_INCLUDED_RESOURCES,
        }
    }
}

impl ParseOptions {
    /// Options with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the document size limit.
    #[must_use]
    pub fn with_max_document_bytes(mut self, max: usize) -> Self {
        self.max_document_bytes = max;
        self
    }

    /// Override the included resource limit.
    #[must_use]
    pub fn with_max_included_resources(mut self, max: usize) -> Self {
        self.max_included_resources = max;
        self
    }

    /// Reject raw text larger than `max_document_bytes`.
    pub fn check_document_size(&self, len: usize) -> Result<(), JsonApiError> {
        if len > self.max_document_bytes {
            return Err(JsonApiError::LimitExceeded(format!(
                "document size {} bytes exceeds maximum allowed {} bytes",
                len, self.max_document_bytes
            )));
        }
        Ok(())
    }

    /// Reject an `included` array longer than `max_included_resources`.
    pub fn check_included_count(&self, count: usize) -> Result<(), JsonApiError> {
        if count > self.max_included_resources {
            return Err(JsonApiError::LimitExceeded(format!(
                "{} included resources exceed maximum allowed {}",
                count, self.max_included_resources
            )));
        }
        Ok(())
    }
}
