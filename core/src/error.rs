//! Error types for todo data-access models.
//!
//! # Design
//! "Not found" is not an error here: lookups return `Ok(None)` and the HTTP
//! layer turns that into a 404 itself. Everything in `ModelError` is a
//! failure the controller forwards untouched to the error handler.

use thiserror::Error;

/// Failures raised by a `TodoModel`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The document (or patch) did not pass schema validation.
    #[error("{message}")]
    Validation { message: String },

    /// An identifier could not be interpreted as a document id.
    #[error("Cast to id failed for value \"{value}\"")]
    Cast { value: String },

    /// The storage backend failed (connection lost, collection missing, ...).
    #[error("{message}")]
    Backend { message: String },
}

impl ModelError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn cast(value: impl Into<String>) -> Self {
        Self::Cast {
            value: value.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// `true` when the failure was caused by the request rather than the
    /// backend.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Cast { .. })
    }
}
