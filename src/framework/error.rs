//! # Framework Errors
//!
//! This module defines the error types used throughout the resource engine.
//! By centralizing error definitions, every resource reports failures the same way
//! and the hosting layer only needs one mapping to transport status codes.
//!
//! There are two layers:
//!
//! - [`StoreError`]: failures of the keyed state store (absent slot, wrong type,
//!   closed actor channel).
//! - [`FrameworkError`]: the taxonomy surfaced to callers of a
//!   [`ResourceController`](crate::framework::ResourceController).

/// Errors raised by the [`StateStore`](crate::framework::StateStore) client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("No collection stored under key '{0}'")]
    NotFound(String),
    #[error("Collection under key '{0}' is malformed")]
    Malformed(String),
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    /// The store actor caught a fault while running a generator or a modification.
    #[error("Store request for key '{0}' was aborted")]
    Aborted(String),
}

/// Errors reported by resource operations.
///
/// Each variant maps to one transport status class via [`FrameworkError::status_code`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    /// Missing record, or a path token that is not a valid id/uuid shape.
    #[error("{0}")]
    NotFound(String),

    /// Cached state is absent or malformed and lazy generation could not recover it.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// A payload or query parameter failed schema validation.
    #[error("{0}")]
    ValidationError(String),

    /// A filter key used an unknown `field__suffix` lookup.
    #[error("Unsupported lookup: {0}")]
    UnsupportedLookup(String),

    /// A single-record query matched more than one record.
    #[error("{0}")]
    AmbiguousResult(String),
}

impl FrameworkError {
    /// HTTP-equivalent status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            FrameworkError::NotFound(_) => 404,
            FrameworkError::ServiceUnavailable(_) => 503,
            FrameworkError::ValidationError(_)
            | FrameworkError::UnsupportedLookup(_)
            | FrameworkError::AmbiguousResult(_) => 400,
        }
    }

    /// Reinterprets an aborted store write as a client error.
    ///
    /// Create and update report internal faults as 400-class failures instead of
    /// letting them surface raw.
    pub(crate) fn on_write(error: StoreError) -> Self {
        match error {
            StoreError::Aborted(key) => FrameworkError::ValidationError(format!(
                "Unexpected error while writing to '{key}'"
            )),
            other => other.into(),
        }
    }
}

impl From<StoreError> for FrameworkError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(key) => {
                FrameworkError::ServiceUnavailable(format!("{key} data is not initialized."))
            }
            StoreError::Malformed(key) => {
                FrameworkError::ServiceUnavailable(format!("{key} data is malformed."))
            }
            StoreError::Aborted(key) => {
                FrameworkError::ServiceUnavailable(format!("{key} data could not be produced."))
            }
            StoreError::ActorClosed | StoreError::ActorDropped => {
                FrameworkError::ServiceUnavailable(error.to_string())
            }
        }
    }
}
