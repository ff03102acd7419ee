//! Error types for the Galaxy3D static world index
//!
//! Covers precondition violations on insertion, model registry lookups,
//! wire decoding and the GPU upload boundary.

use std::fmt;

/// Result type for static world operations
pub type Result<T> = std::result::Result<T, Error>;

/// Static world errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Insert position lies outside the root region of the index
    OutOfBounds(String),

    /// Insert position is already occupied by another instance
    DuplicatePosition(String),

    /// Separating two instances would require a split below the configured maximum depth
    DepthLimitExceeded(String),

    /// The model registry has no index for a handle stored in the tree
    UnresolvedModel(String),

    /// The model registry ran out of wire-exact indices
    RegistryFull(String),

    /// Byte blob does not follow the visibility wire layout
    InvalidWireData(String),

    /// A lock guarding shared state was poisoned by a panicking thread
    LockPoisoned(String),

    /// Backend-specific error raised by the GPU buffer primitive
    BackendError(String),
}

impl Error {
    /// Whether this error is an insertion precondition violation
    /// (counted and logged by the index).
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Error::OutOfBounds(_) | Error::DuplicatePosition(_) | Error::DepthLimitExceeded(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfBounds(msg) => write!(f, "Position out of bounds: {}", msg),
            Error::DuplicatePosition(msg) => write!(f, "Duplicate position: {}", msg),
            Error::DepthLimitExceeded(msg) => write!(f, "Depth limit exceeded: {}", msg),
            Error::UnresolvedModel(msg) => write!(f, "Unresolved model: {}", msg),
            Error::RegistryFull(msg) => write!(f, "Model registry full: {}", msg),
            Error::InvalidWireData(msg) => write!(f, "Invalid wire data: {}", msg),
            Error::LockPoisoned(msg) => write!(f, "Lock poisoned: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
