//! Error types for the resource core
//!
//! Two families:
//! - [`ResourceError`]: rejected operations (bad input, bad import document).
//!   The collection is left untouched.
//! - [`PersistenceError`]: the backend could not read or write. Never
//!   surfaced as a failure of the operation itself, see
//!   [`Durability`](super::durability::Durability).

use thiserror::Error;

/// A rejected mutation or import
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Bad user input (e.g. empty name)
    #[error("validation error: {0}")]
    Validation(String),

    /// Import document is not valid JSON, or an element is not an item
    #[error("parse error: {0}")]
    Parse(String),

    /// Import document parsed but has the wrong top-level shape
    #[error("shape error: {0}")]
    Shape(String),

    /// Collection could not be serialized
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Backend read/write failure
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Backend refused the operation (quota, disabled storage)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ResourceError::Validation("name required".to_string());
        assert_eq!(err.to_string(), "validation error: name required");
    }

    #[test]
    fn test_shape_display() {
        let err = ResourceError::Shape("expected array".to_string());
        assert_eq!(err.to_string(), "shape error: expected array");
    }

    #[test]
    fn test_persistence_display() {
        let err = PersistenceError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "storage unavailable: quota exceeded");
    }
}
