//! Durability - outcome of the best-effort write that follows every mutation
//!
//! Persistence failures never fail a mutation. The change is applied in
//! memory and the result carries a [`Durability`] so callers can tell
//! "applied" apart from "applied and stored".

use super::error::PersistenceError;

/// Whether a mutation reached the backend
#[derive(Debug)]
pub enum Durability {
    /// The backend accepted the write
    Persisted,
    /// Nothing needed writing (the operation was a no-op)
    Unchanged,
    /// Applied in memory only; the backend write failed
    InMemoryOnly(PersistenceError),
}

impl Durability {
    /// Build from a backend write result, logging the failure case
    pub fn from_write(result: Result<(), PersistenceError>, what: &str) -> Self {
        match result {
            Ok(()) => Durability::Persisted,
            Err(err) => {
                tracing::warn!(error = %err, "failed to persist {}, keeping in memory", what);
                Durability::InMemoryOnly(err)
            }
        }
    }

    /// True unless the backend write failed
    pub fn is_durable(&self) -> bool {
        !matches!(self, Durability::InMemoryOnly(_))
    }

    /// True only when a write actually reached the backend
    pub fn is_persisted(&self) -> bool {
        matches!(self, Durability::Persisted)
    }

    pub fn error(&self) -> Option<&PersistenceError> {
        match self {
            Durability::InMemoryOnly(err) => Some(err),
            _ => None,
        }
    }
}

/// Value produced by a mutation plus its durability
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub durability: Durability,
}

impl<T> Applied<T> {
    pub fn new(value: T, durability: Durability) -> Self {
        Self { value, durability }
    }

    pub fn is_durable(&self) -> bool {
        self.durability.is_durable()
    }
}
