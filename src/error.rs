// src/error.rs
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by the swipe and profile stores.
///
/// Every variant keeps the backend's diagnostic text untouched so the
/// calling layer can decide how to present it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The upsert could not be committed (connectivity, constraint, malformed input).
    #[error("write rejected by store: {0}")]
    Write(String),

    /// A primary or fallback read failed outright.
    #[error("read failed: {0}")]
    Read(String),

    /// The swipe was refused before reaching the store.
    #[error("invalid swipe: {0}")]
    InvalidSwipe(String),
}

impl StoreError {
    pub fn message(&self) -> &str {
        match self {
            StoreError::Write(msg)
            | StoreError::Read(msg)
            | StoreError::InvalidSwipe(msg) => msg,
        }
    }

    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        StoreError::Write(err.to_string())
    }

    pub(crate) fn read(err: impl std::fmt::Display) -> Self {
        StoreError::Read(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_keeps_backend_text() {
        let err = StoreError::write("duplicate key value violates unique constraint");
        assert_eq!(
            err.message(),
            "duplicate key value violates unique constraint"
        );
        assert_eq!(
            err.to_string(),
            "write rejected by store: duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn test_read_and_write_are_distinct() {
        assert_ne!(StoreError::read("timeout"), StoreError::write("timeout"));
    }
}
