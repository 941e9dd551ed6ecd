//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised at the call that caused it: building a line item or adding it to a
/// collection. Export and IO failures live in `boq-export`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (empty description, negative quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An item number is already present in the collection.
    #[error("duplicate item number: {0}")]
    DuplicateItem(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate_item(item_number: impl Into<String>) -> Self {
        Self::DuplicateItem(item_number.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateItem(_))
    }
}
