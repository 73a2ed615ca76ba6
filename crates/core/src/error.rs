//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures (validation,
/// state rules, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A malformed input value (empty name, negative amount/quantity, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is illegal in the aggregate's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A variant with the same normalized SKU already exists on the product.
    #[error("duplicate variant: {0}")]
    DuplicateVariant(String),

    /// An identifier was invalid (nil value or parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced resource was not found.
    #[error("not found")]
    NotFound,

    /// A uniqueness violation surfaced at commit time (duplicate sku/slug per tenant).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn duplicate_variant(msg: impl Into<String>) -> Self {
        Self::DuplicateVariant(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
