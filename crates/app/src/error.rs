//! Application-level error envelope.

use thiserror::Error;

use mercato_core::DomainError;

use crate::repository::StoreError;

/// The single failure value returned to callers: a stable code plus a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(format!("{what}.not_found"), format!("{what} not found"))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let code = match &err {
            DomainError::InvalidArgument(_) => "invalid_argument",
            DomainError::InvalidState(_) => "invalid_state",
            DomainError::DuplicateVariant(_) => "duplicate_variant",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::NotFound => "not_found",
            DomainError::Conflict(_) => "conflict",
        };
        Self::new(code, err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::Conflict(_) => "conflict",
            StoreError::Backend(_) => "storage_error",
        };
        Self::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_stable_codes() {
        let err: AppError = DomainError::duplicate_variant("SKU X").into();
        assert_eq!(err.code, "duplicate_variant");

        let err: AppError = DomainError::invalid_state("already discontinued").into();
        assert_eq!(err.code, "invalid_state");
    }

    #[test]
    fn store_conflicts_map_to_conflict() {
        let err: AppError = StoreError::Conflict("duplicate sku".into()).into();
        assert_eq!(err.code, "conflict");
    }
}
