//! Caller-facing error taxonomy.
//!
//! Translates domain and repository failures into the kinds an outer
//! surface (HTTP, CLI, queue consumer) can map onto its own responses.
//! Each kind exposes a stable machine-readable `code()`.

use thiserror::Error;

use vendora_core::DomainError;
use vendora_sales::RepositoryError;

/// Result type for application handlers.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("business rule violation: {0}")]
    BusinessRule(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(String),
}

impl AppError {
    /// Stable error code for callers that match on kind rather than message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::BusinessRule(_) => "business_rule_violation",
            AppError::InvalidState(_) => "invalid_state",
            AppError::Conflict(_) => "conflict",
            AppError::Repository(_) => "repository_error",
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::BusinessRule(msg) => AppError::BusinessRule(msg),
            DomainError::InvalidState(msg) => AppError::InvalidState(msg),
            DomainError::InvalidId(msg) => AppError::Validation(msg),
            DomainError::NotFound => AppError::NotFound("resource not found".into()),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateSaleNumber(number) => {
                AppError::Conflict(format!("sale number '{number}' already exists"))
            }
            RepositoryError::Storage(msg) => AppError::Repository(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_onto_matching_kinds() {
        let cases: [(DomainError, &str); 4] = [
            (DomainError::validation("x"), "validation_error"),
            (DomainError::business_rule("x"), "business_rule_violation"),
            (DomainError::invalid_state("x"), "invalid_state"),
            (DomainError::not_found(), "not_found"),
        ];
        for (domain, code) in cases {
            assert_eq!(AppError::from(domain).code(), code);
        }
    }

    #[test]
    fn duplicate_number_becomes_conflict() {
        let err = AppError::from(RepositoryError::DuplicateSaleNumber("S-1".into()));
        assert_eq!(err.code(), "conflict");
        assert!(err.to_string().contains("S-1"));
    }
}
