//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined
//! entirely by their attribute values. Two value objects with the same values are
//! considered equal.

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// construct a new instance with the new values. This keeps them safe to share
/// freely (across aggregates, across threads) and lets them behave like
/// primitives in maps and sets.
///
/// - **Value Object**: no identity (two value objects with same values are equal)
/// - **Entity**: has identity (two entities with same ID are the same entity)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Validate that a required string field is non-blank.
///
/// Returns the trimmed-length-checked input unchanged; whitespace-only input
/// counts as blank. The error names the offending field.
pub fn require_non_blank(field: &str, value: impl Into<String>) -> DomainResult<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(value)
}
