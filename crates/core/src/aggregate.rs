//! Aggregate root trait for state-mutating domain models.

/// Aggregate root marker + minimal interface.
///
/// This is intentionally small so domain modules can decide how they model
/// state transitions (mutating methods, pure functions, etc.) without bringing
/// in any infrastructure concerns. Aggregates must not perform IO; they
/// mutate owned in-memory state and record domain events describing what
/// happened (see [`crate::PendingEvents`]).
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;
}
