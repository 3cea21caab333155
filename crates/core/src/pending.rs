//! Pending domain events recorded by an aggregate between a mutation and its
//! persistence.
//!
//! Aggregates embed a `PendingEvents<E>` (composition, no base-entity
//! inheritance). Mutating methods call [`PendingEvents::record`]; after the
//! aggregate is persisted, the application layer drains the list with
//! [`PendingEvents::drain`] and hands the events to a dispatcher. Rehydrating
//! an aggregate from storage starts with an empty list.

/// Ordered list of domain events an aggregate has raised but which have not
/// been dispatched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEvents<E> {
    events: Vec<E>,
}

impl<E> PendingEvents<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event to the pending list.
    pub fn record(&mut self, event: E) {
        self.events.push(event);
    }

    /// Remove and return all pending events, leaving the list empty.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    /// Discard all pending events without returning them.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<E> Default for PendingEvents<E> {
    fn default() -> Self {
        Self::new()
    }
}
