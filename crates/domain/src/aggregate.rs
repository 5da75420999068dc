//! Core aggregate and domain event traits.

use serde::Serialize;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + Send + Sync + Clone + 'static {
    /// Returns the event type name.
    ///
    /// Used for logging, metrics labels, and handler routing.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregates.
///
/// An aggregate is a cluster of domain objects that can be treated as a single unit.
/// The aggregate root ensures consistency of changes being made within the aggregate.
///
/// Aggregates here are rebuilt from persisted entities at the start of each use case:
/// - Transitions consume the aggregate and return the updated value
/// - Structural invariants are checked by `validate_aggregate`
/// - Aggregates never load related data themselves
pub trait Aggregate: Send + Sync + Sized {
    /// The identifier type of this aggregate.
    type Id: Copy + Eq + std::fmt::Display;

    /// The type of errors this aggregate can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's unique identifier.
    fn id(&self) -> Self::Id;

    /// Checks the aggregate's structural invariants.
    ///
    /// Used as a precondition gate before any business rule is evaluated.
    fn validate_aggregate(&self) -> Result<(), Self::Error>;
}

/// Result of a state transition: the updated aggregate plus the events it raised.
///
/// Events are handed back to the caller instead of being queued inside the
/// aggregate; the command handler passes them to a dispatcher after commit.
#[derive(Debug, Clone)]
pub struct Transition<A, E> {
    /// The aggregate after the transition.
    pub aggregate: A,

    /// The events raised by the transition, in the order they occurred.
    pub events: Vec<E>,
}

impl<A, E> Transition<A, E> {
    /// Creates a transition result.
    pub fn new(aggregate: A, events: Vec<E>) -> Self {
        Self { aggregate, events }
    }

    /// Splits the transition into its aggregate and events.
    pub fn into_parts(self) -> (A, Vec<E>) {
        (self.aggregate, self.events)
    }
}
