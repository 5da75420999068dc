//! Delivery of domain events to registered handlers.
//!
//! Transitions return their events; the command handler passes them to a
//! [`DomainEventDispatcher`] once the unit of work has committed.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::aggregate::DomainEvent;

/// Error returned by a single handler.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EventHandlerError(pub String);

impl EventHandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// One failed delivery.
#[derive(Debug)]
pub struct HandlerFailure {
    pub handler: &'static str,
    pub event_type: &'static str,
    pub error: EventHandlerError,
}

/// Every delivery that failed during one [`DomainEventDispatcher::dispatch`] call.
#[derive(Debug, Error)]
#[error("{} event handler(s) failed: {}", failures.len(), summary(failures))]
pub struct DispatchError {
    pub failures: Vec<HandlerFailure>,
}

fn summary(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} on {}: {}", f.handler, f.event_type, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A subscriber to domain events of type `E`.
#[async_trait]
pub trait DomainEventHandler<E: DomainEvent>: Send + Sync {
    /// Returns the handler name, used in logs and failure reports.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    async fn handle(&self, event: &E) -> Result<(), EventHandlerError>;
}

/// Delivers events to every registered handler.
///
/// Events are delivered in order; each event goes to every handler in
/// registration order. A failing handler does not stop delivery to the
/// others, and all failures are returned together.
pub struct DomainEventDispatcher<E: DomainEvent> {
    handlers: Vec<Arc<dyn DomainEventHandler<E>>>,
}

impl<E: DomainEvent> Default for DomainEventDispatcher<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E: DomainEvent> Clone for DomainEventDispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E: DomainEvent> DomainEventDispatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler.
    pub fn register(&mut self, handler: Arc<dyn DomainEventHandler<E>>) {
        self.handlers.push(handler);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_handler(mut self, handler: Arc<dyn DomainEventHandler<E>>) -> Self {
        self.register(handler);
        self
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Delivers the events and returns how many were dispatched.
    #[tracing::instrument(skip(self, events), fields(events = events.len()))]
    pub async fn dispatch(&self, events: Vec<E>) -> Result<usize, DispatchError> {
        let mut failures = Vec::new();
        let count = events.len();

        for event in &events {
            let event_type = event.event_type();
            for handler in &self.handlers {
                if let Err(error) = handler.handle(event).await {
                    tracing::warn!(
                        handler = handler.name(),
                        event_type,
                        error = %error,
                        "domain event handler failed"
                    );
                    failures.push(HandlerFailure {
                        handler: handler.name(),
                        event_type,
                        error,
                    });
                }
            }
            metrics::counter!("domain_events_dispatched_total", "event_type" => event_type)
                .increment(1);
        }

        if failures.is_empty() {
            Ok(count)
        } else {
            Err(DispatchError { failures })
        }
    }
}

/// Writes every event to the log as JSON.
pub struct LoggingEventHandler<E> {
    _marker: PhantomData<fn(E)>,
}

impl<E> Default for LoggingEventHandler<E> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> LoggingEventHandler<E> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<E: DomainEvent> DomainEventHandler<E> for LoggingEventHandler<E> {
    fn name(&self) -> &'static str {
        "LoggingEventHandler"
    }

    async fn handle(&self, event: &E) -> Result<(), EventHandlerError> {
        let payload =
            serde_json::to_string(event).map_err(|e| EventHandlerError::new(e.to_string()))?;
        tracing::info!(event_type = event.event_type(), %payload, "domain event");
        Ok(())
    }
}
