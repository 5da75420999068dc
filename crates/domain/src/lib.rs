//! Domain layer for the org manager.
//!
//! This crate provides the core domain model including:
//! - Aggregate and DomainEvent traits
//! - Address value object with US state and ZIP code validation
//! - Employee, Tenant, PaidTimeOffPolicy, and PaidTimeOffRequest aggregates
//! - PaidTimeOffRequestService for business-rule validation of PTO requests
//! - DomainEventDispatcher for delivering events after a use case commits

pub mod address;
pub mod aggregate;
pub mod employee;
pub mod error;
pub mod events;
pub mod tenant;
pub mod time_off;

pub use address::{Address, AddressError, UsState, ZipCode};
pub use aggregate::{Aggregate, DomainEvent, Transition};
pub use employee::{
    Employee, EmployeeError, EmployeeEvent, EmployeeProfile, EmployeeRegisteredData,
};
pub use error::DomainError;
pub use events::{
    DispatchError, DomainEventDispatcher, DomainEventHandler, EventHandlerError, HandlerFailure,
    LoggingEventHandler,
};
pub use tenant::{Tenant, TenantError};
pub use time_off::{
    PaidTimeOffPolicy, PaidTimeOffPolicyError, PaidTimeOffRequest, PaidTimeOffRequestError,
    PaidTimeOffRequestEvent, PaidTimeOffRequestParts, PaidTimeOffRequestService,
    PaidTimeOffRequestStatus, PaidTimeOffRequestSubmittedData, PaidTimeOffRequestValidationResult,
};
