//! Use-case orchestration.
//!
//! Each use case is a command struct plus a handler. A handler loads state
//! through the persistence gateway, rebuilds aggregates with the
//! [`ModelMapper`](crate::mapping::ModelMapper), runs domain logic, commits
//! one unit of work and dispatches the resulting domain events.

mod employees;
mod paid_time_off_policies;
mod submit_paid_time_off_request;
mod tenants;

pub use employees::{RegisterNewEmployeeCommand, RegisterNewEmployeeHandler};
pub use paid_time_off_policies::{CreatePaidTimeOffPolicyCommand, CreatePaidTimeOffPolicyHandler};
pub use submit_paid_time_off_request::{
    SubmitNewPaidTimeOffRequestCommand, SubmitNewPaidTimeOffRequestHandler,
};
pub use tenants::{
    AddOrUpdateTenantCommand, GetTenantQuery, GetTenantsQuery, TenantHandler,
};

use async_trait::async_trait;

use crate::error::ApplicationError;

/// A request to run one use case.
pub trait Command: Send + Sync {
    /// The view-model returned on success.
    type Response: Send;
}

/// Runs a command to completion.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Response, ApplicationError>;
}
