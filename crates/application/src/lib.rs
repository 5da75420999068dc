//! Application layer for the org manager.
//!
//! This crate provides:
//! - View-models exchanged with the presentation layer
//! - The [`ModelMapper`] registry converting between entities, aggregates
//!   and view-models
//! - Command handlers that orchestrate each use case
//! - A [`Clock`] abstraction so "today" can be fixed in tests

pub mod clock;
pub mod commands;
pub mod error;
pub mod mapping;
pub mod view_models;

pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{
    AddOrUpdateTenantCommand, Command, CommandHandler, CreatePaidTimeOffPolicyCommand,
    CreatePaidTimeOffPolicyHandler, GetTenantQuery, GetTenantsQuery, RegisterNewEmployeeCommand,
    RegisterNewEmployeeHandler, SubmitNewPaidTimeOffRequestCommand,
    SubmitNewPaidTimeOffRequestHandler, TenantHandler,
};
pub use error::{ApplicationError, MappingError};
pub use mapping::{Mapper, ModelMapper};
pub use view_models::{
    AddressViewModel, EmployeeViewModel, PaidTimeOffPolicyViewModel, PaidTimeOffRequestViewModel,
    SubmitNewPaidTimeOffRequestViewModel, TenantViewModel,
};
