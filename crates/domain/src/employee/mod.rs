//! Employee aggregate and related types.

mod aggregate;
mod events;

pub use aggregate::{Employee, EmployeeProfile};
pub use events::{EmployeeEvent, EmployeeRegisteredData};

use thiserror::Error;

/// Errors that can occur during employee operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeError {
    /// First name is blank.
    #[error("First name is required")]
    FirstNameRequired,

    /// Last name is blank.
    #[error("Last name is required")]
    LastNameRequired,
}
