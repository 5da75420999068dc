//! Paid time off policies, requests, and request validation.

mod events;
mod policy;
mod request;
mod service;
mod status;

pub use events::{PaidTimeOffRequestEvent, PaidTimeOffRequestSubmittedData};
pub use policy::PaidTimeOffPolicy;
pub use request::{PaidTimeOffRequest, PaidTimeOffRequestParts};
pub use service::{PaidTimeOffRequestService, PaidTimeOffRequestValidationResult};
pub use status::PaidTimeOffRequestStatus;

use chrono::NaiveDate;
use thiserror::Error;

/// Structural errors on a paid time off request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaidTimeOffRequestError {
    /// No tenant is set on the request.
    #[error("Tenant ID is required")]
    MissingTenant,

    /// The employee the request is for is not set.
    #[error("Employee the request is for is required")]
    MissingForEmployee,

    /// The submitting employee is not set.
    #[error("Submitting employee is required")]
    MissingSubmittedBy,

    /// No paid time off policy is attached.
    #[error("Paid time off policy is required")]
    MissingPolicy,

    /// Start date is after end date.
    #[error("Invalid date range: {start_date} is after {end_date}")]
    InvalidDateRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },

    /// An attached employee or policy belongs to a different tenant.
    #[error("{what} belongs to a different tenant than the request")]
    TenantMismatch { what: &'static str },

    /// The attached policy is not the one the employee is assigned.
    #[error("Paid time off policy does not match the employee's policy")]
    PolicyMismatch,

    /// The request is not in the expected status.
    #[error("Invalid state transition: cannot {action} from {current_state} status")]
    InvalidStateTransition {
        current_state: PaidTimeOffRequestStatus,
        action: &'static str,
    },
}

/// Errors that can occur while constructing a paid time off policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaidTimeOffPolicyError {
    /// Policy name is blank.
    #[error("Policy name is required")]
    NameRequired,
}
