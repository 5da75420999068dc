//! Domain error types.

use thiserror::Error;

use crate::address::AddressError;
use crate::employee::EmployeeError;
use crate::tenant::TenantError;
use crate::time_off::{PaidTimeOffPolicyError, PaidTimeOffRequestError};

/// Structural validation failures raised by value objects and aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Employee error: {0}")]
    Employee(#[from] EmployeeError),

    #[error("Tenant error: {0}")]
    Tenant(#[from] TenantError),

    #[error("Paid time off policy error: {0}")]
    PaidTimeOffPolicy(#[from] PaidTimeOffPolicyError),

    #[error("Paid time off request error: {0}")]
    PaidTimeOffRequest(#[from] PaidTimeOffRequestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_message() {
        let err: DomainError = EmployeeError::LastNameRequired.into();
        assert_eq!(err.to_string(), "Employee error: Last name is required");

        let err: DomainError = PaidTimeOffRequestError::MissingPolicy.into();
        assert!(matches!(err, DomainError::PaidTimeOffRequest(_)));
    }
}
