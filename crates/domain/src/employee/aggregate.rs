//! Employee aggregate implementation.

use chrono::{DateTime, NaiveDate, Utc};
use common::{EmployeeId, PaidTimeOffPolicyId, TenantId, UserAccountId};

use crate::address::Address;
use crate::aggregate::{Aggregate, Transition};

use super::{EmployeeError, EmployeeEvent, EmployeeRegisteredData};

/// Personal details of an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
    pub hire_date: NaiveDate,
}

/// Employee aggregate root.
///
/// Belongs to exactly one tenant. An employee must reference a paid time off
/// policy before any of their requests can be validated against a balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    tenant_id: TenantId,
    user_account_id: Option<UserAccountId>,
    profile: EmployeeProfile,
    paid_time_off_policy_id: Option<PaidTimeOffPolicyId>,
}

impl Aggregate for Employee {
    type Id = EmployeeId;
    type Error = EmployeeError;

    fn aggregate_type() -> &'static str {
        "Employee"
    }

    fn id(&self) -> EmployeeId {
        self.id
    }

    fn validate_aggregate(&self) -> Result<(), EmployeeError> {
        if self.profile.first_name.trim().is_empty() {
            return Err(EmployeeError::FirstNameRequired);
        }
        if self.profile.last_name.trim().is_empty() {
            return Err(EmployeeError::LastNameRequired);
        }
        Ok(())
    }
}

impl Employee {
    /// Creates an employee in a tenant. Names are trimmed and must not be blank.
    pub fn new(
        id: EmployeeId,
        tenant_id: TenantId,
        mut profile: EmployeeProfile,
    ) -> Result<Self, EmployeeError> {
        profile.first_name = profile.first_name.trim().to_string();
        profile.last_name = profile.last_name.trim().to_string();

        let employee = Self {
            id,
            tenant_id,
            user_account_id: None,
            profile,
            paid_time_off_policy_id: None,
        };
        employee.validate_aggregate()?;
        Ok(employee)
    }

    /// Links the employee to the user account they sign in with.
    pub fn with_user_account(mut self, user_account_id: Option<UserAccountId>) -> Self {
        self.user_account_id = user_account_id;
        self
    }

    /// Assigns the paid time off policy that governs this employee.
    pub fn with_paid_time_off_policy_id(mut self, policy_id: Option<PaidTimeOffPolicyId>) -> Self {
        self.paid_time_off_policy_id = policy_id;
        self
    }

    /// Registers a newly hired employee, raising `EmployeeRegistered`.
    pub fn register(
        self,
        registered_at: DateTime<Utc>,
    ) -> Result<Transition<Self, EmployeeEvent>, EmployeeError> {
        self.validate_aggregate()?;

        let event = EmployeeEvent::EmployeeRegistered(EmployeeRegisteredData {
            employee_id: self.id,
            tenant_id: self.tenant_id,
            user_account_id: self.user_account_id,
            full_name: self.full_name(),
            registered_at,
        });

        Ok(Transition::new(self, vec![event]))
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn user_account_id(&self) -> Option<UserAccountId> {
        self.user_account_id
    }

    pub fn paid_time_off_policy_id(&self) -> Option<PaidTimeOffPolicyId> {
        self.paid_time_off_policy_id
    }

    pub fn profile(&self) -> &EmployeeProfile {
        &self.profile
    }

    pub fn first_name(&self) -> &str {
        &self.profile.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.profile.last_name
    }

    pub fn address(&self) -> &Address {
        &self.profile.address
    }

    pub fn hire_date(&self) -> NaiveDate {
        self.profile.hire_date
    }

    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }
}
