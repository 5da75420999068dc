//! Paid time off request aggregate implementation.

use chrono::{DateTime, NaiveDate, Utc};
use common::{EmployeeId, PaidTimeOffPolicyId, PaidTimeOffRequestId, TenantId};

use crate::aggregate::{Aggregate, Transition};
use crate::employee::Employee;

use super::{
    PaidTimeOffPolicy, PaidTimeOffRequestError, PaidTimeOffRequestEvent,
    PaidTimeOffRequestStatus, PaidTimeOffRequestSubmittedData,
};

/// Persisted state of a request, used to rebuild the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidTimeOffRequestParts {
    pub id: PaidTimeOffRequestId,
    pub tenant_id: TenantId,
    pub for_employee_id: EmployeeId,
    pub submitted_by_id: EmployeeId,
    pub paid_time_off_policy_id: PaidTimeOffPolicyId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PaidTimeOffRequestStatus,
    pub notes: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Paid time off request aggregate root.
///
/// A new request starts as a `Draft` with only its dates. The command handler
/// attaches the employee it is for, the submitting employee and the policy,
/// then calls [`validate_aggregate`](Aggregate::validate_aggregate) before
/// asking the domain service for a verdict.
///
/// Requests rebuilt from storage carry identifiers only; the attached
/// employees and policy are loaded separately when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidTimeOffRequest {
    id: PaidTimeOffRequestId,
    tenant_id: Option<TenantId>,
    for_employee_id: Option<EmployeeId>,
    submitted_by_id: Option<EmployeeId>,
    paid_time_off_policy_id: Option<PaidTimeOffPolicyId>,
    for_employee: Option<Employee>,
    submitted_by: Option<Employee>,
    paid_time_off_policy: Option<PaidTimeOffPolicy>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: PaidTimeOffRequestStatus,
    notes: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
}

impl Aggregate for PaidTimeOffRequest {
    type Id = PaidTimeOffRequestId;
    type Error = PaidTimeOffRequestError;

    fn aggregate_type() -> &'static str {
        "PaidTimeOffRequest"
    }

    fn id(&self) -> PaidTimeOffRequestId {
        self.id
    }

    fn validate_aggregate(&self) -> Result<(), PaidTimeOffRequestError> {
        if self.start_date > self.end_date {
            return Err(PaidTimeOffRequestError::InvalidDateRange {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }

        let tenant_id = self
            .tenant_id
            .ok_or(PaidTimeOffRequestError::MissingTenant)?;
        if self.for_employee_id.is_none() {
            return Err(PaidTimeOffRequestError::MissingForEmployee);
        }
        if self.submitted_by_id.is_none() {
            return Err(PaidTimeOffRequestError::MissingSubmittedBy);
        }
        if self.paid_time_off_policy_id.is_none() {
            return Err(PaidTimeOffRequestError::MissingPolicy);
        }

        if let Some(submitted_by) = &self.submitted_by {
            if submitted_by.tenant_id() != tenant_id {
                return Err(PaidTimeOffRequestError::TenantMismatch {
                    what: "Submitting employee",
                });
            }
        }

        if let Some(policy) = &self.paid_time_off_policy {
            if policy.tenant_id() != tenant_id {
                return Err(PaidTimeOffRequestError::TenantMismatch {
                    what: "Paid time off policy",
                });
            }
            if let Some(for_employee) = &self.for_employee {
                if for_employee.paid_time_off_policy_id() != Some(policy.id()) {
                    return Err(PaidTimeOffRequestError::PolicyMismatch);
                }
            }
        }

        Ok(())
    }
}

impl PaidTimeOffRequest {
    /// Starts a new draft request for the given calendar days.
    pub fn draft(id: PaidTimeOffRequestId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id,
            tenant_id: None,
            for_employee_id: None,
            submitted_by_id: None,
            paid_time_off_policy_id: None,
            for_employee: None,
            submitted_by: None,
            paid_time_off_policy: None,
            start_date,
            end_date,
            status: PaidTimeOffRequestStatus::Draft,
            notes: None,
            submitted_at: None,
        }
    }

    /// Rebuilds a request from its persisted state.
    pub fn restore(parts: PaidTimeOffRequestParts) -> Self {
        Self {
            id: parts.id,
            tenant_id: Some(parts.tenant_id),
            for_employee_id: Some(parts.for_employee_id),
            submitted_by_id: Some(parts.submitted_by_id),
            paid_time_off_policy_id: Some(parts.paid_time_off_policy_id),
            for_employee: None,
            submitted_by: None,
            paid_time_off_policy: None,
            start_date: parts.start_date,
            end_date: parts.end_date,
            status: parts.status,
            notes: parts.notes,
            submitted_at: parts.submitted_at,
        }
    }

    /// Attaches the employee taking the time off. The request joins that employee's tenant.
    pub fn with_for_employee(mut self, employee: Employee) -> Self {
        self.tenant_id = Some(employee.tenant_id());
        self.for_employee_id = Some(employee.id());
        self.for_employee = Some(employee);
        self
    }

    /// Attaches the employee filing the request.
    pub fn with_submitted_by(mut self, employee: Employee) -> Self {
        self.submitted_by_id = Some(employee.id());
        self.submitted_by = Some(employee);
        self
    }

    /// Attaches the policy the request is evaluated against.
    pub fn with_paid_time_off_policy(mut self, policy: PaidTimeOffPolicy) -> Self {
        self.paid_time_off_policy_id = Some(policy.id());
        self.paid_time_off_policy = Some(policy);
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        self
    }

    /// Submits a draft request, raising `PaidTimeOffRequestSubmitted`.
    ///
    /// The caller is expected to have obtained an `Ok` verdict from
    /// [`PaidTimeOffRequestService`](super::PaidTimeOffRequestService) first.
    pub fn submit(
        mut self,
        submitted_at: DateTime<Utc>,
    ) -> Result<Transition<Self, PaidTimeOffRequestEvent>, PaidTimeOffRequestError> {
        self.validate_aggregate()?;

        if !self.status.can_submit() {
            return Err(PaidTimeOffRequestError::InvalidStateTransition {
                current_state: self.status,
                action: "submit",
            });
        }

        let (tenant_id, for_employee_id, submitted_by_id) = match (
            self.tenant_id,
            self.for_employee_id,
            self.submitted_by_id,
        ) {
            (Some(t), Some(f), Some(s)) => (t, f, s),
            (None, _, _) => return Err(PaidTimeOffRequestError::MissingTenant),
            (_, None, _) => return Err(PaidTimeOffRequestError::MissingForEmployee),
            (_, _, None) => return Err(PaidTimeOffRequestError::MissingSubmittedBy),
        };

        self.status = PaidTimeOffRequestStatus::Submitted;
        self.submitted_at = Some(submitted_at);

        let event =
            PaidTimeOffRequestEvent::PaidTimeOffRequestSubmitted(PaidTimeOffRequestSubmittedData {
                request_id: self.id,
                tenant_id,
                for_employee_id,
                submitted_by_id,
                start_date: self.start_date,
                end_date: self.end_date,
                days_requested: self.days_requested(),
                submitted_at,
            });

        Ok(Transition::new(self, vec![event]))
    }

    /// Number of calendar days covered, counting both ends. Zero for an inverted range.
    pub fn days_requested(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days).unwrap_or(0)
    }

    /// Returns true if the two date ranges share at least one day.
    pub fn overlaps(&self, other: &PaidTimeOffRequest) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    pub fn for_employee_id(&self) -> Option<EmployeeId> {
        self.for_employee_id
    }

    pub fn submitted_by_id(&self) -> Option<EmployeeId> {
        self.submitted_by_id
    }

    pub fn paid_time_off_policy_id(&self) -> Option<PaidTimeOffPolicyId> {
        self.paid_time_off_policy_id
    }

    pub fn for_employee(&self) -> Option<&Employee> {
        self.for_employee.as_ref()
    }

    pub fn submitted_by(&self) -> Option<&Employee> {
        self.submitted_by.as_ref()
    }

    pub fn paid_time_off_policy(&self) -> Option<&PaidTimeOffPolicy> {
        self.paid_time_off_policy.as_ref()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn status(&self) -> PaidTimeOffRequestStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }
}
