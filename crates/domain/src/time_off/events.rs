//! Paid time off request domain events.

use chrono::{DateTime, NaiveDate, Utc};
use common::{EmployeeId, PaidTimeOffRequestId, TenantId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events that can occur on a paid time off request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PaidTimeOffRequestEvent {
    /// Request was submitted for approval.
    PaidTimeOffRequestSubmitted(PaidTimeOffRequestSubmittedData),
}

impl DomainEvent for PaidTimeOffRequestEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PaidTimeOffRequestEvent::PaidTimeOffRequestSubmitted(_) => {
                "PaidTimeOffRequestSubmitted"
            }
        }
    }
}

/// Data for PaidTimeOffRequestSubmitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidTimeOffRequestSubmittedData {
    pub request_id: PaidTimeOffRequestId,
    pub tenant_id: TenantId,

    /// The employee taking the time off.
    pub for_employee_id: EmployeeId,

    /// The employee who filed the request, possibly on someone else's behalf.
    pub submitted_by_id: EmployeeId,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: u32,
    pub submitted_at: DateTime<Utc>,
}
