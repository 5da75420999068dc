//! Employee domain events.

use chrono::{DateTime, Utc};
use common::{EmployeeId, TenantId, UserAccountId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events that can occur on an employee aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EmployeeEvent {
    /// Employee was registered in a tenant.
    EmployeeRegistered(EmployeeRegisteredData),
}

impl DomainEvent for EmployeeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            EmployeeEvent::EmployeeRegistered(_) => "EmployeeRegistered",
        }
    }
}

/// Data for EmployeeRegistered event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRegisteredData {
    pub employee_id: EmployeeId,
    pub tenant_id: TenantId,
    pub user_account_id: Option<UserAccountId>,

    /// "First Last" at the time of registration.
    pub full_name: String,

    pub registered_at: DateTime<Utc>,
}
