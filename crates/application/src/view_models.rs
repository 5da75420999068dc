//! Presentation-facing data shapes.
//!
//! View-models are plain serde structs. Identifiers are raw UUIDs and enums
//! are serialized by name, so they can be produced and consumed as JSON.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use domain::{PaidTimeOffRequestStatus, PaidTimeOffRequestValidationResult};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressViewModel {
    pub street1: String,
    #[serde(default)]
    pub street2: Option<String>,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantViewModel {
    /// Absent when creating a tenant.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    /// Derived from the name when absent.
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidTimeOffPolicyViewModel {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    pub name: String,
    pub days_allowed_per_year: u32,
    #[serde(default)]
    pub allows_unlimited: bool,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeViewModel {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    #[serde(default)]
    pub user_account_id: Option<Uuid>,
    #[serde(default)]
    pub paid_time_off_policy_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    /// Output only.
    #[serde(default)]
    pub full_name: String,
    pub address: AddressViewModel,
    pub hire_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidTimeOffRequestViewModel {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub for_employee_id: Option<Uuid>,
    pub submitted_by_id: Option<Uuid>,
    pub paid_time_off_policy_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_requested: u32,
    pub status: PaidTimeOffRequestStatus,
    pub notes: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Payload and response of the submit-new-request use case.
///
/// The caller fills the request fields; the handler fills `result` and, on
/// success, `created_paid_time_off_request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitNewPaidTimeOffRequestViewModel {
    /// Employee the time off is for. Absent means the submitter.
    #[serde(default)]
    pub for_employee_id: Option<Uuid>,

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, or an RFC 3339 timestamp.
    /// An offset is dropped, keeping the wall-clock time as written.
    #[serde(deserialize_with = "date_or_date_time")]
    pub start_date: NaiveDateTime,

    #[serde(deserialize_with = "date_or_date_time")]
    pub end_date: NaiveDateTime,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub result: Option<PaidTimeOffRequestValidationResult>,

    #[serde(default)]
    pub created_paid_time_off_request: Option<PaidTimeOffRequestViewModel>,
}

impl SubmitNewPaidTimeOffRequestViewModel {
    pub fn new(start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        Self {
            for_employee_id: None,
            start_date,
            end_date,
            notes: None,
            result: None,
            created_paid_time_off_request: None,
        }
    }

    /// Strips the time of day from both dates.
    pub fn normalize_dates(&mut self) {
        self.start_date = start_of_day(self.start_date);
        self.end_date = start_of_day(self.end_date);
    }
}

fn start_of_day(value: NaiveDateTime) -> NaiveDateTime {
    value.date().and_time(NaiveTime::MIN)
}

fn date_or_date_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(value) = raw.parse::<NaiveDateTime>() {
        return Ok(value);
    }
    if let Ok(value) = DateTime::<FixedOffset>::parse_from_rfc3339(&raw) {
        return Ok(value.naive_local());
    }
    raw.parse::<NaiveDate>()
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(serde::de::Error::custom)
}
