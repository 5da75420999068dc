//! Database entities: one struct per table row.
//!
//! Navigation fields (an employee's policy and requests) are skipped by both
//! `FromRow` and serde; the write context fills them when loading eagerly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sqlx::{FromRow, postgres::PgRow};
use uuid::Uuid;

/// A row type stored in one table, keyed by a UUID `id` column.
pub trait Entity:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Table the entity is stored in.
    const TABLE: &'static str;

    /// Primary key.
    fn id(&self) -> Uuid;

    /// Constraint name and value of the row's secondary unique key, if any.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}

/// Address columns embedded in another row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromRow)]
pub struct AddressEntity {
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TenantEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Entity for TenantEntity {
    const TABLE: &'static str = "tenants";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("unique_tenant_slug", self.slug.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PaidTimeOffPolicyEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub days_allowed_per_year: i32,
    pub allows_unlimited: bool,
    pub is_default: bool,
}

impl Entity for PaidTimeOffPolicyEntity {
    const TABLE: &'static str = "paid_time_off_policies";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PaidTimeOffRequestEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub for_employee_id: Uuid,
    pub submitted_by_id: Uuid,
    pub paid_time_off_policy_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Status name, e.g. `Submitted`.
    pub status: String,
    pub notes: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Entity for PaidTimeOffRequestEntity {
    const TABLE: &'static str = "paid_time_off_requests";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmployeeEntity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_account_id: Option<Uuid>,
    pub paid_time_off_policy_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub address: AddressEntity,
    pub hire_date: NaiveDate,

    /// Loaded eagerly by the write context.
    #[serde(skip)]
    #[sqlx(skip)]
    pub paid_time_off_policy: Option<PaidTimeOffPolicyEntity>,

    /// Requests for this employee, loaded eagerly by the write context.
    #[serde(skip)]
    #[sqlx(skip)]
    pub for_paid_time_off_requests: Vec<PaidTimeOffRequestEntity>,
}

impl Entity for EmployeeEntity {
    const TABLE: &'static str = "employees";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        self.user_account_id.map(|user_account_id| {
            (
                "unique_employee_user_account",
                format!("{}/{user_account_id}", self.tenant_id),
            )
        })
    }
}
