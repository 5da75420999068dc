//! HTTP route handlers.

pub mod employees;
pub mod health;
pub mod metrics;
pub mod tenants;
pub mod time_off;

use common::TenantId;
use uuid::Uuid;

use crate::error::ApiError;

fn parse_uuid(id: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|e| ApiError::BadRequest(format!("Invalid {what}: {e}")))
}

fn parse_tenant_id(id: &str) -> Result<TenantId, ApiError> {
    parse_uuid(id, "tenant ID").map(TenantId::from_uuid)
}
