//! Employee registration endpoint.

use std::sync::Arc;

use application::{CommandHandler, EmployeeViewModel, RegisterNewEmployeeCommand};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use persistence::Database;

use super::parse_tenant_id;
use crate::AppState;
use crate::error::ApiError;

/// POST /tenants/{tenant_id}/employees — register a new employee.
#[tracing::instrument(skip(state, employee))]
pub async fn register<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    Path(tenant_id): Path<String>,
    Json(employee): Json<EmployeeViewModel>,
) -> Result<(StatusCode, Json<EmployeeViewModel>), ApiError> {
    let tenant_id = parse_tenant_id(&tenant_id)?;
    let created = state
        .employees
        .handle(RegisterNewEmployeeCommand {
            tenant_id,
            employee,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
