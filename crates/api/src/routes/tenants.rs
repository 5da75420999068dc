//! Tenant management endpoints.

use std::sync::Arc;

use application::{
    AddOrUpdateTenantCommand, CommandHandler, GetTenantQuery, GetTenantsQuery, TenantViewModel,
};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use persistence::Database;

use super::parse_tenant_id;
use crate::AppState;
use crate::error::ApiError;

/// GET /tenants — list every tenant, ordered by name.
#[tracing::instrument(skip(state))]
pub async fn list<D: Database>(
    State(state): State<Arc<AppState<D>>>,
) -> Result<Json<Vec<TenantViewModel>>, ApiError> {
    let tenants = state.tenants.handle(GetTenantsQuery).await?;
    Ok(Json(tenants))
}

/// POST /tenants — create a tenant, or update it when the body carries an id.
#[tracing::instrument(skip(state, tenant))]
pub async fn save<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    Json(tenant): Json<TenantViewModel>,
) -> Result<(StatusCode, Json<TenantViewModel>), ApiError> {
    let status = if tenant.id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    let saved = state
        .tenants
        .handle(AddOrUpdateTenantCommand { tenant })
        .await?;
    Ok((status, Json(saved)))
}

/// GET /tenants/{tenant_id} — load one tenant.
#[tracing::instrument(skip(state))]
pub async fn get<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    Path(tenant_id): Path<String>,
) -> Result<Json<TenantViewModel>, ApiError> {
    let tenant_id = parse_tenant_id(&tenant_id)?;
    let tenant = state
        .tenants
        .handle(GetTenantQuery { tenant_id })
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Tenant {tenant_id} not found")))?;
    Ok(Json(tenant))
}
