//! Paid time off policy and request endpoints.

use std::sync::Arc;

use application::{
    CommandHandler, CreatePaidTimeOffPolicyCommand, PaidTimeOffPolicyViewModel,
    SubmitNewPaidTimeOffRequestCommand, SubmitNewPaidTimeOffRequestViewModel,
};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use common::UserAccountId;
use persistence::Database;

use super::{parse_tenant_id, parse_uuid};
use crate::AppState;
use crate::error::ApiError;

/// Header carrying the acting user's account id, set by the identity layer.
pub const USER_ACCOUNT_HEADER: &str = "x-user-account-id";

/// POST /tenants/{tenant_id}/paid-time-off-policies — create a policy.
#[tracing::instrument(skip(state, policy))]
pub async fn create_policy<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    Path(tenant_id): Path<String>,
    Json(policy): Json<PaidTimeOffPolicyViewModel>,
) -> Result<(StatusCode, Json<PaidTimeOffPolicyViewModel>), ApiError> {
    let tenant_id = parse_tenant_id(&tenant_id)?;
    let created = state
        .paid_time_off_policies
        .handle(CreatePaidTimeOffPolicyCommand { tenant_id, policy })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /tenants/{tenant_id}/paid-time-off-requests — submit a request.
///
/// Returns 201 when the request was created and 200 when it was rejected by
/// a business rule; the verdict is always in `result`.
#[tracing::instrument(skip(state, headers, request))]
pub async fn submit_request<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    Path(tenant_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<SubmitNewPaidTimeOffRequestViewModel>,
) -> Result<(StatusCode, Json<SubmitNewPaidTimeOffRequestViewModel>), ApiError> {
    let tenant_id = parse_tenant_id(&tenant_id)?;
    let user_account_id = user_account_id(&headers)?;

    let response = state
        .paid_time_off_requests
        .handle(SubmitNewPaidTimeOffRequestCommand {
            user_account_id,
            tenant_id,
            paid_time_off_request: request,
        })
        .await?;

    let status = if response.created_paid_time_off_request.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

fn user_account_id(headers: &HeaderMap) -> Result<UserAccountId, ApiError> {
    let raw = headers
        .get(USER_ACCOUNT_HEADER)
        .ok_or_else(|| ApiError::BadRequest(format!("Missing {USER_ACCOUNT_HEADER} header")))?
        .to_str()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {USER_ACCOUNT_HEADER} header: {e}")))?;
    parse_uuid(raw, "user account ID").map(UserAccountId::from_uuid)
}
