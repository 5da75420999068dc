//! HTTP API server with observability for the org manager.
//!
//! Provides REST endpoints for tenants, paid time off policies, employees
//! and paid time off requests, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use application::{
    Clock, CreatePaidTimeOffPolicyHandler, ModelMapper, RegisterNewEmployeeHandler,
    SubmitNewPaidTimeOffRequestHandler, TenantHandler,
};
use axum::Router;
use axum::routing::{get, post};
use domain::{DomainEventDispatcher, EmployeeEvent, LoggingEventHandler, PaidTimeOffRequestEvent};
use metrics_exporter_prometheus::PrometheusHandle;
use persistence::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<D: Database> {
    pub tenants: TenantHandler<D>,
    pub paid_time_off_policies: CreatePaidTimeOffPolicyHandler<D>,
    pub employees: RegisterNewEmployeeHandler<D>,
    pub paid_time_off_requests: SubmitNewPaidTimeOffRequestHandler<D>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<D: Database>(state: Arc<AppState<D>>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/tenants",
            get(routes::tenants::list::<D>).post(routes::tenants::save::<D>),
        )
        .route("/tenants/{tenant_id}", get(routes::tenants::get::<D>))
        .route(
            "/tenants/{tenant_id}/paid-time-off-policies",
            post(routes::time_off::create_policy::<D>),
        )
        .route(
            "/tenants/{tenant_id}/employees",
            post(routes::employees::register::<D>),
        )
        .route(
            "/tenants/{tenant_id}/paid-time-off-requests",
            post(routes::time_off::submit_request::<D>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over a database.
///
/// Every domain event is logged; no other subscribers are registered.
pub fn create_default_state<D: Database>(db: D, clock: Arc<dyn Clock>) -> Arc<AppState<D>> {
    let mapper = Arc::new(ModelMapper::standard());

    let employee_events = DomainEventDispatcher::<EmployeeEvent>::new()
        .with_handler(Arc::new(LoggingEventHandler::<EmployeeEvent>::new()));
    let request_events = DomainEventDispatcher::<PaidTimeOffRequestEvent>::new()
        .with_handler(Arc::new(LoggingEventHandler::<PaidTimeOffRequestEvent>::new()));

    Arc::new(AppState {
        tenants: TenantHandler::new(db.clone(), mapper.clone()),
        paid_time_off_policies: CreatePaidTimeOffPolicyHandler::new(db.clone(), mapper.clone()),
        employees: RegisterNewEmployeeHandler::new(
            db.clone(),
            mapper.clone(),
            employee_events,
            clock.clone(),
        ),
        paid_time_off_requests: SubmitNewPaidTimeOffRequestHandler::new(
            db,
            mapper,
            request_events,
            clock,
        ),
    })
}
