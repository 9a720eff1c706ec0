//! Liveness and status route handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::catalog::StatusReport;
use crate::context::AppContext;

/// Service name reported by the liveness route.
pub const SERVICE_NAME: &str = "streaming-api";

/// Liveness response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    pub status: String,
    pub service: String,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = ServiceInfo)
    )
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "ok".into(),
        service: SERVICE_NAME.into(),
    })
}

/// GET /test
///
/// Never fails: store problems are reported inside the body.
#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Backend and store status", body = StatusReport)
    )
)]
pub async fn status(State(ctx): State<AppContext>) -> Json<StatusReport> {
    let catalog = ctx.catalog.clone();
    let report = match tokio::task::spawn_blocking(move || catalog.status()).await {
        Ok(report) => report,
        Err(e) => ctx.catalog.status_failed(&format!("status check join error: {e}")),
    };
    Json(report)
}
