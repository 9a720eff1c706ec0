//! Channel listing route handler.

use axum::extract::State;
use axum::Json;
use vt_core::StoredChannel;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::run_catalog;

/// GET /channels
#[utoipa::path(
    get,
    path = "/channels",
    responses(
        (status = 200, description = "Live channels, at most 50", body = Vec<StoredChannel>),
        (status = 500, description = "Store fault")
    )
)]
pub async fn list_channels(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<StoredChannel>>, AppError> {
    Ok(Json(run_catalog(&ctx, |c| c.list_channels()).await?))
}
