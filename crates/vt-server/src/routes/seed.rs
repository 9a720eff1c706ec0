//! Demo data seeding route handler.

use axum::extract::State;
use axum::Json;

use crate::catalog::SeedReport;
use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::run_catalog;

/// POST /seed
#[utoipa::path(
    post,
    path = "/seed",
    responses(
        (status = 200, description = "Demo catalog loaded", body = SeedReport),
        (status = 500, description = "Store unconfigured or insert failed")
    )
)]
pub async fn seed(State(ctx): State<AppContext>) -> Result<Json<SeedReport>, AppError> {
    let report = run_catalog(&ctx, |c| c.seed()).await?;
    Ok(Json(report))
}
