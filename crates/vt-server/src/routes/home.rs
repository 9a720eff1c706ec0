//! Home carousel route handler.

use axum::extract::State;
use axum::Json;

use crate::catalog::HomeCarousels;
use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::run_catalog;

/// GET /home
#[utoipa::path(
    get,
    path = "/home",
    responses(
        (status = 200, description = "Novelas, series, filmes, programas and canais", body = HomeCarousels),
        (status = 500, description = "Store fault")
    )
)]
pub async fn home(State(ctx): State<AppContext>) -> Result<Json<HomeCarousels>, AppError> {
    Ok(Json(run_catalog(&ctx, |c| c.home()).await?))
}
