//! Item detail route handler.

use axum::extract::{Path, State};
use axum::Json;
use vt_core::StoredMediaItem;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::run_catalog;

/// GET /item/{item_id}
#[utoipa::path(
    get,
    path = "/item/{item_id}",
    params(("item_id" = String, Path, description = "Natural key of the item")),
    responses(
        (status = 200, description = "Item details", body = StoredMediaItem),
        (status = 404, description = "Item not found"),
        (status = 500, description = "Store fault")
    )
)]
pub async fn get_item(
    State(ctx): State<AppContext>,
    Path(item_id): Path<String>,
) -> Result<Json<StoredMediaItem>, AppError> {
    let item = run_catalog(&ctx, move |c| c.item_detail(&item_id)).await?;
    Ok(Json(item))
}
