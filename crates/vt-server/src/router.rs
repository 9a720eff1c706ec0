//! Axum router construction.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::root,
        routes::health::status,
        routes::seed::seed,
        routes::home::home,
        routes::items::get_item,
        routes::channels::list_channels,
    ),
    components(schemas(
        routes::health::ServiceInfo,
        crate::catalog::StatusReport,
        crate::catalog::SeedReport,
        crate::catalog::HomeCarousels,
        vt_core::MediaItem,
        vt_core::Channel,
        vt_core::AudioTrack,
        vt_core::Season,
        vt_core::StoredMediaItem,
        vt_core::StoredChannel,
    ))
)]
pub struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/test", get(routes::health::status))
        .route("/seed", post(routes::seed::seed))
        .route("/home", get(routes::home::home))
        .route("/item/{item_id}", get(routes::items::get_item))
        .route("/channels", get(routes::channels::list_channels))
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
