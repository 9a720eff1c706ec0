//! Route handlers for the HTTP API.

pub mod channels;
pub mod health;
pub mod home;
pub mod items;
pub mod seed;

use crate::catalog::CatalogService;
use crate::context::AppContext;
use crate::error::AppError;

/// Run a catalog call on the blocking pool so a slow store only holds up
/// the request that issued it.
pub(crate) async fn run_catalog<T, F>(ctx: &AppContext, f: F) -> Result<T, AppError>
where
    F: FnOnce(&CatalogService) -> vt_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let catalog = ctx.catalog.clone();
    let result = tokio::task::spawn_blocking(move || f(&catalog))
        .await
        .map_err(|e| vt_core::Error::Internal(format!("spawn_blocking join error: {e}")))?;
    Ok(result?)
}
