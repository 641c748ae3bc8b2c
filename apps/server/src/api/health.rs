use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use capex_storage_sqlite::health_check;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ApiResponse, HealthBody, OkBody},
};

/// Liveness probe; never touches storage.
async fn ok() -> Json<OkBody> {
    Json(OkBody { ok: true })
}

/// Records a write in the store to prove it is usable.
async fn storage_health(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<HealthBody>>> {
    let checked_at = health_check(state.executor.as_ref()).await?;
    Ok(Json(ApiResponse::ok(HealthBody { checked_at })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ok", get(ok))
        .route("/health", get(storage_health))
}
