use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use capex_core::{
    constants::TTD_CURRENCY,
    projects::{
        validate_currency_request, validate_fixed_currency_request, validate_project_data,
        validate_project_update, ConvertedProject, CurrencyRequest, Project,
    },
};
use serde_json::Value;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ApiResponse, MessageBody},
};

type Envelope<T> = Json<ApiResponse<T>>;

async fn convert(
    state: &AppState,
    request: CurrencyRequest,
) -> ApiResult<Envelope<Vec<ConvertedProject>>> {
    let projects = state
        .project_service
        .convert_project_budgets(&request)
        .await?;
    Ok(Json(ApiResponse::ok(projects)))
}

async fn convert_budget(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Envelope<Vec<ConvertedProject>>> {
    let Json(payload) = payload?;
    let request = validate_currency_request(&payload)?;
    convert(&state, request).await
}

async fn convert_budget_to_ttd(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Envelope<Vec<ConvertedProject>>> {
    let Json(payload) = payload?;
    let request = validate_fixed_currency_request(&payload, TTD_CURRENCY)?;
    convert(&state, request).await
}

/// Returns the bare project record, without the envelope.
async fn get_project(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Project>> {
    let Path(id) = id?;
    let project = state.project_service.get_project(id).await?;
    Ok(Json(project))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Envelope<MessageBody>)> {
    let Json(payload) = payload?;
    let new_project = validate_project_data(&payload)?;
    state.project_service.create_project(new_project).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(MessageBody::new(
            "Project created successfully",
        ))),
    ))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Envelope<MessageBody>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let project = validate_project_update(id, &payload)?;
    state.project_service.update_project(project).await?;
    Ok(Json(ApiResponse::ok(MessageBody::new(
        "Project updated successfully",
    ))))
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Envelope<MessageBody>> {
    let Path(id) = id?;
    state.project_service.delete_project(id).await?;
    Ok(Json(ApiResponse::ok(MessageBody::new(
        "Project deleted successfully",
    ))))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/project/budget", post(create_project))
        .route("/project/budget/currency", post(convert_budget))
        .route(
            "/project/budget/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/api-conversion", post(convert_budget_to_ttd))
}
