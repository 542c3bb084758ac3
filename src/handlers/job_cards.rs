use crate::handlers::common::{created_response, success_response, PaginatedResponse};
use crate::{
    auth::Principal,
    errors::ServiceError,
    services::{CreateJobInput, JobCardQuery, LineItemChange, LineItemKind},
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;

/// Creates the router for job card endpoints
pub fn job_card_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job).get(list_jobs))
        .route("/trash", get(list_deleted))
        .route("/:id", get(get_job).delete(delete_job))
        .route("/:id/restore", post(restore_job))
        .route("/:id/line-items", post(update_line_items))
        .route("/:id/line-items/:kind/:item_id", delete(remove_line_item))
        .route("/:id/status", post(change_status))
        .route("/:id/assign", post(assign_mechanic).delete(unassign_mechanic))
        .route("/:id/notes", put(update_notes))
        .route("/:id/vehicle", put(reassign_vehicle))
}

#[derive(Debug, Deserialize)]
pub struct LineItemsRequest {
    pub changes: Vec<LineItemChange>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub mechanic_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VehicleRequest {
    pub customer_id: i64,
    pub vehicle_id: i64,
}

async fn create_job(
    State(state): State<AppState>,
    _principal: Principal,
    Json(payload): Json<CreateJobInput>,
) -> Result<Response, ServiceError> {
    let job = state.job_cards.create_job(payload).await?;
    Ok(created_response(job))
}

async fn list_jobs(
    State(state): State<AppState>,
    _principal: Principal,
    Query(query): Query<JobCardQuery>,
) -> Result<Response, ServiceError> {
    let page = state.job_cards.list_jobs(query).await?;
    Ok(success_response(PaginatedResponse::new(
        page.items,
        page.page,
        page.per_page,
        page.total,
    )))
}

async fn list_deleted(
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.job_cards.list_deleted().await?))
}

async fn get_job(
    State(state): State<AppState>,
    _principal: Principal,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.job_cards.get_job(id).await?))
}

async fn delete_job(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.job_cards.soft_delete(id, principal).await?))
}

async fn restore_job(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.job_cards.restore(id, principal).await?))
}

async fn update_line_items(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(payload): Json<LineItemsRequest>,
) -> Result<Response, ServiceError> {
    let details = state
        .job_cards
        .update_line_items(id, payload.changes, principal)
        .await?;
    Ok(success_response(details))
}

async fn remove_line_item(
    State(state): State<AppState>,
    principal: Principal,
    Path((id, kind, item_id)): Path<(i64, LineItemKind, i64)>,
) -> Result<Response, ServiceError> {
    let details = state
        .job_cards
        .remove_line_item(id, kind, item_id, principal)
        .await?;
    Ok(success_response(details))
}

async fn change_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(payload): Json<StatusRequest>,
) -> Result<Response, ServiceError> {
    let job = state
        .job_cards
        .change_status_named(id, &payload.status, principal)
        .await?;
    Ok(success_response(job))
}

async fn assign_mechanic(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(payload): Json<AssignRequest>,
) -> Result<Response, ServiceError> {
    let job = state
        .job_cards
        .assign_mechanic(id, payload.mechanic_id, principal)
        .await?;
    Ok(success_response(job))
}

async fn unassign_mechanic(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.job_cards.unassign_mechanic(id, principal).await?,
    ))
}

async fn update_notes(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(payload): Json<NotesRequest>,
) -> Result<Response, ServiceError> {
    let job = state
        .job_cards
        .update_notes(id, payload.notes, principal)
        .await?;
    Ok(success_response(job))
}

async fn reassign_vehicle(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(payload): Json<VehicleRequest>,
) -> Result<Response, ServiceError> {
    let job = state
        .job_cards
        .reassign_vehicle(id, payload.customer_id, payload.vehicle_id, principal)
        .await?;
    Ok(success_response(job))
}
