//! Maintenance request endpoints.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use rentdesk_core::lifecycle::NewMaintenanceRequest;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, CurrentActor};
use crate::models::{ListQuery, NoteBody, StatsQuery, TransitionBody};
use crate::state::AppState;

/// `POST /maintenance-requests`
pub async fn create_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ApiJson(body): ApiJson<NewMaintenanceRequest>,
) -> ApiResult<impl IntoResponse> {
    let request = state.service.submit_request(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// `GET /maintenance-requests?role=&userId=&status=&search=&sort=`
pub async fn list_requests(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let listings = state
        .service
        .list_requests_for(&query.actor(), &query.filter())
        .await?;
    Ok(Json(listings))
}

/// `GET /maintenance-requests/stats?ownerId=`
pub async fn request_stats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<impl IntoResponse> {
    let stats = state.service.maintenance_stats(query.owner_id).await?;
    Ok(Json(stats))
}

/// `GET /maintenance-requests/{id}`
pub async fn get_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let request = state.service.get_request_for(&actor, id).await?;
    Ok(Json(request))
}

/// `PATCH /maintenance-requests/{id}`
pub async fn transition_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<TransitionBody>,
) -> ApiResult<impl IntoResponse> {
    let request = state
        .service
        .transition_request(&actor, id, body.status, &body.fields())
        .await?;
    Ok(Json(request))
}

/// `POST /maintenance-requests/{id}/notes`
pub async fn add_note(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<NoteBody>,
) -> ApiResult<impl IntoResponse> {
    let request = state.service.add_note(&actor, id, &body.note).await?;
    Ok(Json(request))
}
