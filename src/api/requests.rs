//! Equipment request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::request::{CreateRequest, EquipmentRequest, RequestQuery, ResolveRequest},
};

/// List requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(RequestQuery),
    responses(
        (status = 200, description = "Request list", body = Vec<EquipmentRequest>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<EquipmentRequest>>> {
    let requests = state.services.requests.list(&query).await?;
    Ok(Json(requests))
}

/// Open a request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = EquipmentRequest),
        (status = 404, description = "Unknown requester or equipment", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<EquipmentRequest>)> {
    let request = state.services.requests.create(&data).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Resolve or reject a request
#[utoipa::path(
    post,
    path = "/requests/{id}/resolve",
    tag = "requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = ResolveRequest,
    responses(
        (status = 200, description = "Request closed", body = EquipmentRequest)
    )
)]
pub async fn resolve_request(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<ResolveRequest>,
) -> AppResult<Json<EquipmentRequest>> {
    let request = state.services.requests.resolve(id, &data).await?;
    Ok(Json(request))
}

/// Delete a request
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request deleted")
    )
)]
pub async fn delete_request(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.requests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
