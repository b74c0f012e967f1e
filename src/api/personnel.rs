//! Personnel API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        equipment::EquipmentDetails,
        personnel::{CreatePersonnel, PersonnelDetails, PersonnelQuery, UpdatePersonnel},
    },
};

/// List personnel
#[utoipa::path(
    get,
    path = "/personnel",
    tag = "personnel",
    params(PersonnelQuery),
    responses(
        (status = 200, description = "Personnel list", body = Vec<PersonnelDetails>)
    )
)]
pub async fn list_personnel(
    State(state): State<crate::AppState>,
    Query(query): Query<PersonnelQuery>,
) -> AppResult<Json<Vec<PersonnelDetails>>> {
    let personnel = state.services.personnel.list(&query).await?;
    Ok(Json(personnel))
}

/// Get a firefighter by ID
#[utoipa::path(
    get,
    path = "/personnel/{id}",
    tag = "personnel",
    params(("id" = Uuid, Path, description = "Personnel ID")),
    responses(
        (status = 200, description = "Personnel details", body = PersonnelDetails),
        (status = 404, description = "Personnel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_personnel(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PersonnelDetails>> {
    let personnel = state.services.personnel.get_by_id(id).await?;
    Ok(Json(personnel))
}

/// Create a firefighter
#[utoipa::path(
    post,
    path = "/personnel",
    tag = "personnel",
    request_body = CreatePersonnel,
    responses(
        (status = 201, description = "Personnel created", body = PersonnelDetails),
        (status = 400, description = "Invalid data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_personnel(
    State(state): State<crate::AppState>,
    Json(data): Json<CreatePersonnel>,
) -> AppResult<(StatusCode, Json<PersonnelDetails>)> {
    let personnel = state.services.personnel.create(&data).await?;
    Ok((StatusCode::CREATED, Json(personnel)))
}

/// Update a firefighter
#[utoipa::path(
    put,
    path = "/personnel/{id}",
    tag = "personnel",
    params(("id" = Uuid, Path, description = "Personnel ID")),
    request_body = UpdatePersonnel,
    responses(
        (status = 200, description = "Personnel updated", body = PersonnelDetails)
    )
)]
pub async fn update_personnel(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdatePersonnel>,
) -> AppResult<Json<PersonnelDetails>> {
    let personnel = state.services.personnel.update(id, &data).await?;
    Ok(Json(personnel))
}

/// Delete a firefighter
#[utoipa::path(
    delete,
    path = "/personnel/{id}",
    tag = "personnel",
    params(("id" = Uuid, Path, description = "Personnel ID")),
    responses(
        (status = 204, description = "Personnel deleted"),
        (status = 404, description = "Personnel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_personnel(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.personnel.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Equipment held by a firefighter
#[utoipa::path(
    get,
    path = "/personnel/{id}/equipment",
    tag = "personnel",
    params(("id" = Uuid, Path, description = "Personnel ID")),
    responses(
        (status = 200, description = "Assigned equipment", body = Vec<EquipmentDetails>),
        (status = 404, description = "Personnel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_personnel_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<EquipmentDetails>>> {
    let equipment = state.services.equipment.list_by_personnel(id).await?;
    Ok(Json(equipment))
}
