//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::equipment::{
        AssignEquipment, CreateEquipment, CreateEquipmentType, EquipmentAssignment,
        EquipmentDetails, EquipmentQuery, EquipmentType, UpdateEquipment,
    },
};

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<EquipmentDetails>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<EquipmentDetails>>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentDetails),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EquipmentDetails>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = EquipmentDetails),
        (status = 409, description = "Serial number already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<EquipmentDetails>)> {
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentDetails)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<EquipmentDetails>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign equipment to a firefighter
#[utoipa::path(
    put,
    path = "/equipment/{id}/assignment",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    request_body = AssignEquipment,
    responses(
        (status = 200, description = "Equipment assigned", body = EquipmentDetails),
        (status = 404, description = "Equipment or personnel not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn assign_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<AssignEquipment>,
) -> AppResult<Json<EquipmentDetails>> {
    let equipment = state.services.equipment.assign(id, data.personnel_id).await?;
    Ok(Json(equipment))
}

/// Return equipment to the store
#[utoipa::path(
    delete,
    path = "/equipment/{id}/assignment",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment unassigned", body = EquipmentDetails)
    )
)]
pub async fn unassign_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EquipmentDetails>> {
    let equipment = state.services.equipment.unassign(id).await?;
    Ok(Json(equipment))
}

/// Assignment history of an item
#[utoipa::path(
    get,
    path = "/equipment/{id}/assignments",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Assignment history", body = Vec<EquipmentAssignment>)
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<EquipmentAssignment>>> {
    let history = state.services.equipment.assignments(id).await?;
    Ok(Json(history))
}

/// List equipment types
#[utoipa::path(
    get,
    path = "/equipment-types",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment types", body = Vec<EquipmentType>)
    )
)]
pub async fn list_equipment_types(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentType>>> {
    let types = state.services.equipment.list_types().await?;
    Ok(Json(types))
}

/// Create an equipment type
#[utoipa::path(
    post,
    path = "/equipment-types",
    tag = "equipment",
    request_body = CreateEquipmentType,
    responses(
        (status = 201, description = "Equipment type created", body = EquipmentType),
        (status = 409, description = "Type name already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment_type(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipmentType>,
) -> AppResult<(StatusCode, Json<EquipmentType>)> {
    let equipment_type = state.services.equipment.create_type(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment_type)))
}
