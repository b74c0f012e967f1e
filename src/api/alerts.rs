//! Alert endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::alert::{Alert, CreateAlert},
};

/// Active alerts, manual and derived
#[utoipa::path(
    get,
    path = "/alerts",
    tag = "alerts",
    responses(
        (status = 200, description = "Alerts, most pressing first", body = Vec<Alert>)
    )
)]
pub async fn list_alerts(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Alert>>> {
    let alerts = state.services.alerts.list().await?;
    Ok(Json(alerts))
}

/// Raise a manual alert
#[utoipa::path(
    post,
    path = "/alerts",
    tag = "alerts",
    request_body = CreateAlert,
    responses(
        (status = 201, description = "Alert created", body = Alert),
        (status = 404, description = "Unknown equipment or personnel", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_alert(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAlert>,
) -> AppResult<(StatusCode, Json<Alert>)> {
    let alert = state.services.alerts.create(&data).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// Dismiss a manual alert
#[utoipa::path(
    post,
    path = "/alerts/{id}/dismiss",
    tag = "alerts",
    params(("id" = Uuid, Path, description = "Alert ID")),
    responses(
        (status = 200, description = "Alert dismissed", body = Alert),
        (status = 404, description = "Alert not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn dismiss_alert(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Alert>> {
    let alert = state.services.alerts.dismiss(id).await?;
    Ok(Json(alert))
}

/// Delete a manual alert
#[utoipa::path(
    delete,
    path = "/alerts/{id}",
    tag = "alerts",
    params(("id" = Uuid, Path, description = "Alert ID")),
    responses(
        (status = 204, description = "Alert deleted")
    )
)]
pub async fn delete_alert(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.alerts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
