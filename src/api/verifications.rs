//! Verification scheduling endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::verification::{
        CalendarQuery, CompleteVerification, ScheduleVerification, UpdateVerification,
        VerificationDetails, VerificationQuery,
    },
    rules::schedule::CalendarEvent,
};

/// List verifications with their display status
#[utoipa::path(
    get,
    path = "/verifications",
    tag = "verifications",
    params(VerificationQuery),
    responses(
        (status = 200, description = "Verification list", body = Vec<VerificationDetails>)
    )
)]
pub async fn list_verifications(
    State(state): State<crate::AppState>,
    Query(query): Query<VerificationQuery>,
) -> AppResult<Json<Vec<VerificationDetails>>> {
    let verifications = state.services.verifications.list(&query).await?;
    Ok(Json(verifications))
}

/// Calendar events in a date range
#[utoipa::path(
    get,
    path = "/verifications/calendar",
    tag = "verifications",
    params(CalendarQuery),
    responses(
        (status = 200, description = "All-day calendar events", body = Vec<CalendarEvent>),
        (status = 400, description = "End before start", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_calendar(
    State(state): State<crate::AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = state.services.verifications.calendar(query.start, query.end).await?;
    Ok(Json(events))
}

/// Get a verification by ID
#[utoipa::path(
    get,
    path = "/verifications/{id}",
    tag = "verifications",
    params(("id" = Uuid, Path, description = "Verification ID")),
    responses(
        (status = 200, description = "Verification details", body = VerificationDetails),
        (status = 404, description = "Verification not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_verification(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<VerificationDetails>> {
    let verification = state.services.verifications.get_by_id(id).await?;
    Ok(Json(verification))
}

/// Schedule a verification
#[utoipa::path(
    post,
    path = "/verifications",
    tag = "verifications",
    request_body = ScheduleVerification,
    responses(
        (status = 201, description = "Verification scheduled", body = VerificationDetails),
        (status = 404, description = "Unknown equipment or assignee", body = crate::error::ErrorResponse)
    )
)]
pub async fn schedule_verification(
    State(state): State<crate::AppState>,
    Json(data): Json<ScheduleVerification>,
) -> AppResult<(StatusCode, Json<VerificationDetails>)> {
    let verification = state.services.verifications.schedule(&data).await?;
    Ok((StatusCode::CREATED, Json(verification)))
}

/// Update a verification
#[utoipa::path(
    put,
    path = "/verifications/{id}",
    tag = "verifications",
    params(("id" = Uuid, Path, description = "Verification ID")),
    request_body = UpdateVerification,
    responses(
        (status = 200, description = "Verification updated", body = VerificationDetails),
        (status = 400, description = "Verification is closed, or a closing status was given", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_verification(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateVerification>,
) -> AppResult<Json<VerificationDetails>> {
    let verification = state.services.verifications.update(id, &data).await?;
    Ok(Json(verification))
}

/// Cancel a verification
#[utoipa::path(
    post,
    path = "/verifications/{id}/cancel",
    tag = "verifications",
    params(("id" = Uuid, Path, description = "Verification ID")),
    responses(
        (status = 200, description = "Verification cancelled", body = VerificationDetails),
        (status = 400, description = "Already completed", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_verification(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<VerificationDetails>> {
    let verification = state.services.verifications.cancel(id).await?;
    Ok(Json(verification))
}

/// Complete a verification with its result
#[utoipa::path(
    post,
    path = "/verifications/{id}/complete",
    tag = "verifications",
    params(("id" = Uuid, Path, description = "Verification ID")),
    request_body = CompleteVerification,
    responses(
        (status = 200, description = "Verification completed", body = VerificationDetails),
        (status = 400, description = "Verification cancelled", body = crate::error::ErrorResponse)
    )
)]
pub async fn complete_verification(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<CompleteVerification>,
) -> AppResult<Json<VerificationDetails>> {
    let verification = state.services.verifications.complete(id, &data).await?;
    Ok(Json(verification))
}

/// Delete a verification
#[utoipa::path(
    delete,
    path = "/verifications/{id}",
    tag = "verifications",
    params(("id" = Uuid, Path, description = "Verification ID")),
    responses(
        (status = 204, description = "Verification deleted")
    )
)]
pub async fn delete_verification(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.verifications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
