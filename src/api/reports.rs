//! Reports and dashboard endpoints

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{alert::Alert, verification::VerificationDetails},
};

/// Reports overview
#[derive(Serialize, ToSchema)]
pub struct ReportsResponse {
    pub generated_on: NaiveDate,
    pub equipment: EquipmentReport,
    pub personnel: PersonnelReport,
    /// Last six months, oldest first
    pub verifications_by_month: Vec<MonthlyReport>,
    /// Manual and derived alerts currently raised
    pub active_alerts: i64,
}

#[derive(Serialize, ToSchema)]
pub struct EquipmentReport {
    pub total: i64,
    pub by_status: Vec<StatEntry>,
    /// Share of items in good condition, in percent
    pub compliance_rate: f64,
    pub inspections_up_to_date: i64,
    pub inspections_overdue: i64,
    pub by_type: Vec<TypeReport>,
}

#[derive(Serialize, ToSchema)]
pub struct PersonnelReport {
    pub total: i64,
    pub by_status: Vec<StatEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct TypeReport {
    pub type_name: String,
    pub total: i64,
    /// Items in good condition
    pub compliant: i64,
}

#[derive(Serialize, ToSchema)]
pub struct MonthlyReport {
    /// YYYY-MM
    pub month: String,
    pub total: i64,
    pub completed: i64,
    /// Completed with a compliant result
    pub compliant: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatEntry {
    /// Status slug
    pub key: String,
    /// Display label
    pub label: String,
    pub value: i64,
}

/// Headline figures for the home page
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub equipment_total: i64,
    pub equipment_available: i64,
    pub equipment_in_maintenance: i64,
    pub equipment_to_replace: i64,
    pub personnel_total: i64,
    pub personnel_active: i64,
    pub verifications_overdue: i64,
    pub verifications_today: i64,
    /// Open verifications in the upcoming window, soonest first
    pub upcoming_verifications: Vec<VerificationDetails>,
    /// Most pressing alerts
    pub alerts: Vec<Alert>,
}

/// Reports overview
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    responses(
        (status = 200, description = "Inventory and inspection statistics", body = ReportsResponse)
    )
)]
pub async fn get_reports(State(state): State<crate::AppState>) -> AppResult<Json<ReportsResponse>> {
    let report = state.services.reports.overview().await?;
    Ok(Json(report))
}

/// Dashboard summary
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "reports",
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(State(state): State<crate::AppState>) -> AppResult<Json<DashboardResponse>> {
    let dashboard = state.services.reports.dashboard().await?;
    Ok(Json(dashboard))
}
