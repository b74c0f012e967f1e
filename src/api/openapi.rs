//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{alerts, equipment, health, personnel, reports, requests, verifications};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Caserne EPI API",
        version = "0.3.0",
        description = "Protective equipment inventory, personnel and inspection scheduling REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::assign_equipment,
        equipment::unassign_equipment,
        equipment::list_assignments,
        equipment::list_equipment_types,
        equipment::create_equipment_type,
        // Personnel
        personnel::list_personnel,
        personnel::get_personnel,
        personnel::create_personnel,
        personnel::update_personnel,
        personnel::delete_personnel,
        personnel::get_personnel_equipment,
        // Verifications
        verifications::list_verifications,
        verifications::get_calendar,
        verifications::get_verification,
        verifications::schedule_verification,
        verifications::update_verification,
        verifications::cancel_verification,
        verifications::complete_verification,
        verifications::delete_verification,
        // Requests
        requests::list_requests,
        requests::create_request,
        requests::resolve_request,
        requests::delete_request,
        // Alerts
        alerts::list_alerts,
        alerts::create_alert,
        alerts::dismiss_alert,
        alerts::delete_alert,
        // Reports
        reports::get_reports,
        reports::get_dashboard,
    ),
    components(
        schemas(
            // Vocabularies
            crate::models::enums::EquipmentStatus,
            crate::models::enums::PersonnelStatus,
            crate::models::enums::VerificationStatus,
            crate::models::enums::VerificationType,
            crate::models::enums::Priority,
            crate::models::enums::CheckResult,
            crate::models::enums::RequestType,
            crate::models::enums::RequestStatus,
            crate::models::enums::AlertType,
            crate::models::enums::AlertPriority,
            crate::rules::badge::StatusBadge,
            crate::rules::badge::BadgeColor,
            crate::rules::badge::BadgeIcon,
            crate::rules::schedule::VerificationDisplay,
            crate::rules::schedule::CalendarEvent,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::AssignEquipment,
            crate::models::equipment::EquipmentType,
            crate::models::equipment::CreateEquipmentType,
            crate::models::equipment::EquipmentAssignment,
            crate::models::equipment::InspectionWindow,
            // Personnel
            crate::models::personnel::Personnel,
            crate::models::personnel::PersonnelDetails,
            crate::models::personnel::CreatePersonnel,
            crate::models::personnel::UpdatePersonnel,
            // Verifications
            crate::models::verification::Verification,
            crate::models::verification::VerificationDetails,
            crate::models::verification::ScheduleVerification,
            crate::models::verification::UpdateVerification,
            crate::models::verification::CompleteVerification,
            // Requests
            crate::models::request::EquipmentRequest,
            crate::models::request::CreateRequest,
            crate::models::request::ResolveRequest,
            // Alerts
            crate::models::alert::Alert,
            crate::models::alert::AlertSource,
            crate::models::alert::CreateAlert,
            // Reports
            reports::ReportsResponse,
            reports::EquipmentReport,
            reports::PersonnelReport,
            reports::TypeReport,
            reports::MonthlyReport,
            reports::StatEntry,
            reports::DashboardResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Protective equipment inventory"),
        (name = "personnel", description = "Firefighter roster"),
        (name = "verifications", description = "Inspection scheduling"),
        (name = "requests", description = "Equipment requests"),
        (name = "alerts", description = "Manual and derived alerts"),
        (name = "reports", description = "Reports and dashboard")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
