//! Equipment items, types and assignment history

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{enums::EquipmentStatus, not_blank};
use crate::rules::badge::{Badge, StatusBadge};

/// Equipment item with its type and holder names joined in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: Uuid,
    pub type_id: Uuid,
    /// Type name, "Type inconnu" when the type row is gone
    pub type_name: String,
    pub serial_number: String,
    pub assigned_to_id: Option<Uuid>,
    pub assigned_to_name: Option<String>,
    pub status: EquipmentStatus,
    pub last_check_date: Option<NaiveDate>,
    pub next_check_date: Option<NaiveDate>,
    pub purchase_date: NaiveDate,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Equipment {
    /// Holder name as shown in tables
    pub fn holder_label(&self) -> &str {
        self.assigned_to_name.as_deref().unwrap_or("Non assigné")
    }

    pub fn inspection_overdue(&self, today: NaiveDate) -> bool {
        self.status != EquipmentStatus::Retired
            && self.next_check_date.map(|d| d < today).unwrap_or(false)
    }
}

/// Equipment as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentDetails {
    #[serde(flatten)]
    pub equipment: Equipment,
    pub holder: String,
    pub status_badge: StatusBadge,
    pub inspection_overdue: bool,
}

impl EquipmentDetails {
    pub fn new(equipment: Equipment, today: NaiveDate) -> Self {
        Self {
            holder: equipment.holder_label().to_string(),
            status_badge: equipment.status.badge(),
            inspection_overdue: equipment.inspection_overdue(today),
            equipment,
        }
    }
}

/// Create equipment request
#[serde_as]
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    /// Type name; created when it does not exist yet
    #[validate(custom(function = "not_blank", message = "Equipment type is required"))]
    pub type_name: String,
    #[validate(custom(function = "not_blank", message = "Serial number is required"))]
    pub serial_number: String,
    pub status: Option<EquipmentStatus>,
    pub assigned_to_id: Option<Uuid>,
    /// Defaults to today
    pub purchase_date: Option<NaiveDate>,
    pub last_check_date: Option<NaiveDate>,
    pub next_check_date: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub location: Option<String>,
}

/// Update equipment request
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(custom(function = "not_blank", message = "Equipment type cannot be empty"))]
    pub type_name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Serial number cannot be empty"))]
    pub serial_number: Option<String>,
    pub status: Option<EquipmentStatus>,
    pub purchase_date: Option<NaiveDate>,
    pub last_check_date: Option<NaiveDate>,
    pub next_check_date: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub location: Option<String>,
}

/// Assign an item to a firefighter
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignEquipment {
    pub personnel_id: Uuid,
}

/// Next-inspection window used to filter the equipment list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InspectionWindow {
    /// Due today
    Today,
    /// Due within the next 7 days
    Week,
    /// Due within the next 30 days
    Month,
    /// Past due on equipment still in service
    Expired,
}

impl InspectionWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionWindow::Today => "today",
            InspectionWindow::Week => "week",
            InspectionWindow::Month => "month",
            InspectionWindow::Expired => "expired",
        }
    }

    pub fn contains(&self, equipment: &Equipment, today: NaiveDate) -> bool {
        let Some(next) = equipment.next_check_date else {
            return false;
        };
        match self {
            InspectionWindow::Today => next == today,
            InspectionWindow::Week => next >= today && next <= today + Duration::days(7),
            InspectionWindow::Month => next >= today && next <= today + Duration::days(30),
            InspectionWindow::Expired => equipment.inspection_overdue(today),
        }
    }
}

impl std::fmt::Display for InspectionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InspectionWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" | "aujourd'hui" => Ok(InspectionWindow::Today),
            "week" | "semaine" => Ok(InspectionWindow::Week),
            "month" | "mois" => Ok(InspectionWindow::Month),
            "expired" | "expirés" | "expires" => Ok(InspectionWindow::Expired),
            _ => Err(format!("Unknown inspection window: {}", s)),
        }
    }
}

/// Equipment list filters, all combined
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Substring of type name, serial number or holder name
    pub search: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<EquipmentStatus>,
    /// Substring of the type name only
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub type_name: Option<String>,
    /// today, week, month or expired
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub inspection: Option<InspectionWindow>,
}

/// Equipment type (catalogue entry)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Expected service life
    pub lifespan_months: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipmentType {
    #[validate(
        length(max = 120, message = "Type name must be 1-120 characters"),
        custom(function = "not_blank", message = "Type name must be 1-120 characters")
    )]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Lifespan must be positive"))]
    pub lifespan_months: Option<i32>,
}

/// One row of assignment history; `return_date` is null while current
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentAssignment {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub personnel_id: Uuid,
    pub personnel_name: Option<String>,
    pub assignment_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helmet(status: EquipmentStatus, next_check: Option<NaiveDate>) -> Equipment {
        Equipment {
            id: Uuid::new_v4(),
            type_id: Uuid::new_v4(),
            type_name: "Casque F1".to_string(),
            serial_number: "CSQ-2024-001".to_string(),
            assigned_to_id: None,
            assigned_to_name: None,
            status,
            last_check_date: None,
            next_check_date: next_check,
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            location: Some("Caserne principale".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_details_carry_badge_and_holder() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let details = EquipmentDetails::new(helmet(EquipmentStatus::Maintenance, None), today);
        assert_eq!(details.holder, "Non assigné");
        assert_eq!(details.status_badge.label, "Maintenance");
        assert!(!details.inspection_overdue);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["serial_number"], "CSQ-2024-001");
        assert_eq!(json["status"], "maintenance");
    }

    #[test]
    fn test_inspection_overdue() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        assert!(helmet(EquipmentStatus::Available, Some(yesterday)).inspection_overdue(today));
        assert!(!helmet(EquipmentStatus::Available, Some(today)).inspection_overdue(today));
        assert!(!helmet(EquipmentStatus::Retired, Some(yesterday)).inspection_overdue(today));
    }

    #[test]
    fn test_query_empty_status_is_none() {
        let q: EquipmentQuery = serde_json::from_str(r#"{"status": ""}"#).unwrap();
        assert!(q.status.is_none());
        let q: EquipmentQuery = serde_json::from_str(r#"{"status": "bon"}"#).unwrap();
        assert_eq!(q.status, Some(EquipmentStatus::Available));
    }

    #[test]
    fn test_query_inspection_window() {
        let q: EquipmentQuery =
            serde_json::from_str(r#"{"inspection": "week", "type_name": ""}"#).unwrap();
        assert_eq!(q.inspection, Some(InspectionWindow::Week));
        assert!(q.type_name.is_none());
        assert!(serde_json::from_str::<EquipmentQuery>(r#"{"inspection": "year"}"#).is_err());
    }

    #[test]
    fn test_inspection_window_bounds() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let due_in = |days: i64| helmet(EquipmentStatus::Available, Some(today + Duration::days(days)));

        assert!(InspectionWindow::Today.contains(&due_in(0), today));
        assert!(!InspectionWindow::Today.contains(&due_in(1), today));
        assert!(InspectionWindow::Week.contains(&due_in(7), today));
        assert!(!InspectionWindow::Week.contains(&due_in(8), today));
        assert!(InspectionWindow::Month.contains(&due_in(30), today));
        assert!(!InspectionWindow::Month.contains(&due_in(-1), today));
        assert!(InspectionWindow::Expired.contains(&due_in(-1), today));
        assert!(!InspectionWindow::Expired.contains(
            &helmet(EquipmentStatus::Retired, Some(today - Duration::days(3))),
            today
        ));
        assert!(!InspectionWindow::Week.contains(&helmet(EquipmentStatus::Available, None), today));
    }

    #[test]
    fn test_create_requires_serial() {
        let data: CreateEquipment =
            serde_json::from_str(r#"{"type_name": "ARI", "serial_number": ""}"#).unwrap();
        assert!(data.validate().is_err());

        let data: CreateEquipment =
            serde_json::from_str(r#"{"type_name": " ", "serial_number": "  "}"#).unwrap();
        let errors = data.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("type_name"));
        assert!(errors.field_errors().contains_key("serial_number"));
    }

    #[test]
    fn test_blank_type_names_are_rejected() {
        let update = UpdateEquipment {
            serial_number: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let blank: CreateEquipmentType = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(blank.validate().is_err());
        let ok: CreateEquipmentType = serde_json::from_str(r#"{"name": "Gants"}"#).unwrap();
        assert!(ok.validate().is_ok());
    }
}
