//! Scheduled verifications (equipment checks)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{CheckResult, Priority, VerificationStatus, VerificationType};
use crate::rules::{
    badge::{Badge, StatusBadge},
    schedule::{derive_display_status, VerificationDisplay},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Verification {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub equipment_serial: Option<String>,
    /// Equipment type name, "Équipement inconnu" when missing
    pub equipment_name: String,
    pub verification_type: VerificationType,
    pub scheduled_date: NaiveDate,
    pub assignee_id: Uuid,
    pub assignee_name: Option<String>,
    pub priority: Priority,
    pub status: VerificationStatus,
    pub result: Option<CheckResult>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Verification {
    pub fn assignee_label(&self) -> String {
        self.assignee_name
            .clone()
            .unwrap_or_else(|| "Non assigné".to_string())
    }
}

/// Verification with its date-aware display status
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerificationDetails {
    #[serde(flatten)]
    pub verification: Verification,
    pub display: VerificationDisplay,
    pub priority_badge: StatusBadge,
    /// Present once a result is recorded
    pub result_badge: Option<StatusBadge>,
}

impl VerificationDetails {
    pub fn new(verification: Verification, today: NaiveDate) -> Self {
        let display =
            derive_display_status(verification.status, verification.scheduled_date, today).into();
        Self {
            priority_badge: verification.priority.badge(),
            result_badge: verification.result.map(|r| r.badge()),
            verification,
            display,
        }
    }
}

/// Schedule a verification. The equipment is given by id or by serial number.
#[serde_as]
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScheduleVerification {
    pub equipment_id: Option<Uuid>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub serial_number: Option<String>,
    pub assignee_id: Uuid,
    #[serde(default)]
    pub verification_type: VerificationType,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[validate(length(max = 2000, message = "Notes are limited to 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateVerification {
    pub verification_type: Option<VerificationType>,
    pub scheduled_date: Option<NaiveDate>,
    pub assignee_id: Option<Uuid>,
    pub priority: Option<Priority>,
    /// Only open statuses; closing goes through cancel or complete
    pub status: Option<VerificationStatus>,
    #[validate(length(max = 2000, message = "Notes are limited to 2000 characters"))]
    pub notes: Option<String>,
}

/// Close a verification with its outcome
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteVerification {
    pub result: CheckResult,
    #[validate(length(max = 2000, message = "Notes are limited to 2000 characters"))]
    pub notes: Option<String>,
    /// Next inspection date to record on the equipment
    pub next_check_date: Option<NaiveDate>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct VerificationQuery {
    /// Substring of equipment name, serial number or assignee name
    pub search: Option<String>,
    /// Stored status
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<VerificationStatus>,
    /// Only verifications currently displayed as overdue
    pub overdue: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
