//! Verification display status and calendar rendering

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::badge::{Badge, BadgeColor, BadgeIcon, StatusBadge};
use crate::models::{enums::VerificationStatus, verification::Verification};

/// What a verification shows once its date is taken into account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Stored(VerificationStatus),
    Overdue,
    Today,
}

/// Derive the displayed status of a verification.
///
/// Terminal statuses are shown as stored. Otherwise a date before `today`
/// overrides the stored status with `Overdue`, and a date equal to `today`
/// with `Today`.
pub fn derive_display_status(
    status: VerificationStatus,
    scheduled_date: NaiveDate,
    today: NaiveDate,
) -> DisplayStatus {
    if status.is_terminal() {
        return DisplayStatus::Stored(status);
    }
    if scheduled_date < today {
        DisplayStatus::Overdue
    } else if scheduled_date == today {
        DisplayStatus::Today
    } else {
        DisplayStatus::Stored(status)
    }
}

impl DisplayStatus {
    pub fn key(&self) -> &'static str {
        match self {
            DisplayStatus::Stored(status) => status.as_str(),
            DisplayStatus::Overdue => "overdue",
            DisplayStatus::Today => "today",
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, DisplayStatus::Overdue)
    }

    pub fn calendar_color(&self) -> BadgeColor {
        match self {
            DisplayStatus::Overdue => BadgeColor::Red,
            DisplayStatus::Today => BadgeColor::Orange,
            DisplayStatus::Stored(VerificationStatus::Planned) => BadgeColor::Blue,
            DisplayStatus::Stored(VerificationStatus::InProgress) => BadgeColor::Blue,
            DisplayStatus::Stored(VerificationStatus::Pending) => BadgeColor::Yellow,
            DisplayStatus::Stored(VerificationStatus::Completed) => BadgeColor::Green,
            DisplayStatus::Stored(VerificationStatus::Cancelled) => BadgeColor::Red,
        }
    }
}

impl Badge for DisplayStatus {
    fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Stored(status) => status.label(),
            DisplayStatus::Overdue => "En retard",
            DisplayStatus::Today => "Aujourd'hui",
        }
    }

    fn badge(&self) -> StatusBadge {
        match self {
            DisplayStatus::Stored(status) => status.badge(),
            DisplayStatus::Overdue => StatusBadge {
                label: self.label().to_string(),
                color: BadgeColor::Red,
                icon: BadgeIcon::AlertTriangle,
            },
            DisplayStatus::Today => StatusBadge {
                label: self.label().to_string(),
                color: BadgeColor::Orange,
                icon: BadgeIcon::Clock,
            },
        }
    }
}

/// Serialized form of a display status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationDisplay {
    /// Stored status slug, or "overdue" / "today"
    pub key: String,
    pub badge: StatusBadge,
    pub overdue: bool,
    pub calendar_color: BadgeColor,
}

impl From<DisplayStatus> for VerificationDisplay {
    fn from(d: DisplayStatus) -> Self {
        Self {
            key: d.key().to_string(),
            badge: d.badge(),
            overdue: d.is_overdue(),
            calendar_color: d.calendar_color(),
        }
    }
}

/// All-day calendar entry for one verification
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub all_day: bool,
    pub color: BadgeColor,
    pub display: VerificationDisplay,
}

impl CalendarEvent {
    pub fn from_verification(v: &Verification, today: NaiveDate) -> Self {
        let display = derive_display_status(v.status, v.scheduled_date, today);
        Self {
            id: v.id,
            title: format!("{} - {}", v.equipment_name, v.assignee_label()),
            start: v.scheduled_date,
            end: v.scheduled_date,
            all_day: true,
            color: display.calendar_color(),
            display: display.into(),
        }
    }
}
