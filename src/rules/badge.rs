//! Presentation badges for every status vocabulary
//!
//! Each status type maps to exactly one (label, color, icon) triple here;
//! tables, calendars and dashboards all read from these functions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::enums::{
    AlertPriority, CheckResult, EquipmentStatus, PersonnelStatus, Priority, VerificationStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    Green,
    Orange,
    Red,
    Blue,
    Yellow,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BadgeIcon {
    CheckCircle,
    Clock,
    AlertTriangle,
    Calendar,
    GraduationCap,
    XCircle,
    Bell,
}

/// Label, color and icon shown for a status value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusBadge {
    pub label: String,
    pub color: BadgeColor,
    pub icon: BadgeIcon,
}

impl StatusBadge {
    fn new(label: &str, color: BadgeColor, icon: BadgeIcon) -> Self {
        Self {
            label: label.to_string(),
            color,
            icon,
        }
    }
}

/// Anything that renders as a status badge
pub trait Badge {
    fn label(&self) -> &'static str;
    fn badge(&self) -> StatusBadge;
}

impl Badge for EquipmentStatus {
    fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Bon",
            EquipmentStatus::Maintenance => "Maintenance",
            EquipmentStatus::Retired => "À remplacer",
        }
    }

    fn badge(&self) -> StatusBadge {
        match self {
            EquipmentStatus::Available => StatusBadge::new(self.label(), BadgeColor::Green, BadgeIcon::CheckCircle),
            EquipmentStatus::Maintenance => StatusBadge::new(self.label(), BadgeColor::Orange, BadgeIcon::Clock),
            EquipmentStatus::Retired => StatusBadge::new(self.label(), BadgeColor::Red, BadgeIcon::AlertTriangle),
        }
    }
}

impl Badge for PersonnelStatus {
    fn label(&self) -> &'static str {
        match self {
            PersonnelStatus::Active => "Actif",
            PersonnelStatus::Training => "Formation",
            PersonnelStatus::Leave => "Congé",
            PersonnelStatus::Unavailable => "Indisponible",
        }
    }

    fn badge(&self) -> StatusBadge {
        match self {
            PersonnelStatus::Active => StatusBadge::new(self.label(), BadgeColor::Green, BadgeIcon::CheckCircle),
            PersonnelStatus::Training => StatusBadge::new(self.label(), BadgeColor::Blue, BadgeIcon::GraduationCap),
            PersonnelStatus::Leave => StatusBadge::new(self.label(), BadgeColor::Orange, BadgeIcon::Calendar),
            PersonnelStatus::Unavailable => StatusBadge::new(self.label(), BadgeColor::Red, BadgeIcon::XCircle),
        }
    }
}

impl Badge for VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Planned => "Planifié",
            VerificationStatus::InProgress => "En cours",
            VerificationStatus::Completed => "Terminé",
            VerificationStatus::Cancelled => "Annulé",
            VerificationStatus::Pending => "En attente",
        }
    }

    fn badge(&self) -> StatusBadge {
        match self {
            VerificationStatus::Planned => StatusBadge::new(self.label(), BadgeColor::Blue, BadgeIcon::Calendar),
            VerificationStatus::InProgress => StatusBadge::new(self.label(), BadgeColor::Blue, BadgeIcon::Clock),
            VerificationStatus::Completed => StatusBadge::new(self.label(), BadgeColor::Green, BadgeIcon::CheckCircle),
            VerificationStatus::Cancelled => StatusBadge::new(self.label(), BadgeColor::Gray, BadgeIcon::XCircle),
            VerificationStatus::Pending => StatusBadge::new(self.label(), BadgeColor::Yellow, BadgeIcon::Clock),
        }
    }
}

impl Badge for Priority {
    fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Basse",
            Priority::Normal => "Normale",
            Priority::High => "Haute",
            Priority::Urgent => "Urgent",
        }
    }

    fn badge(&self) -> StatusBadge {
        match self {
            Priority::Low => StatusBadge::new(self.label(), BadgeColor::Gray, BadgeIcon::CheckCircle),
            Priority::Normal => StatusBadge::new(self.label(), BadgeColor::Gray, BadgeIcon::Clock),
            Priority::High => StatusBadge::new(self.label(), BadgeColor::Orange, BadgeIcon::AlertTriangle),
            Priority::Urgent => StatusBadge::new(self.label(), BadgeColor::Red, BadgeIcon::AlertTriangle),
        }
    }
}

impl Badge for AlertPriority {
    fn label(&self) -> &'static str {
        match self {
            AlertPriority::Low => "Basse",
            AlertPriority::Medium => "Moyenne",
            AlertPriority::High => "Haute",
            AlertPriority::Critical => "Critique",
        }
    }

    fn badge(&self) -> StatusBadge {
        match self {
            AlertPriority::Low => StatusBadge::new(self.label(), BadgeColor::Blue, BadgeIcon::CheckCircle),
            AlertPriority::Medium => StatusBadge::new(self.label(), BadgeColor::Orange, BadgeIcon::Clock),
            AlertPriority::High => StatusBadge::new(self.label(), BadgeColor::Red, BadgeIcon::AlertTriangle),
            AlertPriority::Critical => StatusBadge::new(self.label(), BadgeColor::Red, BadgeIcon::Bell),
        }
    }
}

impl Badge for CheckResult {
    fn label(&self) -> &'static str {
        CheckResult::label(self)
    }

    fn badge(&self) -> StatusBadge {
        match self {
            CheckResult::Compliant => StatusBadge::new(self.label(), BadgeColor::Green, BadgeIcon::CheckCircle),
            CheckResult::CompliantWithReservations => {
                StatusBadge::new(self.label(), BadgeColor::Yellow, BadgeIcon::CheckCircle)
            }
            CheckResult::MaintenanceRequired => StatusBadge::new(self.label(), BadgeColor::Orange, BadgeIcon::Clock),
            CheckResult::NonCompliant | CheckResult::WithdrawFromService => {
                StatusBadge::new(self.label(), BadgeColor::Red, BadgeIcon::AlertTriangle)
            }
        }
    }
}
