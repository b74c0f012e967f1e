//! Alerts: manual rows and alerts derived from the current inventory

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{
    enums::{AlertPriority, AlertType},
    not_blank,
};
use crate::rules::badge::{Badge, StatusBadge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    /// Stored in the alerts table
    Manual,
    /// Computed from equipment and verifications
    Derived,
}

/// Alert as listed by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    /// Only manual alerts have an id
    pub id: Option<Uuid>,
    pub source: AlertSource,
    pub alert_type: AlertType,
    pub priority: AlertPriority,
    pub priority_badge: StatusBadge,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    /// Days until the target date, negative when past
    pub due_in_days: Option<i64>,
    pub equipment_id: Option<Uuid>,
    pub personnel_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Row of the alerts table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ManualAlert {
    pub id: Uuid,
    pub title: String,
    pub alert_type: AlertType,
    pub priority: AlertPriority,
    pub target_date: Option<NaiveDate>,
    pub equipment_id: Option<Uuid>,
    pub personnel_id: Option<Uuid>,
    pub description: Option<String>,
    pub dismissed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ManualAlert {
    pub fn into_alert(self, today: NaiveDate) -> Alert {
        Alert {
            id: Some(self.id),
            source: AlertSource::Manual,
            alert_type: self.alert_type,
            priority: self.priority,
            priority_badge: self.priority.badge(),
            title: self.title,
            description: self.description,
            target_date: self.target_date,
            due_in_days: self.target_date.map(|d| (d - today).num_days()),
            equipment_id: self.equipment_id,
            personnel_id: self.personnel_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlert {
    #[validate(
        length(max = 255, message = "Title must be 1-255 characters"),
        custom(function = "not_blank", message = "Title must be 1-255 characters")
    )]
    pub title: String,
    pub alert_type: AlertType,
    #[serde(default)]
    pub priority: AlertPriority,
    pub target_date: Option<NaiveDate>,
    pub equipment_id: Option<Uuid>,
    pub personnel_id: Option<Uuid>,
    pub description: Option<String>,
}
