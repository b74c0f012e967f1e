//! Firefighter (personnel) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{enums::PersonnelStatus, not_blank};
use crate::rules::badge::{Badge, StatusBadge};

/// Grade given to personnel created without one
pub const DEFAULT_GRADE: &str = "Sapeur";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Personnel {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub grade: Option<String>,
    pub station: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub status: PersonnelStatus,
    /// Items currently assigned
    pub equipment_count: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Personnel {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersonnelDetails {
    #[serde(flatten)]
    pub personnel: Personnel,
    pub full_name: String,
    pub status_badge: StatusBadge,
}

impl From<Personnel> for PersonnelDetails {
    fn from(personnel: Personnel) -> Self {
        Self {
            full_name: personnel.full_name(),
            status_badge: personnel.status.badge(),
            personnel,
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePersonnel {
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,
    /// Defaults to "Sapeur"
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub grade: Option<String>,
    /// Defaults to the configured station
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub station: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub phone: Option<String>,
    pub status: Option<PersonnelStatus>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePersonnel {
    #[validate(custom(function = "not_blank", message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    pub grade: Option<String>,
    pub station: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<PersonnelStatus>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PersonnelQuery {
    /// Substring of name, grade, station or email
    pub search: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<PersonnelStatus>,
}
