//! Equipment requests raised by personnel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{
    enums::{RequestStatus, RequestType},
    not_blank,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub requester_name: Option<String>,
    pub equipment_id: Option<Uuid>,
    pub equipment_serial: Option<String>,
    pub request_type: RequestType,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    pub requester_id: Uuid,
    pub equipment_id: Option<Uuid>,
    pub request_type: RequestType,
    #[validate(
        length(max = 2000, message = "Description must be 1-2000 characters"),
        custom(function = "not_blank", message = "Description must be 1-2000 characters")
    )]
    pub description: String,
}

/// Close a request; `Open` is not accepted
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveRequest {
    pub status: RequestStatus,
}

#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RequestQuery {
    pub search: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<RequestStatus>,
}
