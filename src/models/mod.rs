//! Data models for Caserne EPI

pub mod alert;
pub mod enums;
pub mod equipment;
pub mod personnel;
pub mod request;
pub mod verification;

use validator::ValidationError;

/// Rejects text that is empty once surrounding whitespace is removed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// Re-export commonly used types
pub use alert::{Alert, AlertSource};
pub use enums::{
    AlertPriority, AlertType, CheckResult, EquipmentStatus, PersonnelStatus, Priority,
    RequestStatus, RequestType, VerificationStatus, VerificationType,
};
pub use equipment::{Equipment, EquipmentDetails, EquipmentType};
pub use personnel::{Personnel, PersonnelDetails};
pub use request::EquipmentRequest;
pub use verification::{Verification, VerificationDetails};
