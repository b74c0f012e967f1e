//! Closed status vocabularies
//!
//! Every status column is stored as a snake-case slug. Parsing accepts the
//! slug, the French label and the legacy spellings found in older rows, so a
//! row written as "bon" or "Available" decodes to the same variant.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use unicode_normalization::UnicodeNormalization;
use utoipa::ToSchema;

/// Implements string conversions and the sqlx TEXT column mapping for a
/// vocabulary enum that already has `as_str()` and `FromStr<Err = String>`.
macro_rules! text_vocabulary {
    ($ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = String;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

fn normalize(s: &str) -> String {
    s.trim().nfc().collect::<String>().to_lowercase()
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Condition of an equipment item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum EquipmentStatus {
    Available,
    Maintenance,
    Retired,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 3] = [
        EquipmentStatus::Available,
        EquipmentStatus::Maintenance,
        EquipmentStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Retired => "retired",
        }
    }
}

impl Default for EquipmentStatus {
    fn default() -> Self {
        EquipmentStatus::Available
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "available" | "disponible" | "bon" | "bon état" | "good" => Ok(EquipmentStatus::Available),
            "maintenance" | "en maintenance" | "moyen" | "à vérifier" => Ok(EquipmentStatus::Maintenance),
            "retired" | "mauvais" | "à remplacer" | "hors service" => Ok(EquipmentStatus::Retired),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}

text_vocabulary!(EquipmentStatus);

// ---------------------------------------------------------------------------
// PersonnelStatus
// ---------------------------------------------------------------------------

/// Availability of a firefighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PersonnelStatus {
    Active,
    Training,
    Leave,
    Unavailable,
}

impl PersonnelStatus {
    pub const ALL: [PersonnelStatus; 4] = [
        PersonnelStatus::Active,
        PersonnelStatus::Training,
        PersonnelStatus::Leave,
        PersonnelStatus::Unavailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonnelStatus::Active => "active",
            PersonnelStatus::Training => "training",
            PersonnelStatus::Leave => "leave",
            PersonnelStatus::Unavailable => "unavailable",
        }
    }
}

impl Default for PersonnelStatus {
    fn default() -> Self {
        PersonnelStatus::Active
    }
}

impl std::str::FromStr for PersonnelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" | "actif" => Ok(PersonnelStatus::Active),
            "training" | "formation" | "en formation" => Ok(PersonnelStatus::Training),
            "leave" | "congé" | "conge" => Ok(PersonnelStatus::Leave),
            "unavailable" | "indisponible" => Ok(PersonnelStatus::Unavailable),
            _ => Err(format!("Invalid personnel status: {}", s)),
        }
    }
}

text_vocabulary!(PersonnelStatus);

// ---------------------------------------------------------------------------
// VerificationStatus
// ---------------------------------------------------------------------------

/// Stored lifecycle state of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum VerificationStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
    Pending,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Planned => "planned",
            VerificationStatus::InProgress => "in_progress",
            VerificationStatus::Completed => "completed",
            VerificationStatus::Cancelled => "cancelled",
            VerificationStatus::Pending => "pending",
        }
    }

    /// Completed and cancelled verifications are never re-dated
    pub fn is_terminal(&self) -> bool {
        matches!(self, VerificationStatus::Completed | VerificationStatus::Cancelled)
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        VerificationStatus::Planned
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "planned" | "planifié" | "planifie" => Ok(VerificationStatus::Planned),
            "in_progress" | "en cours" => Ok(VerificationStatus::InProgress),
            "completed" | "terminé" | "termine" => Ok(VerificationStatus::Completed),
            "cancelled" | "annulé" | "annule" => Ok(VerificationStatus::Cancelled),
            "pending" | "en attente" => Ok(VerificationStatus::Pending),
            _ => Err(format!("Invalid verification status: {}", s)),
        }
    }
}

text_vocabulary!(VerificationStatus);

// ---------------------------------------------------------------------------
// VerificationType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum VerificationType {
    ComplianceCheck,
    PeriodicCheck,
    PreventiveMaintenance,
    Repair,
}

impl VerificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::ComplianceCheck => "compliance_check",
            VerificationType::PeriodicCheck => "periodic_check",
            VerificationType::PreventiveMaintenance => "preventive_maintenance",
            VerificationType::Repair => "repair",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerificationType::ComplianceCheck => "Contrôle de conformité",
            VerificationType::PeriodicCheck => "Vérification périodique",
            VerificationType::PreventiveMaintenance => "Maintenance préventive",
            VerificationType::Repair => "Réparation",
        }
    }
}

impl Default for VerificationType {
    fn default() -> Self {
        VerificationType::PeriodicCheck
    }
}

impl std::str::FromStr for VerificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "compliance_check" | "contrôle de conformité" => Ok(VerificationType::ComplianceCheck),
            "periodic_check" | "vérification périodique" => Ok(VerificationType::PeriodicCheck),
            "preventive_maintenance" | "maintenance préventive" => Ok(VerificationType::PreventiveMaintenance),
            "repair" | "réparation" => Ok(VerificationType::Repair),
            _ => Err(format!("Invalid verification type: {}", s)),
        }
    }
}

text_vocabulary!(VerificationType);

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Verification priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" | "basse" => Ok(Priority::Low),
            "normal" | "normale" => Ok(Priority::Normal),
            "high" | "haute" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

text_vocabulary!(Priority);

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

/// Outcome recorded when a verification is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum CheckResult {
    Compliant,
    CompliantWithReservations,
    NonCompliant,
    MaintenanceRequired,
    WithdrawFromService,
}

impl CheckResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckResult::Compliant => "compliant",
            CheckResult::CompliantWithReservations => "compliant_with_reservations",
            CheckResult::NonCompliant => "non_compliant",
            CheckResult::MaintenanceRequired => "maintenance_required",
            CheckResult::WithdrawFromService => "withdraw_from_service",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckResult::Compliant => "Conforme",
            CheckResult::CompliantWithReservations => "Conforme avec réserves",
            CheckResult::NonCompliant => "Non conforme",
            CheckResult::MaintenanceRequired => "Maintenance requise",
            CheckResult::WithdrawFromService => "À retirer du service",
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, CheckResult::Compliant | CheckResult::CompliantWithReservations)
    }

    /// Equipment status implied by this result, if it changes anything
    pub fn equipment_status(&self) -> Option<EquipmentStatus> {
        match self {
            CheckResult::Compliant | CheckResult::CompliantWithReservations => None,
            CheckResult::MaintenanceRequired => Some(EquipmentStatus::Maintenance),
            CheckResult::NonCompliant | CheckResult::WithdrawFromService => Some(EquipmentStatus::Retired),
        }
    }
}

impl std::str::FromStr for CheckResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "compliant" | "conforme" => Ok(CheckResult::Compliant),
            "compliant_with_reservations" | "conforme avec réserves" => Ok(CheckResult::CompliantWithReservations),
            "non_compliant" | "non conforme" => Ok(CheckResult::NonCompliant),
            "maintenance_required" | "maintenance requise" => Ok(CheckResult::MaintenanceRequired),
            "withdraw_from_service" | "à retirer du service" => Ok(CheckResult::WithdrawFromService),
            _ => Err(format!("Invalid check result: {}", s)),
        }
    }
}

text_vocabulary!(CheckResult);

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum RequestType {
    Replacement,
    Repair,
    NewEquipment,
    Other,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Replacement => "replacement",
            RequestType::Repair => "repair",
            RequestType::NewEquipment => "new_equipment",
            RequestType::Other => "other",
        }
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "replacement" | "remplacement" => Ok(RequestType::Replacement),
            "repair" | "réparation" => Ok(RequestType::Repair),
            "new_equipment" | "nouvel équipement" => Ok(RequestType::NewEquipment),
            "other" | "autre" => Ok(RequestType::Other),
            _ => Err(format!("Invalid request type: {}", s)),
        }
    }
}

text_vocabulary!(RequestType);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum RequestStatus {
    Open,
    Resolved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Resolved => "resolved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" | "ouverte" | "en attente" => Ok(RequestStatus::Open),
            "resolved" | "résolue" | "traitée" => Ok(RequestStatus::Resolved),
            "rejected" | "refusée" => Ok(RequestStatus::Rejected),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

text_vocabulary!(RequestStatus);

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AlertType {
    EquipmentExpiration,
    MaintenanceRequired,
    TrainingExpired,
    VerificationOverdue,
    VerificationToday,
    ReplacementRequired,
    RegulatoryUpdate,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::EquipmentExpiration => "equipment_expiration",
            AlertType::MaintenanceRequired => "maintenance_required",
            AlertType::TrainingExpired => "training_expired",
            AlertType::VerificationOverdue => "verification_overdue",
            AlertType::VerificationToday => "verification_today",
            AlertType::ReplacementRequired => "replacement_required",
            AlertType::RegulatoryUpdate => "regulatory_update",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertType::EquipmentExpiration => "Expiration EPI",
            AlertType::MaintenanceRequired => "Maintenance requise",
            AlertType::TrainingExpired => "Formation échue",
            AlertType::VerificationOverdue => "Vérification en retard",
            AlertType::VerificationToday => "Vérification du jour",
            AlertType::ReplacementRequired => "Remplacement nécessaire",
            AlertType::RegulatoryUpdate => "Mise à jour réglementaire",
        }
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "equipment_expiration" | "expiration epi" => Ok(AlertType::EquipmentExpiration),
            "maintenance_required" | "maintenance requise" => Ok(AlertType::MaintenanceRequired),
            "training_expired" | "formation échue" => Ok(AlertType::TrainingExpired),
            "verification_overdue" | "vérification en retard" => Ok(AlertType::VerificationOverdue),
            "verification_today" | "vérification du jour" => Ok(AlertType::VerificationToday),
            "replacement_required" | "remplacement nécessaire" => Ok(AlertType::ReplacementRequired),
            "regulatory_update" | "mise à jour réglementaire" => Ok(AlertType::RegulatoryUpdate),
            _ => Err(format!("Invalid alert type: {}", s)),
        }
    }
}

text_vocabulary!(AlertType);

/// Alert urgency, ordered from least to most pressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertPriority::Low => "low",
            AlertPriority::Medium => "medium",
            AlertPriority::High => "high",
            AlertPriority::Critical => "critical",
        }
    }
}

impl Default for AlertPriority {
    fn default() -> Self {
        AlertPriority::Medium
    }
}

impl std::str::FromStr for AlertPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" | "basse" => Ok(AlertPriority::Low),
            "medium" | "moyenne" => Ok(AlertPriority::Medium),
            "high" | "haute" => Ok(AlertPriority::High),
            "critical" | "critique" => Ok(AlertPriority::Critical),
            _ => Err(format!("Invalid alert priority: {}", s)),
        }
    }
}

text_vocabulary!(AlertPriority);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_synonyms() {
        for s in ["Available", "disponible", "bon", "Bon état", " BON "] {
            assert_eq!(s.parse::<EquipmentStatus>(), Ok(EquipmentStatus::Available), "{}", s);
        }
        assert_eq!("moyen".parse::<EquipmentStatus>(), Ok(EquipmentStatus::Maintenance));
        assert_eq!("Mauvais".parse::<EquipmentStatus>(), Ok(EquipmentStatus::Retired));
        assert!("broken".parse::<EquipmentStatus>().is_err());
    }

    #[test]
    fn test_french_labels_parse() {
        assert_eq!("Congé".parse::<PersonnelStatus>(), Ok(PersonnelStatus::Leave));
        assert_eq!("En formation".parse::<PersonnelStatus>(), Ok(PersonnelStatus::Training));
        assert_eq!("Planifié".parse::<VerificationStatus>(), Ok(VerificationStatus::Planned));
        assert_eq!("En attente".parse::<VerificationStatus>(), Ok(VerificationStatus::Pending));
        assert_eq!("Normale".parse::<Priority>(), Ok(Priority::Normal));
        assert_eq!("Non conforme".parse::<CheckResult>(), Ok(CheckResult::NonCompliant));
    }

    #[test]
    fn test_slug_roundtrip_through_display() {
        for status in EquipmentStatus::ALL {
            assert_eq!(status.to_string().parse::<EquipmentStatus>(), Ok(status));
        }
        for status in PersonnelStatus::ALL {
            assert_eq!(status.to_string().parse::<PersonnelStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(VerificationStatus::Completed.is_terminal());
        assert!(VerificationStatus::Cancelled.is_terminal());
        assert!(!VerificationStatus::Planned.is_terminal());
        assert!(!VerificationStatus::InProgress.is_terminal());
        assert!(!VerificationStatus::Pending.is_terminal());
    }

    #[test]
    fn test_json_accepts_legacy_spelling() {
        let status: EquipmentStatus = serde_json::from_str("\"Retired\"").unwrap();
        assert_eq!(status, EquipmentStatus::Retired);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"retired\"");

        let status: VerificationStatus = serde_json::from_str("\"Annulé\"").unwrap();
        assert_eq!(status, VerificationStatus::Cancelled);
    }

    #[test]
    fn test_result_moves_equipment_status() {
        assert_eq!(CheckResult::Compliant.equipment_status(), None);
        assert_eq!(
            CheckResult::MaintenanceRequired.equipment_status(),
            Some(EquipmentStatus::Maintenance)
        );
        assert_eq!(
            CheckResult::WithdrawFromService.equipment_status(),
            Some(EquipmentStatus::Retired)
        );
    }
}
