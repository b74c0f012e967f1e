//! Verification scheduling service

use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use super::{
    cache::{CacheHandle, Collection},
    today,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::VerificationStatus,
        verification::{
            CompleteVerification, ScheduleVerification, UpdateVerification, Verification,
            VerificationDetails, VerificationQuery,
        },
    },
    repository::Repository,
    rules::{
        schedule::{derive_display_status, CalendarEvent},
        search::filter_by_term,
    },
};

/// Rows matching the stored-status, overdue and search filters (all combined)
pub fn apply_query(
    rows: Vec<Verification>,
    query: &VerificationQuery,
    today: NaiveDate,
) -> Vec<Verification> {
    let mut rows = rows;
    if let Some(status) = query.status {
        rows.retain(|v| v.status == status);
    }
    if let Some(overdue) = query.overdue {
        rows.retain(|v| derive_display_status(v.status, v.scheduled_date, today).is_overdue() == overdue);
    }
    filter_by_term(rows, query.search.as_deref())
}

/// Refuse edits on a closed verification, and status changes that would skip
/// the cancel and complete operations
pub fn check_editable(current: VerificationStatus, data: &UpdateVerification) -> AppResult<()> {
    if current.is_terminal() {
        return Err(AppError::BadRequest(format!(
            "A {} verification can no longer be edited",
            current.as_str()
        )));
    }
    match data.status {
        Some(status) if status.is_terminal() => Err(AppError::BadRequest(format!(
            "Status {} is set through the cancel or complete operations",
            status.as_str()
        ))),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct VerificationsService {
    repository: Repository,
    cache: CacheHandle,
}

impl VerificationsService {
    pub fn new(repository: Repository, cache: CacheHandle) -> Self {
        Self { repository, cache }
    }

    pub async fn rows(&self) -> AppResult<Vec<Verification>> {
        self.cache
            .fetch(Collection::Verifications, || self.repository.verifications.list())
            .await
    }

    pub async fn list(&self, query: &VerificationQuery) -> AppResult<Vec<VerificationDetails>> {
        let today = today();
        let rows = apply_query(self.rows().await?, query, today);
        tracing::debug!("Fetched {} verifications", rows.len());
        Ok(rows
            .into_iter()
            .map(|v| VerificationDetails::new(v, today))
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VerificationDetails> {
        let verification = self.repository.verifications.get_by_id(id).await?;
        Ok(VerificationDetails::new(verification, today()))
    }

    /// Calendar entries between two dates, both included
    pub async fn calendar(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<CalendarEvent>> {
        if end < start {
            return Err(AppError::BadRequest(format!(
                "Calendar end {} is before start {}",
                end, start
            )));
        }
        let today = today();
        Ok(self
            .rows()
            .await?
            .iter()
            .filter(|v| v.scheduled_date >= start && v.scheduled_date <= end)
            .map(|v| CalendarEvent::from_verification(v, today))
            .collect())
    }

    /// Plan a verification. Unknown equipment or assignee creates nothing.
    pub async fn schedule(&self, data: &ScheduleVerification) -> AppResult<VerificationDetails> {
        data.validate()?;

        let equipment_id = match (data.equipment_id, data.serial_number.as_deref()) {
            (Some(id), _) => self.repository.equipment.get_by_id(id).await?.id,
            (None, Some(serial)) => {
                self.repository
                    .equipment
                    .find_by_serial(serial.trim())
                    .await?
                    .ok_or_else(|| {
                        tracing::warn!("Cannot schedule a verification for unknown serial {}", serial);
                        AppError::equipment_not_found(serial.trim())
                    })?
                    .id
            }
            (None, None) => {
                return Err(AppError::Validation(
                    "equipment_id or serial_number is required".to_string(),
                ))
            }
        };
        self.ensure_assignee(data.assignee_id).await?;

        let verification = self.repository.verifications.create(equipment_id, data).await?;

        self.cache.invalidate(Collection::Verifications).await;
        tracing::info!(
            "Verification of {} scheduled on {} for {}",
            verification.equipment_name,
            verification.scheduled_date,
            verification.assignee_label()
        );
        Ok(VerificationDetails::new(verification, today()))
    }

    pub async fn update(&self, id: Uuid, data: &UpdateVerification) -> AppResult<VerificationDetails> {
        data.validate()?;
        let current = self.repository.verifications.get_by_id(id).await?;
        check_editable(current.status, data)?;
        if let Some(assignee_id) = data.assignee_id {
            self.ensure_assignee(assignee_id).await?;
        }
        let verification = self.repository.verifications.update(id, data).await?;

        self.cache.invalidate(Collection::Verifications).await;
        tracing::info!("Verification {} updated", id);
        Ok(VerificationDetails::new(verification, today()))
    }

    /// Cancel a verification; cancelling twice is a no-op
    pub async fn cancel(&self, id: Uuid) -> AppResult<VerificationDetails> {
        let current = self.repository.verifications.get_by_id(id).await?;
        let verification = match current.status {
            VerificationStatus::Cancelled => current,
            VerificationStatus::Completed => {
                return Err(AppError::BadRequest(format!(
                    "Verification {} is already completed",
                    id
                )))
            }
            _ => {
                let cancelled = self
                    .repository
                    .verifications
                    .set_status(id, VerificationStatus::Cancelled)
                    .await?;
                self.cache.invalidate(Collection::Verifications).await;
                tracing::info!("Verification {} cancelled", id);
                cancelled
            }
        };
        Ok(VerificationDetails::new(verification, today()))
    }

    /// Record the outcome and stamp the inspected equipment
    pub async fn complete(&self, id: Uuid, data: &CompleteVerification) -> AppResult<VerificationDetails> {
        data.validate()?;
        // a cancelled verification is refused inside the completing UPDATE
        let verification = self
            .repository
            .verifications
            .complete(id, data, today())
            .await?;

        // the equipment row changed too
        self.cache.invalidate(Collection::Equipment).await;
        tracing::info!(
            "Verification {} completed: {}",
            id,
            data.result.label()
        );
        Ok(VerificationDetails::new(verification, today()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.verifications.delete(id).await?;

        self.cache.invalidate(Collection::Verifications).await;
        tracing::info!("Verification {} deleted", id);
        Ok(())
    }

    async fn ensure_assignee(&self, assignee_id: Uuid) -> AppResult<()> {
        if self.repository.personnel.exists(assignee_id).await? {
            Ok(())
        } else {
            Err(AppError::personnel_not_found(assignee_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Priority, VerificationType};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    fn verification(name: &str, days_from_today: i64, status: VerificationStatus) -> Verification {
        Verification {
            id: Uuid::new_v4(),
            equipment_id: Uuid::new_v4(),
            equipment_serial: Some(format!("{}-001", name.to_uppercase())),
            equipment_name: name.to_string(),
            verification_type: VerificationType::PeriodicCheck,
            scheduled_date: today() + Duration::days(days_from_today),
            assignee_id: Uuid::new_v4(),
            assignee_name: Some("Pierre Moreau".to_string()),
            priority: Priority::Normal,
            status,
            result: None,
            completed_at: None,
            notes: None,
            created_at: None,
        }
    }

    fn rows() -> Vec<Verification> {
        vec![
            verification("ARI", -3, VerificationStatus::Planned),
            verification("Casque", -3, VerificationStatus::Completed),
            verification("Gants", 0, VerificationStatus::Pending),
            verification("Veste", 5, VerificationStatus::Planned),
        ]
    }

    fn names(rows: &[Verification]) -> Vec<&str> {
        rows.iter().map(|v| v.equipment_name.as_str()).collect()
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        assert_eq!(apply_query(rows(), &VerificationQuery::default(), today()).len(), 4);
    }

    #[test]
    fn test_status_and_search_combine() {
        let query = VerificationQuery {
            search: Some("a".to_string()),
            status: Some(VerificationStatus::Planned),
            overdue: None,
        };
        assert_eq!(names(&apply_query(rows(), &query, today())), vec!["ARI", "Veste"]);
    }

    #[test]
    fn test_overdue_filter_uses_display_status() {
        let query = VerificationQuery {
            overdue: Some(true),
            ..Default::default()
        };
        // the completed one is as old but terminal
        assert_eq!(names(&apply_query(rows(), &query, today())), vec!["ARI"]);
    }

    #[test]
    fn test_search_by_serial_and_assignee() {
        let query = VerificationQuery {
            search: Some("gants-001".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&apply_query(rows(), &query, today())), vec!["Gants"]);

        let query = VerificationQuery {
            search: Some("moreau".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_query(rows(), &query, today()).len(), 4);
    }

    #[test]
    fn test_closed_verification_is_not_editable() {
        let data = UpdateVerification {
            notes: Some("Revoir la date".to_string()),
            ..Default::default()
        };
        assert!(check_editable(VerificationStatus::Planned, &data).is_ok());
        assert!(matches!(
            check_editable(VerificationStatus::Cancelled, &data),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            check_editable(VerificationStatus::Completed, &data),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_update_cannot_close_a_verification() {
        for status in [VerificationStatus::Completed, VerificationStatus::Cancelled] {
            let data = UpdateVerification {
                status: Some(status),
                ..Default::default()
            };
            assert!(matches!(
                check_editable(VerificationStatus::Planned, &data),
                Err(AppError::BadRequest(_))
            ));
        }

        let data = UpdateVerification {
            status: Some(VerificationStatus::InProgress),
            ..Default::default()
        };
        assert!(check_editable(VerificationStatus::Pending, &data).is_ok());
    }
}
