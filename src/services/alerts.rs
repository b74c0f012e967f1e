//! Alerts service: stored manual alerts merged with derived ones

use uuid::Uuid;
use validator::Validate;

use super::{
    cache::{CacheHandle, Collection},
    today,
};
use crate::{
    error::{AppError, AppResult},
    models::alert::{Alert, CreateAlert},
    repository::Repository,
    rules::alerts::{derive_alerts, sort_alerts},
};

#[derive(Clone)]
pub struct AlertsService {
    repository: Repository,
    cache: CacheHandle,
    horizon_days: i64,
}

impl AlertsService {
    pub fn new(repository: Repository, cache: CacheHandle, horizon_days: i64) -> Self {
        Self {
            repository,
            cache,
            horizon_days,
        }
    }

    /// Active manual alerts and derived alerts, most pressing first
    pub async fn list(&self) -> AppResult<Vec<Alert>> {
        let today = today();
        let manual = self
            .cache
            .fetch(Collection::Alerts, || self.repository.alerts.list_active())
            .await?;
        let equipment = self
            .cache
            .fetch(Collection::Equipment, || self.repository.equipment.list())
            .await?;
        let verifications = self
            .cache
            .fetch(Collection::Verifications, || self.repository.verifications.list())
            .await?;

        let mut alerts: Vec<Alert> = manual.into_iter().map(|a| a.into_alert(today)).collect();
        alerts.extend(derive_alerts(&equipment, &verifications, today, self.horizon_days));
        sort_alerts(&mut alerts);

        tracing::debug!("Computed {} alerts", alerts.len());
        Ok(alerts)
    }

    pub async fn create(&self, data: &CreateAlert) -> AppResult<Alert> {
        data.validate()?;
        if let Some(equipment_id) = data.equipment_id {
            self.repository.equipment.get_by_id(equipment_id).await?;
        }
        if let Some(personnel_id) = data.personnel_id {
            if !self.repository.personnel.exists(personnel_id).await? {
                return Err(AppError::personnel_not_found(personnel_id));
            }
        }
        let alert = self.repository.alerts.create(data).await?;

        self.cache.invalidate(Collection::Alerts).await;
        tracing::info!("Alert \"{}\" created", alert.title);
        Ok(alert.into_alert(today()))
    }

    pub async fn dismiss(&self, id: Uuid) -> AppResult<Alert> {
        let alert = self.repository.alerts.dismiss(id).await?;

        self.cache.invalidate(Collection::Alerts).await;
        tracing::info!("Alert {} dismissed", id);
        Ok(alert.into_alert(today()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.alerts.delete(id).await?;

        self.cache.invalidate(Collection::Alerts).await;
        tracing::info!("Alert {} deleted", id);
        Ok(())
    }
}
