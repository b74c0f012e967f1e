//! Business logic services

pub mod alerts;
pub mod cache;
pub mod equipment;
pub mod personnel;
pub mod redis;
pub mod reports;
pub mod requests;
pub mod verifications;

use chrono::NaiveDate;

use crate::{config::StationConfig, error::AppResult, repository::Repository};
use cache::CacheHandle;

/// Local calendar date used for every overdue / today comparison
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub personnel: personnel::PersonnelService,
    pub verifications: verifications::VerificationsService,
    pub requests: requests::RequestsService,
    pub alerts: alerts::AlertsService,
    pub reports: reports::ReportsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, station: StationConfig, cache: CacheHandle) -> Self {
        let equipment = equipment::EquipmentService::new(
            repository.clone(),
            cache.clone(),
            station.default_location.clone(),
        );
        let personnel = personnel::PersonnelService::new(
            repository.clone(),
            cache.clone(),
            station.default_station.clone(),
        );
        let verifications = verifications::VerificationsService::new(repository.clone(), cache.clone());
        let requests = requests::RequestsService::new(repository.clone(), cache.clone());
        let alerts = alerts::AlertsService::new(repository.clone(), cache, station.alert_horizon_days);
        let reports = reports::ReportsService::new(
            repository.clone(),
            equipment.clone(),
            personnel.clone(),
            verifications.clone(),
            alerts.clone(),
            station.upcoming_days,
        );

        Self {
            equipment,
            personnel,
            verifications,
            requests,
            alerts,
            reports,
            repository,
        }
    }

    /// Check the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
