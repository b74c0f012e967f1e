//! Repository layer for database operations

pub mod alerts;
pub mod equipment;
pub mod personnel;
pub mod reports;
pub mod requests;
pub mod verifications;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub personnel: personnel::PersonnelRepository,
    pub verifications: verifications::VerificationsRepository,
    pub requests: requests::RequestsRepository,
    pub alerts: alerts::AlertsRepository,
    pub reports: reports::ReportsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            personnel: personnel::PersonnelRepository::new(pool.clone()),
            verifications: verifications::VerificationsRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            alerts: alerts::AlertsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
