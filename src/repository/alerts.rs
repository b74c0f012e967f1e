//! Manual alerts repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::alert::{CreateAlert, ManualAlert},
};

const ALERT_COLUMNS: &str = r#"
    id, title, alert_type, priority, target_date,
    equipment_item_id AS equipment_id, firefighter_id AS personnel_id,
    description, dismissed_at, created_at
"#;

#[derive(Clone)]
pub struct AlertsRepository {
    pool: Pool<Postgres>,
}

impl AlertsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Alerts that have not been dismissed
    pub async fn list_active(&self) -> AppResult<Vec<ManualAlert>> {
        let query = format!(
            "SELECT {} FROM alerts WHERE dismissed_at IS NULL ORDER BY created_at DESC",
            ALERT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ManualAlert>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &CreateAlert) -> AppResult<ManualAlert> {
        let query = format!(
            r#"
            INSERT INTO alerts
                (title, alert_type, priority, target_date, equipment_item_id, firefighter_id, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            ALERT_COLUMNS
        );
        let row = sqlx::query_as::<_, ManualAlert>(&query)
            .bind(data.title.trim())
            .bind(data.alert_type)
            .bind(data.priority)
            .bind(data.target_date)
            .bind(data.equipment_id)
            .bind(data.personnel_id)
            .bind(&data.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn dismiss(&self, id: Uuid) -> AppResult<ManualAlert> {
        let query = format!(
            "UPDATE alerts SET dismissed_at = COALESCE(dismissed_at, NOW()) WHERE id = $1 RETURNING {}",
            ALERT_COLUMNS
        );
        sqlx::query_as::<_, ManualAlert>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Alert {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Alert {} not found", id)));
        }
        Ok(())
    }
}
