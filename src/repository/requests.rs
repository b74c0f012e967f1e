//! Equipment requests repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RequestStatus,
        request::{CreateRequest, EquipmentRequest},
    },
};

const REQUEST_SELECT: &str = r#"
    SELECT r.id, r.requester_id,
           f.first_name || ' ' || f.last_name AS requester_name,
           r.equipment_item_id AS equipment_id,
           e.serial_number AS equipment_serial,
           r.request_type, r.description, r.status, r.created_at, r.resolved_at
    FROM requests r
    LEFT JOIN firefighters f ON f.id = r.requester_id
    LEFT JOIN equipment_items e ON e.id = r.equipment_item_id
"#;

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open requests first, then newest
    pub async fn list(&self) -> AppResult<Vec<EquipmentRequest>> {
        let query = format!(
            "{} ORDER BY r.resolved_at IS NOT NULL, r.created_at DESC",
            REQUEST_SELECT
        );
        let rows = sqlx::query_as::<_, EquipmentRequest>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<EquipmentRequest> {
        let query = format!("{} WHERE r.id = $1", REQUEST_SELECT);
        sqlx::query_as::<_, EquipmentRequest>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Request {} not found", id)))
    }

    pub async fn create(&self, data: &CreateRequest) -> AppResult<EquipmentRequest> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO requests (requester_id, equipment_item_id, request_type, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(data.requester_id)
        .bind(data.equipment_id)
        .bind(data.request_type)
        .bind(data.description.trim())
        .bind(RequestStatus::Open)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn resolve(&self, id: Uuid, status: RequestStatus) -> AppResult<EquipmentRequest> {
        let result = sqlx::query("UPDATE requests SET status = $1, resolved_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Request {} not found", id)));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Request {} not found", id)));
        }
        Ok(())
    }
}
