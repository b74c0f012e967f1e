//! Verifications repository (the equipment_checks table)

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, VerificationStatus},
        verification::{CompleteVerification, ScheduleVerification, UpdateVerification, Verification},
    },
};

const VERIFICATION_SELECT: &str = r#"
    SELECT c.id, c.equipment_item_id AS equipment_id,
           e.serial_number AS equipment_serial,
           COALESCE(t.name, 'Équipement inconnu') AS equipment_name,
           c.check_type AS verification_type,
           c.check_date AS scheduled_date,
           c.checked_by AS assignee_id,
           f.first_name || ' ' || f.last_name AS assignee_name,
           c.priority, c.status, c.result, c.completed_at, c.notes, c.created_at
    FROM equipment_checks c
    LEFT JOIN equipment_items e ON e.id = c.equipment_item_id
    LEFT JOIN equipment_types t ON t.id = e.type_id
    LEFT JOIN firefighters f ON f.id = c.checked_by
"#;

#[derive(Clone)]
pub struct VerificationsRepository {
    pool: Pool<Postgres>,
}

impl VerificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Every verification ordered by scheduled date
    pub async fn list(&self) -> AppResult<Vec<Verification>> {
        let query = format!("{} ORDER BY c.check_date, c.created_at", VERIFICATION_SELECT);
        let rows = sqlx::query_as::<_, Verification>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Verification> {
        let query = format!("{} WHERE c.id = $1", VERIFICATION_SELECT);
        sqlx::query_as::<_, Verification>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::verification_not_found(id))
    }

    /// Insert a planned verification for an already resolved equipment item
    pub async fn create(&self, equipment_id: Uuid, data: &ScheduleVerification) -> AppResult<Verification> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO equipment_checks
                (equipment_item_id, checked_by, check_type, check_date, priority, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(equipment_id)
        .bind(data.assignee_id)
        .bind(data.verification_type)
        .bind(data.scheduled_date)
        .bind(data.priority)
        .bind(VerificationStatus::Planned)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateVerification) -> AppResult<Verification> {
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.verification_type, "check_type");
        add_field!(data.scheduled_date, "check_date");
        add_field!(data.assignee_id, "checked_by");
        add_field!(data.priority, "priority");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");

        let query = format!("UPDATE equipment_checks SET {} WHERE id = ${}", sets.join(", "), idx);

        let mut builder = sqlx::query(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.verification_type);
        bind_field!(data.scheduled_date);
        bind_field!(data.assignee_id);
        bind_field!(data.priority);
        bind_field!(data.status);
        bind_field!(data.notes);

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::verification_not_found(id));
        }
        self.get_by_id(id).await
    }

    pub async fn set_status(&self, id: Uuid, status: VerificationStatus) -> AppResult<Verification> {
        let result = sqlx::query("UPDATE equipment_checks SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::verification_not_found(id));
        }
        self.get_by_id(id).await
    }

    /// Close the verification and stamp the inspected equipment in one transaction
    pub async fn complete(
        &self,
        id: Uuid,
        data: &CompleteVerification,
        checked_on: NaiveDate,
    ) -> AppResult<Verification> {
        let mut tx = self.pool.begin().await?;

        let equipment_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE equipment_checks
            SET status = $1, result = $2, completed_at = NOW(), updated_at = NOW(),
                notes = COALESCE($3, notes)
            WHERE id = $4 AND status <> $5
            RETURNING equipment_item_id
            "#,
        )
        .bind(VerificationStatus::Completed)
        .bind(data.result)
        .bind(&data.notes)
        .bind(id)
        .bind(VerificationStatus::Cancelled)
        .fetch_optional(&mut *tx)
        .await?;

        let equipment_id = match equipment_id {
            Some(equipment_id) => equipment_id,
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment_checks WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&mut *tx)
                        .await?;
                return Err(if exists {
                    AppError::BadRequest(format!("Verification {} is cancelled", id))
                } else {
                    AppError::verification_not_found(id)
                });
            }
        };

        let new_status: Option<EquipmentStatus> = data.result.equipment_status();
        sqlx::query(
            r#"
            UPDATE equipment_items
            SET last_check_date = $1,
                next_check_date = COALESCE($2, next_check_date),
                status = COALESCE($3, status),
                updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(checked_on)
        .bind(data.next_check_date)
        .bind(new_status)
        .bind(equipment_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_checks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::verification_not_found(id));
        }
        Ok(())
    }
}
