//! Personnel repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::PersonnelStatus,
        personnel::{CreatePersonnel, Personnel, UpdatePersonnel},
    },
};

const PERSONNEL_SELECT: &str = r#"
    SELECT f.id, f.first_name, f.last_name, f.grade, f.station, f.email, f.phone, f.status,
           (SELECT COUNT(*) FROM equipment_items e WHERE e.assigned_to = f.id) AS equipment_count,
           f.created_at
    FROM firefighters f
"#;

#[derive(Clone)]
pub struct PersonnelRepository {
    pool: Pool<Postgres>,
}

impl PersonnelRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List everyone ordered by last name
    pub async fn list(&self) -> AppResult<Vec<Personnel>> {
        let query = format!("{} ORDER BY f.last_name, f.first_name", PERSONNEL_SELECT);
        let rows = sqlx::query_as::<_, Personnel>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Personnel> {
        let query = format!("{} WHERE f.id = $1", PERSONNEL_SELECT);
        sqlx::query_as::<_, Personnel>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::personnel_not_found(id))
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM firefighters WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(
        &self,
        data: &CreatePersonnel,
        grade: &str,
        station: &str,
    ) -> AppResult<Personnel> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO firefighters (first_name, last_name, grade, station, email, phone, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(data.first_name.trim())
        .bind(data.last_name.trim())
        .bind(grade)
        .bind(station)
        .bind(data.email.trim())
        .bind(&data.phone)
        .bind(data.status.unwrap_or(PersonnelStatus::Active))
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdatePersonnel) -> AppResult<Personnel> {
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

        add_field!(data.first_name, "first_name");
        add_field!(data.last_name, "last_name");
        add_field!(data.grade, "grade");
        add_field!(data.station, "station");
        add_field!(data.email, "email");
        add_field!(data.phone, "phone");
        add_field!(data.status, "status");

        let query = format!("UPDATE firefighters SET {} WHERE id = ${}", sets.join(", "), idx);

        let mut builder = sqlx::query(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.first_name);
        bind_field!(data.last_name);
        bind_field!(data.grade);
        bind_field!(data.station);
        bind_field!(data.email);
        bind_field!(data.phone);
        bind_field!(data.status);

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::personnel_not_found(id));
        }
        self.get_by_id(id).await
    }

    /// Delete a firefighter; held equipment goes back to the store
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM firefighters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::personnel_not_found(id));
        }
        Ok(())
    }
}
