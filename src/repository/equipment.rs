//! Equipment repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{
            CreateEquipment, CreateEquipmentType, Equipment, EquipmentAssignment, EquipmentType,
            UpdateEquipment,
        },
    },
};

/// Equipment rows with type and holder names joined in
const EQUIPMENT_SELECT: &str = r#"
    SELECT e.id, e.type_id,
           COALESCE(t.name, 'Type inconnu') AS type_name,
           e.serial_number,
           e.assigned_to AS assigned_to_id,
           f.first_name || ' ' || f.last_name AS assigned_to_name,
           e.status, e.last_check_date, e.next_check_date, e.purchase_date,
           e.location, e.created_at, e.updated_at
    FROM equipment_items e
    LEFT JOIN equipment_types t ON t.id = e.type_id
    LEFT JOIN firefighters f ON f.id = e.assigned_to
"#;

/// Values the service resolves before an insert
pub struct NewEquipment<'a> {
    pub data: &'a CreateEquipment,
    pub type_id: Uuid,
    pub status: EquipmentStatus,
    pub purchase_date: NaiveDate,
    /// Start date of the first assignment row
    pub created_on: NaiveDate,
    pub location: &'a str,
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List every item, most recent first
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let query = format!("{} ORDER BY e.created_at DESC, e.serial_number", EQUIPMENT_SELECT);
        let rows = sqlx::query_as::<_, Equipment>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Equipment> {
        let query = format!("{} WHERE e.id = $1", EQUIPMENT_SELECT);
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::equipment_not_found(id))
    }

    pub async fn find_by_serial(&self, serial_number: &str) -> AppResult<Option<Equipment>> {
        let query = format!("{} WHERE e.serial_number = $1", EQUIPMENT_SELECT);
        let row = sqlx::query_as::<_, Equipment>(&query)
            .bind(serial_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Items currently held by a firefighter
    pub async fn list_by_personnel(&self, personnel_id: Uuid) -> AppResult<Vec<Equipment>> {
        let query = format!(
            "{} WHERE e.assigned_to = $1 ORDER BY t.name, e.serial_number",
            EQUIPMENT_SELECT
        );
        let rows = sqlx::query_as::<_, Equipment>(&query)
            .bind(personnel_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create the item and, when it starts assigned, its first history row
    pub async fn create(&self, new: NewEquipment<'_>) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO equipment_items
                (type_id, serial_number, assigned_to, status, last_check_date,
                 next_check_date, purchase_date, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(new.type_id)
        .bind(new.data.serial_number.trim())
        .bind(new.data.assigned_to_id)
        .bind(new.status)
        .bind(new.data.last_check_date)
        .bind(new.data.next_check_date)
        .bind(new.purchase_date)
        .bind(new.location)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::on_unique_violation(
                e,
                format!("Serial number {} already exists", new.data.serial_number.trim()),
            )
        })?;

        if let Some(personnel_id) = new.data.assigned_to_id {
            sqlx::query(
                r#"
                INSERT INTO equipment_assignments (equipment_item_id, firefighter_id, assignment_date)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(id)
            .bind(personnel_id)
            .bind(new.created_on)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.get_by_id(id).await
    }

    /// Update the given fields only
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateEquipment,
        type_id: Option<Uuid>,
    ) -> AppResult<Equipment> {
        let serial_number = data.serial_number.as_ref().map(|s| s.trim().to_string());
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

        add_field!(type_id, "type_id");
        add_field!(serial_number, "serial_number");
        add_field!(data.status, "status");
        add_field!(data.purchase_date, "purchase_date");
        add_field!(data.last_check_date, "last_check_date");
        add_field!(data.next_check_date, "next_check_date");
        add_field!(data.location, "location");

        let query = format!(
            "UPDATE equipment_items SET {} WHERE id = ${}",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(type_id);
        bind_field!(serial_number);
        bind_field!(data.status);
        bind_field!(data.purchase_date);
        bind_field!(data.last_check_date);
        bind_field!(data.next_check_date);
        bind_field!(data.location);

        let result = builder
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::on_unique_violation(e, "Serial number already exists"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::equipment_not_found(id));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::equipment_not_found(id));
        }
        Ok(())
    }

    /// Hand the item to a firefighter, closing any open assignment first
    pub async fn assign(&self, id: Uuid, personnel_id: Uuid, on: NaiveDate) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE equipment_items SET assigned_to = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(personnel_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::equipment_not_found(id));
        }

        Self::close_open_assignment(&mut tx, id, on).await?;

        sqlx::query(
            r#"
            INSERT INTO equipment_assignments (equipment_item_id, firefighter_id, assignment_date)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(personnel_id)
        .bind(on)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        self.get_by_id(id).await
    }

    /// Return the item to the store
    pub async fn unassign(&self, id: Uuid, on: NaiveDate) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE equipment_items SET assigned_to = NULL, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::equipment_not_found(id));
        }

        Self::close_open_assignment(&mut tx, id, on).await?;

        tx.commit().await?;
        self.get_by_id(id).await
    }

    async fn close_open_assignment(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: Uuid,
        on: NaiveDate,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE equipment_assignments SET return_date = $1
            WHERE equipment_item_id = $2 AND return_date IS NULL
            "#,
        )
        .bind(on)
        .bind(id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Assignment history, current assignment first
    pub async fn assignments(&self, id: Uuid) -> AppResult<Vec<EquipmentAssignment>> {
        let rows = sqlx::query_as::<_, EquipmentAssignment>(
            r#"
            SELECT a.id, a.equipment_item_id AS equipment_id, a.firefighter_id AS personnel_id,
                   f.first_name || ' ' || f.last_name AS personnel_name,
                   a.assignment_date, a.return_date
            FROM equipment_assignments a
            LEFT JOIN firefighters f ON f.id = a.firefighter_id
            WHERE a.equipment_item_id = $1
            ORDER BY a.return_date IS NOT NULL, a.assignment_date DESC, a.created_at DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        let rows = sqlx::query_as::<_, EquipmentType>(
            "SELECT id, name, description, lifespan_months, created_at FROM equipment_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_type(&self, data: &CreateEquipmentType) -> AppResult<EquipmentType> {
        sqlx::query_as::<_, EquipmentType>(
            r#"
            INSERT INTO equipment_types (name, description, lifespan_months)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, lifespan_months, created_at
            "#,
        )
        .bind(data.name.trim())
        .bind(&data.description)
        .bind(data.lifespan_months)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::on_unique_violation(e, format!("Equipment type {} already exists", data.name.trim()))
        })
    }

    /// Id of the named type, creating it when missing
    pub async fn find_or_create_type(&self, name: &str) -> AppResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO equipment_types (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
