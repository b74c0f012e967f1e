//! Aggregate queries behind the reports and dashboard

use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::AppResult,
    models::enums::{EquipmentStatus, PersonnelStatus},
};

/// Verifications scheduled in one calendar month
#[derive(Debug, FromRow)]
pub struct MonthlyVerifications {
    pub month: NaiveDate,
    pub total: i64,
    pub completed: i64,
    pub compliant: i64,
}

#[derive(Debug, FromRow)]
pub struct TypeCount {
    pub type_name: String,
    pub total: i64,
    pub compliant: i64,
}

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Postgres>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn equipment_by_status(&self) -> AppResult<Vec<(EquipmentStatus, i64)>> {
        let rows = sqlx::query_as::<_, (EquipmentStatus, i64)>(
            "SELECT status, COUNT(*) FROM equipment_items GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn personnel_by_status(&self) -> AppResult<Vec<(PersonnelStatus, i64)>> {
        let rows = sqlx::query_as::<_, (PersonnelStatus, i64)>(
            "SELECT status, COUNT(*) FROM firefighters GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// In-service equipment whose inspection is (up to date, overdue)
    pub async fn inspection_counts(&self, today: NaiveDate) -> AppResult<(i64, i64)> {
        let row: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE next_check_date IS NULL OR next_check_date >= $1),
                   COUNT(*) FILTER (WHERE next_check_date < $1)
            FROM equipment_items
            WHERE status <> 'retired'
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn verifications_by_month(
        &self,
        since: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<MonthlyVerifications>> {
        let rows = sqlx::query_as::<_, MonthlyVerifications>(
            r#"
            SELECT date_trunc('month', check_date)::date AS month,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                   COUNT(*) FILTER (
                       WHERE result IN ('compliant', 'compliant_with_reservations')
                   ) AS compliant
            FROM equipment_checks
            WHERE check_date BETWEEN $1 AND $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(since)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn equipment_by_type(&self) -> AppResult<Vec<TypeCount>> {
        let rows = sqlx::query_as::<_, TypeCount>(
            r#"
            SELECT COALESCE(t.name, 'Type inconnu') AS type_name,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE e.status = 'available') AS compliant
            FROM equipment_items e
            LEFT JOIN equipment_types t ON t.id = e.type_id
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
