//! Reports and dashboard service

use chrono::{Datelike, Duration, Months, NaiveDate};

use super::{
    alerts::AlertsService, equipment::EquipmentService, personnel::PersonnelService, today,
    verifications::VerificationsService,
};
use crate::{
    api::reports::{
        DashboardResponse, EquipmentReport, MonthlyReport, PersonnelReport, ReportsResponse,
        StatEntry, TypeReport,
    },
    error::AppResult,
    models::{
        alert::Alert,
        enums::{EquipmentStatus, PersonnelStatus},
        equipment::Equipment,
        personnel::Personnel,
        verification::{Verification, VerificationDetails},
    },
    repository::Repository,
    rules::{
        badge::Badge,
        schedule::{derive_display_status, DisplayStatus},
    },
};

/// Alerts shown on the dashboard
const DASHBOARD_ALERTS: usize = 5;

/// Months covered by the verification history
const REPORT_MONTHS: u32 = 6;

/// Percentage with one decimal; zero when there is nothing to count
pub fn compliance_rate(compliant: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (compliant as f64 * 1000.0 / total as f64).round() / 10.0
}

/// First day of each of the last `count` months, oldest first, ending with the month of `today`
pub fn month_starts(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let current = today.with_day(1).unwrap_or(today);
    (0..count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

fn stat<S: Badge>(status: S, key: &str, value: i64) -> StatEntry {
    StatEntry {
        key: key.to_string(),
        label: status.label().to_string(),
        value,
    }
}

/// Dashboard figures from the fetched collections
pub fn summarize(
    equipment: &[Equipment],
    personnel: &[Personnel],
    verifications: &[Verification],
    alerts: Vec<Alert>,
    today: NaiveDate,
    upcoming_days: i64,
) -> DashboardResponse {
    let count_equipment =
        |status: EquipmentStatus| equipment.iter().filter(|e| e.status == status).count() as i64;

    let mut verifications_overdue = 0;
    let mut verifications_today = 0;
    for v in verifications {
        match derive_display_status(v.status, v.scheduled_date, today) {
            DisplayStatus::Overdue => verifications_overdue += 1,
            DisplayStatus::Today => verifications_today += 1,
            DisplayStatus::Stored(_) => {}
        }
    }

    let window_end = today + Duration::days(upcoming_days);
    let mut upcoming: Vec<&Verification> = verifications
        .iter()
        .filter(|v| !v.status.is_terminal())
        .filter(|v| v.scheduled_date >= today && v.scheduled_date <= window_end)
        .collect();
    upcoming.sort_by_key(|v| v.scheduled_date);

    DashboardResponse {
        today,
        equipment_total: equipment.len() as i64,
        equipment_available: count_equipment(EquipmentStatus::Available),
        equipment_in_maintenance: count_equipment(EquipmentStatus::Maintenance),
        equipment_to_replace: count_equipment(EquipmentStatus::Retired),
        personnel_total: personnel.len() as i64,
        personnel_active: personnel
            .iter()
            .filter(|p| p.status == PersonnelStatus::Active)
            .count() as i64,
        verifications_overdue,
        verifications_today,
        upcoming_verifications: upcoming
            .into_iter()
            .map(|v| VerificationDetails::new(v.clone(), today))
            .collect(),
        alerts: alerts.into_iter().take(DASHBOARD_ALERTS).collect(),
    }
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    equipment: EquipmentService,
    personnel: PersonnelService,
    verifications: VerificationsService,
    alerts: AlertsService,
    upcoming_days: i64,
}

impl ReportsService {
    pub fn new(
        repository: Repository,
        equipment: EquipmentService,
        personnel: PersonnelService,
        verifications: VerificationsService,
        alerts: AlertsService,
        upcoming_days: i64,
    ) -> Self {
        Self {
            repository,
            equipment,
            personnel,
            verifications,
            alerts,
            upcoming_days,
        }
    }

    pub async fn overview(&self) -> AppResult<ReportsResponse> {
        let today = today();
        let reports = &self.repository.reports;

        let equipment_counts = reports.equipment_by_status().await?;
        let equipment_of = |status: EquipmentStatus| {
            equipment_counts
                .iter()
                .filter(|(s, _)| *s == status)
                .map(|(_, n)| *n)
                .sum::<i64>()
        };
        let equipment_total: i64 = equipment_counts.iter().map(|(_, n)| n).sum();
        let (inspections_up_to_date, inspections_overdue) = reports.inspection_counts(today).await?;
        let by_type = reports
            .equipment_by_type()
            .await?
            .into_iter()
            .map(|row| TypeReport {
                type_name: row.type_name,
                total: row.total,
                compliant: row.compliant,
            })
            .collect();

        let personnel_counts = reports.personnel_by_status().await?;
        let personnel_of = |status: PersonnelStatus| {
            personnel_counts
                .iter()
                .filter(|(s, _)| *s == status)
                .map(|(_, n)| *n)
                .sum::<i64>()
        };

        let months = month_starts(today, REPORT_MONTHS);
        let since = months.first().copied().unwrap_or(today);
        let until = months
            .last()
            .and_then(|m| m.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt())
            .unwrap_or(today);
        let monthly = reports.verifications_by_month(since, until).await?;
        let verifications_by_month = months
            .iter()
            .map(|month| {
                let row = monthly.iter().find(|r| r.month == *month);
                MonthlyReport {
                    month: month.format("%Y-%m").to_string(),
                    total: row.map(|r| r.total).unwrap_or(0),
                    completed: row.map(|r| r.completed).unwrap_or(0),
                    compliant: row.map(|r| r.compliant).unwrap_or(0),
                }
            })
            .collect();

        let active_alerts = self.alerts.list().await?.len() as i64;

        Ok(ReportsResponse {
            generated_on: today,
            equipment: EquipmentReport {
                total: equipment_total,
                by_status: EquipmentStatus::ALL
                    .iter()
                    .map(|s| stat(*s, s.as_str(), equipment_of(*s)))
                    .collect(),
                compliance_rate: compliance_rate(equipment_of(EquipmentStatus::Available), equipment_total),
                inspections_up_to_date,
                inspections_overdue,
                by_type,
            },
            personnel: PersonnelReport {
                total: personnel_counts.iter().map(|(_, n)| n).sum(),
                by_status: PersonnelStatus::ALL
                    .iter()
                    .map(|s| stat(*s, s.as_str(), personnel_of(*s)))
                    .collect(),
            },
            verifications_by_month,
            active_alerts,
        })
    }

    pub async fn dashboard(&self) -> AppResult<DashboardResponse> {
        let equipment = self.equipment.rows().await?;
        let personnel = self.personnel.rows().await?;
        let verifications = self.verifications.rows().await?;
        let alerts = self.alerts.list().await?;

        Ok(summarize(
            &equipment,
            &personnel,
            &verifications,
            alerts,
            today(),
            self.upcoming_days,
        ))
    }
}
