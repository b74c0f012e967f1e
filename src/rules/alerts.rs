//! Alerts derived from the equipment and verification collections

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::{
    badge::Badge,
    schedule::{derive_display_status, DisplayStatus},
};
use crate::models::{
    alert::{Alert, AlertSource},
    enums::{AlertPriority, AlertType, EquipmentStatus},
    equipment::Equipment,
    verification::Verification,
};

fn derived(
    alert_type: AlertType,
    priority: AlertPriority,
    description: String,
    target_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Alert {
    Alert {
        id: None,
        source: AlertSource::Derived,
        alert_type,
        priority,
        priority_badge: priority.badge(),
        title: alert_type.label().to_string(),
        description: Some(description),
        target_date,
        due_in_days: target_date.map(|d| (d - today).num_days()),
        equipment_id: None,
        personnel_id: None,
        created_at: None,
    }
}

fn equipment_label(e: &Equipment) -> String {
    match e.assigned_to_name {
        Some(ref name) => format!("{} - {} ({})", e.type_name, e.serial_number, name),
        None => format!("{} - {}", e.type_name, e.serial_number),
    }
}

/// Compute the alerts implied by the current state of the station.
///
/// `horizon_days` is how far ahead a next inspection date raises an
/// expiration alert. Results are ordered by priority (most pressing first),
/// then by target date.
pub fn derive_alerts(
    equipment: &[Equipment],
    verifications: &[Verification],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let mut overdue_equipment: HashSet<Uuid> = HashSet::new();

    for v in verifications {
        let description = format!(
            "{} - {} ({})",
            v.equipment_name,
            v.equipment_serial.as_deref().unwrap_or("?"),
            v.assignee_label()
        );
        let alert = match derive_display_status(v.status, v.scheduled_date, today) {
            DisplayStatus::Overdue => {
                overdue_equipment.insert(v.equipment_id);
                derived(
                    AlertType::VerificationOverdue,
                    AlertPriority::High,
                    description,
                    Some(v.scheduled_date),
                    today,
                )
            }
            DisplayStatus::Today => derived(
                AlertType::VerificationToday,
                AlertPriority::Medium,
                description,
                Some(v.scheduled_date),
                today,
            ),
            DisplayStatus::Stored(_) => continue,
        };
        alerts.push(Alert {
            equipment_id: Some(v.equipment_id),
            personnel_id: Some(v.assignee_id),
            ..alert
        });
    }

    let horizon = today + Duration::days(horizon_days);
    for e in equipment {
        let mut push = |alert: Alert| {
            alerts.push(Alert {
                equipment_id: Some(e.id),
                personnel_id: e.assigned_to_id,
                ..alert
            })
        };

        match e.status {
            EquipmentStatus::Retired => {
                if e.assigned_to_id.is_some() {
                    push(derived(
                        AlertType::ReplacementRequired,
                        AlertPriority::High,
                        equipment_label(e),
                        None,
                        today,
                    ));
                }
                // retired equipment is not inspected any more
                continue;
            }
            EquipmentStatus::Maintenance => push(derived(
                AlertType::MaintenanceRequired,
                AlertPriority::Low,
                equipment_label(e),
                e.next_check_date,
                today,
            )),
            EquipmentStatus::Available => {}
        }

        let Some(next_check) = e.next_check_date else {
            continue;
        };
        if next_check < today {
            if !overdue_equipment.contains(&e.id) {
                push(derived(
                    AlertType::VerificationOverdue,
                    AlertPriority::High,
                    equipment_label(e),
                    Some(next_check),
                    today,
                ));
            }
        } else if next_check <= horizon {
            push(derived(
                AlertType::EquipmentExpiration,
                AlertPriority::Medium,
                equipment_label(e),
                Some(next_check),
                today,
            ));
        }
    }

    sort_alerts(&mut alerts);
    alerts
}

/// Most pressing first, then earliest target date; undated alerts last
pub fn sort_alerts(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| match (a.target_date, b.target_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Priority, VerificationStatus, VerificationType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn item(serial: &str, status: EquipmentStatus, next_check: Option<NaiveDate>, assigned: bool) -> Equipment {
        Equipment {
            id: Uuid::new_v4(),
            type_id: Uuid::new_v4(),
            type_name: "Casque F1".to_string(),
            serial_number: serial.to_string(),
            assigned_to_id: assigned.then(Uuid::new_v4),
            assigned_to_name: assigned.then(|| "Martin Dubois".to_string()),
            status,
            last_check_date: None,
            next_check_date: next_check,
            purchase_date: NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
            location: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn check(equipment: &Equipment, date: NaiveDate, status: VerificationStatus) -> Verification {
        Verification {
            id: Uuid::new_v4(),
            equipment_id: equipment.id,
            equipment_serial: Some(equipment.serial_number.clone()),
            equipment_name: equipment.type_name.clone(),
            verification_type: VerificationType::PeriodicCheck,
            scheduled_date: date,
            assignee_id: Uuid::new_v4(),
            assignee_name: Some("Sophie Laurent".to_string()),
            priority: Priority::Normal,
            status,
            result: None,
            completed_at: None,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_nothing_to_report() {
        let equipment = vec![item("CSQ-1", EquipmentStatus::Available, Some(today() + Duration::days(90)), true)];
        assert!(derive_alerts(&equipment, &[], today(), 30).is_empty());
    }

    #[test]
    fn test_overdue_verification_is_high_priority() {
        let e = item("CSQ-1", EquipmentStatus::Available, None, false);
        let v = check(&e, today() - Duration::days(2), VerificationStatus::Planned);
        let alerts = derive_alerts(&[e.clone()], &[v], today(), 30);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::VerificationOverdue);
        assert_eq!(alerts[0].priority, AlertPriority::High);
        assert_eq!(alerts[0].priority_badge, AlertPriority::High.badge());
        assert_eq!(alerts[0].due_in_days, Some(-2));
        assert_eq!(alerts[0].equipment_id, Some(e.id));
    }

    #[test]
    fn test_completed_verification_raises_nothing() {
        let e = item("CSQ-1", EquipmentStatus::Available, None, false);
        let v = check(&e, today() - Duration::days(20), VerificationStatus::Completed);
        assert!(derive_alerts(&[e], &[v], today(), 30).is_empty());
    }

    #[test]
    fn test_overdue_inspection_not_reported_twice() {
        let e = item("ARI-7", EquipmentStatus::Available, Some(today() - Duration::days(5)), true);
        let v = check(&e, today() - Duration::days(1), VerificationStatus::Pending);
        let alerts = derive_alerts(&[e], &[v], today(), 30);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Vérification en retard");
        // the verification's date wins over the equipment's
        assert_eq!(alerts[0].due_in_days, Some(-1));
    }

    #[test]
    fn test_inspection_within_horizon() {
        let soon = item("TF-85", EquipmentStatus::Available, Some(today() + Duration::days(3)), true);
        let later = item("TF-86", EquipmentStatus::Available, Some(today() + Duration::days(45)), true);
        let alerts = derive_alerts(&[soon, later], &[], today(), 30);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::EquipmentExpiration);
        assert_eq!(alerts[0].due_in_days, Some(3));
    }

    #[test]
    fn test_retired_equipment() {
        let assigned = item("GNT-1", EquipmentStatus::Retired, Some(today() - Duration::days(10)), true);
        let stored = item("GNT-2", EquipmentStatus::Retired, Some(today() - Duration::days(10)), false);
        let alerts = derive_alerts(&[assigned, stored], &[], today(), 30);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::ReplacementRequired);
    }

    #[test]
    fn test_ordering_by_priority_then_date() {
        let maintenance = item("BT-1", EquipmentStatus::Maintenance, None, false);
        let expiring = item("BT-2", EquipmentStatus::Available, Some(today() + Duration::days(10)), false);
        let late = item("BT-3", EquipmentStatus::Available, Some(today() - Duration::days(1)), false);
        let today_check = check(&expiring, today(), VerificationStatus::Planned);

        let alerts = derive_alerts(&[maintenance, expiring, late], &[today_check], today(), 30);
        let priorities: Vec<AlertPriority> = alerts.iter().map(|a| a.priority).collect();
        assert_eq!(
            priorities,
            vec![AlertPriority::High, AlertPriority::Medium, AlertPriority::Medium, AlertPriority::Low]
        );
        // the two medium alerts: today's verification before the one due in ten days
        assert_eq!(alerts[1].alert_type, AlertType::VerificationToday);
        assert_eq!(alerts[2].alert_type, AlertType::EquipmentExpiration);
    }
}
