//! API integration tests
//!
//! These run against a live server with an empty or disposable database.

use chrono::{Duration, Local};
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

async fn create_personnel(client: &Client, last_name: &str) -> Value {
    let response = client
        .post(format!("{}/personnel", BASE_URL))
        .json(&json!({
            "first_name": "Jean",
            "last_name": last_name,
            "email": format!("{}@sdis.example", Uuid::new_v4().simple()),
            "grade": "",
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn create_equipment(client: &Client, serial: &str) -> Value {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "type_name": "Casque F1",
            "serial_number": serial,
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn schedule_verification(client: &Client, equipment: &Value, personnel: &Value, days_from_today: i64) -> Value {
    let response = client
        .post(format!("{}/verifications", BASE_URL))
        .json(&json!({
            "equipment_id": equipment["id"],
            "assignee_id": personnel["id"],
            "scheduled_date": Local::now().date_naive() + Duration::days(days_from_today),
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_personnel_applies_defaults() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Defaults")).await;

    assert_eq!(personnel["grade"], "Sapeur");
    assert_eq!(personnel["status"], "active");
    assert!(personnel["station"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_twice() {
    let client = Client::new();
    let equipment = create_equipment(&client, &unique("SN-DEL")).await;
    let id = equipment["id"].as_str().expect("No id in response");

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_is_conflict() {
    let client = Client::new();
    let serial = unique("SN-DUP");
    create_equipment(&client, &serial).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "type_name": "Casque F1", "serial_number": serial }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_assign_then_list_by_personnel() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Assign")).await;
    let personnel_id = personnel["id"].as_str().expect("No id in response");
    let equipment = create_equipment(&client, &unique("SN-ASG")).await;
    let equipment_id = equipment["id"].as_str().expect("No id in response");

    let response = client
        .put(format!("{}/equipment/{}/assignment", BASE_URL, equipment_id))
        .json(&json!({ "personnel_id": personnel_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["assigned_to_id"], personnel_id);

    let response = client
        .get(format!("{}/personnel/{}/equipment", BASE_URL, personnel_id))
        .send()
        .await
        .expect("Failed to send request");
    let items: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], equipment_id);

    let response = client
        .get(format!("{}/equipment/{}/assignments", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to send request");
    let history: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(history.iter().any(|h| h["personnel_id"] == personnel_id));
}

#[tokio::test]
#[ignore]
async fn test_assign_to_unknown_personnel() {
    let client = Client::new();
    let equipment = create_equipment(&client, &unique("SN-UNK")).await;
    let equipment_id = equipment["id"].as_str().expect("No id in response");

    let response = client
        .put(format!("{}/equipment/{}/assignment", BASE_URL, equipment_id))
        .json(&json!({ "personnel_id": Uuid::new_v4() }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchPersonnel");
}

#[tokio::test]
#[ignore]
async fn test_schedule_with_unknown_serial() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Sched")).await;

    let before: Vec<Value> = client
        .get(format!("{}/verifications", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = client
        .post(format!("{}/verifications", BASE_URL))
        .json(&json!({
            "serial_number": unique("SN-MISSING"),
            "assignee_id": personnel["id"],
            "scheduled_date": Local::now().date_naive(),
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let after: Vec<Value> = client
        .get(format!("{}/verifications", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(before.len(), after.len());
}

#[tokio::test]
#[ignore]
async fn test_past_verification_is_overdue() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Overdue")).await;
    let serial = unique("SN-OVD");
    create_equipment(&client, &serial).await;
    let yesterday = Local::now().date_naive() - Duration::days(1);

    let response = client
        .post(format!("{}/verifications", BASE_URL))
        .json(&json!({
            "serial_number": serial,
            "assignee_id": personnel["id"],
            "scheduled_date": yesterday,
            "verification_type": "Vérification périodique",
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "planned");
    assert_eq!(body["verification_type"], "periodic_check");
    assert_eq!(body["display"]["key"], "overdue");
    assert_eq!(body["display"]["overdue"], true);
}

#[tokio::test]
#[ignore]
async fn test_complete_verification_stamps_equipment() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Complete")).await;
    let serial = unique("SN-CMP");
    let equipment = create_equipment(&client, &serial).await;
    let today = Local::now().date_naive();

    let verification: Value = client
        .post(format!("{}/verifications", BASE_URL))
        .json(&json!({
            "equipment_id": equipment["id"],
            "assignee_id": personnel["id"],
            "scheduled_date": today,
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let id = verification["id"].as_str().expect("No id in response");

    let response = client
        .post(format!("{}/verifications/{}/complete", BASE_URL, id))
        .json(&json!({ "result": "maintenance_required" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let equipment: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment["id"].as_str().unwrap_or_default()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(equipment["last_check_date"], json!(today));
    assert_eq!(equipment["status"], "maintenance");

    let response = client
        .post(format!("{}/verifications/{}/cancel", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_personnel_search_is_case_insensitive() {
    let client = Client::new();
    let last_name = unique("Lefèvre");
    create_personnel(&client, &last_name).await;

    let term = last_name.to_uppercase();
    let response = client
        .get(format!("{}/personnel", BASE_URL))
        .query(&[("search", term)])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(body.iter().any(|p| p["last_name"] == last_name.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_calendar_rejects_inverted_range() {
    let client = Client::new();

    let response = client
        .get(format!("{}/verifications/calendar", BASE_URL))
        .query(&[("start", "2025-03-10"), ("end", "2025-03-01")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_dashboard() {
    let client = Client::new();

    let response = client
        .get(format!("{}/dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["alerts"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_unknown_route_is_json_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/nowhere", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
#[ignore]
async fn test_cancel_twice_is_a_noop() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Cancel")).await;
    let equipment = create_equipment(&client, &unique("SN-CNL")).await;
    let verification = schedule_verification(&client, &equipment, &personnel, 3).await;
    let id = verification["id"].as_str().expect("No id in response");

    for _ in 0..2 {
        let response = client
            .post(format!("{}/verifications/{}/cancel", BASE_URL, id))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "cancelled");
    }
}

#[tokio::test]
#[ignore]
async fn test_complete_cancelled_verification_is_rejected() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("NoComplete")).await;
    let equipment = create_equipment(&client, &unique("SN-NOC")).await;
    let verification = schedule_verification(&client, &equipment, &personnel, 0).await;
    let id = verification["id"].as_str().expect("No id in response");

    client
        .post(format!("{}/verifications/{}/cancel", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .post(format!("{}/verifications/{}/complete", BASE_URL, id))
        .json(&json!({ "result": "non_compliant" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // the equipment was not stamped
    let equipment: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment["id"].as_str().unwrap_or_default()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(equipment["last_check_date"].is_null());
    assert_eq!(equipment["status"], "available");

    let response = client
        .post(format!("{}/verifications/{}/complete", BASE_URL, Uuid::new_v4()))
        .json(&json!({ "result": "compliant" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_cannot_bypass_lifecycle() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Edit")).await;
    let equipment = create_equipment(&client, &unique("SN-EDT")).await;
    let verification = schedule_verification(&client, &equipment, &personnel, 5).await;
    let id = verification["id"].as_str().expect("No id in response");

    let response = client
        .put(format!("{}/verifications/{}", BASE_URL, id))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .put(format!("{}/verifications/{}", BASE_URL, id))
        .json(&json!({ "status": "in_progress", "notes": "Contrôle visuel" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "in_progress");

    client
        .post(format!("{}/verifications/{}/cancel", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .put(format!("{}/verifications/{}", BASE_URL, id))
        .json(&json!({ "notes": "Reprogrammer" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_blank_serial_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({ "type_name": "Casque F1", "serial_number": "   " }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_equipment_type_and_inspection_filters() {
    let client = Client::new();
    let type_name = unique("Bottes");
    let serial = unique("SN-FLT");
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "type_name": type_name,
            "serial_number": serial,
            "next_check_date": Local::now().date_naive() + Duration::days(3),
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .query(&[("type_name", type_name.to_lowercase()), ("inspection", "week".to_string())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["serial_number"], serial.as_str());

    let body: Vec<Value> = client
        .get(format!("{}/equipment", BASE_URL))
        .query(&[("type_name", type_name.as_str()), ("inspection", "expired")])
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(body.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_request_lifecycle() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Request")).await;
    let equipment = create_equipment(&client, &unique("SN-REQ")).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "requester_id": personnel["id"],
            "equipment_id": equipment["id"],
            "request_type": "repair",
            "description": "Visière fissurée",
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let request: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(request["status"], "open");
    let id = request["id"].as_str().expect("No id in response");

    let response = client
        .post(format!("{}/requests/{}/resolve", BASE_URL, id))
        .json(&json!({ "status": "open" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/requests/{}/resolve", BASE_URL, id))
        .json(&json!({ "status": "resolved" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "resolved");
    assert!(body["resolved_at"].is_string());

    let response = client
        .delete(format!("{}/requests/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/requests/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_alert_lifecycle_merges_with_derived_alerts() {
    let client = Client::new();
    let personnel = create_personnel(&client, &unique("Alert")).await;
    let equipment = create_equipment(&client, &unique("SN-ALR")).await;
    schedule_verification(&client, &equipment, &personnel, -2).await;
    let title = unique("Note de service");

    let response = client
        .post(format!("{}/alerts", BASE_URL))
        .json(&json!({
            "title": title,
            "alert_type": "regulatory_update",
            "priority": "critical",
            "equipment_id": equipment["id"],
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let alert: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(alert["source"], "manual");
    assert_eq!(alert["priority_badge"]["label"], "Critique");
    let id = alert["id"].as_str().expect("No id in response");

    let alerts: Vec<Value> = client
        .get(format!("{}/alerts", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(alerts.iter().any(|a| a["id"] == id));
    assert!(alerts.iter().any(|a| a["source"] == "derived"
        && a["alert_type"] == "verification_overdue"
        && a["equipment_id"] == equipment["id"]));

    let response = client
        .post(format!("{}/alerts/{}/dismiss", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let alerts: Vec<Value> = client
        .get(format!("{}/alerts", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(!alerts.iter().any(|a| a["id"] == id));

    let response = client
        .delete(format!("{}/alerts/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_alert_for_unknown_equipment() {
    let client = Client::new();

    let response = client
        .post(format!("{}/alerts", BASE_URL))
        .json(&json!({
            "title": "Casque introuvable",
            "alert_type": "equipment_expiration",
            "equipment_id": Uuid::new_v4(),
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchEquipment");
}
