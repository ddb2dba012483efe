use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tutorsync_api::{ApiState, app};
use tutorsync_core::clock::FixedClock;
use tutorsync_core::store::SlotStore;
use tutorsync_core::store::memory::InMemorySlotStore;
use tutorsync_db::mock::MockSlotStore;
use tutorsync_lock::InMemoryLockCoordinator;
use uuid::Uuid;

// All tests pin the clock to 2030-06-10 09:00 UTC and operate on the
// following day, so scans start at midnight and nothing is "in the past".
fn test_server() -> TestServer {
    let state = Arc::new(ApiState::new(
        Arc::new(InMemorySlotStore::new()),
        Arc::new(InMemoryLockCoordinator::new()),
        Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2030, 6, 10, 9, 0, 0).unwrap(),
        )),
    ));
    TestServer::new(app(state)).expect("test server should build")
}

fn server_with_store(store: Arc<dyn SlotStore>) -> TestServer {
    let state = Arc::new(ApiState::new(
        store,
        Arc::new(InMemoryLockCoordinator::new()),
        Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2030, 6, 10, 9, 0, 0).unwrap(),
        )),
    ));
    TestServer::new(app(state)).expect("test server should build")
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");

    let response = server.get("/version").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_register_and_list_tutor_slots() {
    let server = test_server();
    let tutor = Uuid::new_v4();

    let response = server
        .post("/api/tutor/availabilities")
        .json(&json!({
            "tutor_id": tutor,
            "start_time": "2030-06-11T14:00:00Z",
            "duration": "SIXTY",
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["created"].as_array().map(Vec::len), Some(2));

    let response = server
        .get("/api/tutor/availabilities")
        .add_query_param("tutor_id", tutor)
        .await;
    response.assert_status_ok();

    let slots = response.json::<Value>();
    let slots = slots.as_array().expect("array response");
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["start_time"], "2030-06-11T14:00:00Z");
    assert_eq!(slots[0]["booked"], false);
}

#[tokio::test]
async fn test_register_rejects_misaligned_start() {
    let server = test_server();

    let response = server
        .post("/api/tutor/availabilities")
        .json(&json!({
            "tutor_id": Uuid::new_v4(),
            "start_time": "2030-06-11T14:15:00Z",
            "duration": "THIRTY",
        }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["code"], "AVAILABILITY_001");
}

#[tokio::test]
async fn test_delete_slot_requires_ownership() {
    let server = test_server();
    let owner = Uuid::new_v4();

    let response = server
        .post("/api/tutor/availabilities")
        .json(&json!({
            "tutor_id": owner,
            "start_time": "2030-06-11T14:00:00Z",
            "duration": "THIRTY",
        }))
        .await;
    response.assert_status_ok();
    let slot_id = response.json::<Value>()["created"][0]["id"]
        .as_str()
        .expect("slot id")
        .to_string();

    let response = server
        .delete(&format!("/api/tutor/availabilities/{slot_id}"))
        .add_query_param("tutor_id", Uuid::new_v4())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "AVAILABILITY_005");

    // The owner can delete.
    let response = server
        .delete(&format!("/api/tutor/availabilities/{slot_id}"))
        .add_query_param("tutor_id", owner)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_student_availability_listings() {
    let server = test_server();
    let tutor = Uuid::new_v4();

    server
        .post("/api/tutor/availabilities")
        .json(&json!({
            "tutor_id": tutor,
            "start_time": "2030-06-11T14:00:00Z",
            "duration": "SIXTY",
        }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/student/availability/slots")
        .add_query_param("date", "2030-06-11")
        .add_query_param("duration", "THIRTY")
        .await;
    response.assert_status_ok();
    let entries = response.json::<Value>();
    let times: Vec<&str> = entries
        .as_array()
        .expect("array response")
        .iter()
        .map(|e| e["time"].as_str().expect("time label"))
        .collect();
    assert_eq!(times, vec!["14:00", "14:30"]);

    let response = server
        .get("/api/student/availability/tutors")
        .add_query_param("date", "2030-06-11")
        .await;
    response.assert_status_ok();
    let tutors = response.json::<Value>();
    assert_eq!(tutors[0]["tutor_id"], tutor.to_string());
    assert_eq!(tutors[0]["available_times"], json!(["14:00", "14:30"]));
}

#[tokio::test]
async fn test_availability_rejects_past_date() {
    let server = test_server();

    let response = server
        .get("/api/student/availability/slots")
        .add_query_param("date", "2030-06-09")
        .add_query_param("duration", "THIRTY")
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["code"], "DATE_001");
}

#[tokio::test]
async fn test_book_lesson_and_reject_double_booking() {
    let server = test_server();
    let tutor = Uuid::new_v4();
    let student = Uuid::new_v4();

    server
        .post("/api/tutor/availabilities")
        .json(&json!({
            "tutor_id": tutor,
            "start_time": "2030-06-11T14:00:00Z",
            "duration": "THIRTY",
        }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/student/lessons")
        .json(&json!({
            "tutor_id": tutor,
            "student_id": student,
            "start_time": "2030-06-11T14:00:00Z",
            "duration": "THIRTY",
        }))
        .await;
    response.assert_status_ok();
    let lesson = response.json::<Value>();
    assert_eq!(lesson["tutor_id"], tutor.to_string());
    assert_eq!(lesson["status"], "CONFIRMED");
    assert_eq!(lesson["end_time"], "2030-06-11T14:30:00Z");

    // The slot is consumed; the same request now finds nothing.
    let response = server
        .post("/api/student/lessons")
        .json(&json!({
            "tutor_id": tutor,
            "student_id": Uuid::new_v4(),
            "start_time": "2030-06-11T14:00:00Z",
            "duration": "THIRTY",
        }))
        .await;
    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["code"], "TUTOR_001");

    let response = server
        .get("/api/student/lessons")
        .add_query_param("student_id", student)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_storage_failure_maps_to_internal_error() {
    let mut store = MockSlotStore::new();
    store
        .expect_slots_by_tutor()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let server = server_with_store(Arc::new(store));
    let response = server
        .get("/api/tutor/availabilities")
        .add_query_param("tutor_id", Uuid::new_v4())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "SYS_001");
}
