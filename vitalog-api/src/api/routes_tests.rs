use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use vitalog_data::repository::{InMemoryStore, SupabaseStore};
use vitalog_domain::services::{create_vitals_service, SharedRecordStore};

use crate::api::routes::create_app_with_state;
use crate::api::AppState;

fn app_over(store: InMemoryStore) -> Router {
    let shared: SharedRecordStore = Arc::new(store);
    create_app_with_state(AppState {
        service: Arc::new(create_vitals_service(shared)),
        store_configured: true,
    })
}

fn app_without_store() -> Router {
    let shared: SharedRecordStore = Arc::new(SupabaseStore::disabled());
    create_app_with_state(AppState {
        service: Arc::new(create_vitals_service(shared)),
        store_configured: false,
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn bp_payload(hn: &str, systolic: u16, diastolic: u16, time_period: &str) -> Value {
    json!({
        "hn": hn,
        "record_type": "blood_pressure",
        "time_period": time_period,
        "systolic": systolic,
        "diastolic": diastolic,
    })
}

#[tokio::test]
async fn submit_stores_a_valid_reading() {
    let store = InMemoryStore::new();
    let app = app_over(store.clone());

    let response = app
        .oneshot(post_json("/api/v1/readings", bp_payload("HN001", 120, 80, "morning")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "บันทึกข้อมูลเรียบร้อยแล้ว");
    assert_eq!(body["reading"]["value"], "120/80 mmHg");
    assert_eq!(body["reading"]["time_period_label"], "เช้า");

    assert!(store.has_patient("HN001"));
    assert_eq!(store.reading_count(), 1);
}

#[tokio::test]
async fn submit_rejects_out_of_range_pressure() {
    let app = app_over(InMemoryStore::new());

    let response = app
        .oneshot(post_json("/api/v1/readings", bp_payload("HN001", 49, 80, "morning")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "blood_pressure_out_of_range");
    assert_eq!(body["message"], "ค่าความดันโลหิตไม่อยู่ในช่วงที่เหมาะสม");
}

#[tokio::test]
async fn submit_rejects_missing_hn_first() {
    let app = app_over(InMemoryStore::new());

    let response = app
        .oneshot(post_json("/api/v1/readings", json!({ "record_type": "dtx" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_hn");
}

#[tokio::test]
async fn submit_without_store_configuration_is_unavailable() {
    let app = app_without_store();

    let response = app
        .oneshot(post_json("/api/v1/readings", bp_payload("HN001", 120, 80, "morning")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["error"], "store_not_configured");
}

#[tokio::test]
async fn search_returns_matching_readings() {
    let store = InMemoryStore::new();
    let app = app_over(store);

    for payload in [
        bp_payload("HN001", 120, 80, "morning"),
        bp_payload("HN001", 130, 85, "evening"),
        bp_payload("HN002", 110, 70, "morning"),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/readings", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get("/api/v1/readings?hn=HN001"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["hn"], "HN001");
    assert_eq!(body["count"], 2);
    assert_eq!(body["readings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_without_hn_is_rejected() {
    let app = app_over(InMemoryStore::new());

    let response = app.oneshot(get("/api/v1/readings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_search_hn");
    assert_eq!(body["message"], "กรุณากรอกหมายเลข HN ที่ต้องการค้นหา");
}

#[tokio::test]
async fn search_rejects_unknown_record_type_filter() {
    let app = app_over(InMemoryStore::new());

    let response = app
        .oneshot(get("/api/v1/readings?hn=HN001&record_type=weight"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "unknown_record_type");
}

#[tokio::test]
async fn statistics_aggregates_recent_readings() {
    let store = InMemoryStore::new();
    let app = app_over(store);

    for payload in [
        bp_payload("HN001", 120, 80, "morning"),
        bp_payload("HN001", 140, 90, "morning"),
        json!({
            "hn": "HN001",
            "record_type": "dtx",
            "time_period": "evening",
            "dtx_value": 100.0,
        }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/readings", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get("/api/v1/statistics?hn=HN001&months=3"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["hn"], "HN001");
    assert_eq!(body["period_months"], 3);
    assert_eq!(body["reading_count"], 3);

    let bp = &body["summary"]["blood_pressure"];
    assert_eq!(bp["count"], 2);
    assert_eq!(bp["avg_systolic"], 130.0);
    assert_eq!(bp["avg_diastolic"], 85.0);
    assert_eq!(bp["max_systolic"], 140);
    assert_eq!(bp["min_systolic"], 120);

    let dtx = &body["summary"]["dtx"];
    assert_eq!(dtx["count"], 1);
    assert_eq!(dtx["avg"], 100.0);

    assert_eq!(body["summary"]["time_periods"]["morning"], 2);
    assert_eq!(body["summary"]["time_periods"]["evening"], 1);
    assert!(body["summary"]["time_periods"].get("afternoon").is_none());
}

#[tokio::test]
async fn statistics_over_empty_window_is_ok() {
    let app = app_over(InMemoryStore::new());

    let response = app
        .oneshot(get("/api/v1/statistics?hn=HN404"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["reading_count"], 0);
    assert!(body["summary"].get("blood_pressure").is_none());
    assert!(body["summary"].get("dtx").is_none());
}

#[tokio::test]
async fn statistics_without_hn_is_rejected() {
    let app = app_over(InMemoryStore::new());

    let response = app.oneshot(get("/api/v1/statistics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_stats_hn");
}

#[tokio::test]
async fn health_reflects_store_configuration() {
    let app = app_over(InMemoryStore::new());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store_configured"], true);

    let app = app_without_store();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store_configured"], false);
}
