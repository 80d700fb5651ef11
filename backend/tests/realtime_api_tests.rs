//! End-to-end tests for the realtime weather endpoints

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use common::{app, geo_fail, geo_ok, get, json_request, send, store_with_nyc};

fn snapshot() -> serde_json::Value {
    json!({
        "temperature": 12,
        "humidity": 68,
        "precipitation": 30,
        "wind_speed": 14,
        "status": "Overcast"
    })
}

#[tokio::test]
async fn get_by_ip_surfaces_geolocation_failure() {
    let app = app(store_with_nyc().await, geo_fail("private range"));

    let (status, body) = send(&app, get("/v1/realtime")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "GEOLOCATION_ERROR");
}

#[tokio::test]
async fn get_by_code_unknown_location_is_not_found() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, _) = send(&app, get("/v1/realtime/LAX_USA")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_by_code_without_snapshot_is_not_found() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, body) = send(&app, get("/v1/realtime/NYC_USA")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn put_then_get_round_trip() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, body) = send(
        &app,
        json_request("PUT", "/v1/realtime/NYC_USA", snapshot()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperature"], 12);

    let (status, body) = send(&app, get("/v1/realtime/NYC_USA")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "New York City, New York, United States of America");
    assert_eq!(body["status"], "Overcast");
    assert_eq!(body["wind_speed"], 14);
}

#[tokio::test]
async fn put_stamps_server_side_update_time() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let mut body = snapshot();
    body["last_updated"] = json!("2001-01-01T00:00:00Z");

    let before = Utc::now();
    let (status, response) = send(&app, json_request("PUT", "/v1/realtime/NYC_USA", body)).await;

    assert_eq!(status, StatusCode::OK);
    let stamped: DateTime<Utc> = response["last_updated"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(stamped >= before - Duration::seconds(1));
}

#[tokio::test]
async fn put_unknown_location_is_not_found() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, _) = send(
        &app,
        json_request("PUT", "/v1/realtime/LAX_USA", snapshot()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_rejects_out_of_range_fields() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let mut windy = snapshot();
    windy["wind_speed"] = json!(999);
    let (status, body) = send(&app, json_request("PUT", "/v1/realtime/NYC_USA", windy)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_by_ip_resolves_location_then_reads_snapshot() {
    let store = store_with_nyc().await;
    let app = app(store, geo_ok("New York City", "US"));

    send(
        &app,
        json_request("PUT", "/v1/realtime/NYC_USA", snapshot()),
    )
    .await;

    let (status, body) = send(&app, get("/v1/realtime")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperature"], 12);
}
