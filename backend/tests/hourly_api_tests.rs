//! End-to-end tests for the hourly forecast endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, geo_fail, geo_ok, get, get_with_hour, json_request, send, store_with_nyc};

fn entry(hour: u8, temperature: i16) -> serde_json::Value {
    json!({
        "hour_of_day": hour,
        "temperature": temperature,
        "precipitation": 40,
        "status": "Cloudy"
    })
}

#[tokio::test]
async fn get_by_ip_requires_current_hour_header() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, body) = send(&app, get("/v1/hourly")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_by_ip_rejects_garbage_current_hour() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    for bad in ["24", "-1", "noon"] {
        let (status, _) = send(&app, get_with_hour("/v1/hourly", bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "hour {bad} accepted");
    }
}

#[tokio::test]
async fn get_by_ip_surfaces_geolocation_failure() {
    let app = app(store_with_nyc().await, geo_fail("reserved range"));

    let (status, body) = send(&app, get_with_hour("/v1/hourly", "9")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "GEOLOCATION_ERROR");
}

#[tokio::test]
async fn get_by_ip_unknown_place_is_not_found() {
    let app = app(store_with_nyc().await, geo_ok("Tokyo", "JP"));

    let (status, _) = send(&app, get_with_hour("/v1/hourly", "9")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_by_ip_with_no_data_is_no_content() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, body) = send(&app, get_with_hour("/v1/hourly", "9")).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}

#[tokio::test]
async fn get_by_code_unknown_location_is_not_found() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, body) = send(&app, get_with_hour("/v1/hourly/LAX_USA", "9")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_by_code_filters_hours_before_current() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let put = json_request(
        "PUT",
        "/v1/hourly/NYC_USA",
        json!([entry(8, 12), entry(10, 14), entry(15, 17)]),
    );
    let (status, _) = send(&app, put).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get_with_hour("/v1/hourly/NYC_USA", "10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "New York City, New York, United States of America");
    let hours: Vec<u64> = body["hourly_forecast"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["hour_of_day"].as_u64().unwrap())
        .collect();
    assert_eq!(hours, vec![10, 15]);
}

#[tokio::test]
async fn put_empty_list_is_rejected() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, body) = send(&app, json_request("PUT", "/v1/hourly/NYC_USA", json!([]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "EMPTY_FORECAST_DATA");
}

#[tokio::test]
async fn put_unknown_location_is_not_found() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let (status, _) = send(
        &app,
        json_request("PUT", "/v1/hourly/LAX_USA", json!([entry(9, 12)])),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_rejects_out_of_range_fields() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let too_hot = json!([{
        "hour_of_day": 9,
        "temperature": 90,
        "precipitation": 40,
        "status": "Sunny"
    }]);
    let (status, _) = send(&app, json_request("PUT", "/v1/hourly/NYC_USA", too_hot)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let short_status = json!([{
        "hour_of_day": 9,
        "temperature": 20,
        "precipitation": 40,
        "status": "ok"
    }]);
    let (status, _) = send(&app, json_request("PUT", "/v1/hourly/NYC_USA", short_status)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_replaces_entire_set_by_key() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let first = json_request(
        "PUT",
        "/v1/hourly/NYC_USA",
        json!([entry(8, 10), entry(9, 11), entry(10, 12)]),
    );
    let (status, _) = send(&app, first).await;
    assert_eq!(status, StatusCode::OK);

    // Hour 8 omitted (delete), hour 9 changed (update), hour 11 new (insert)
    let second = json_request(
        "PUT",
        "/v1/hourly/NYC_USA",
        json!([entry(9, 20), entry(10, 12), entry(11, 13)]),
    );
    let (status, body) = send(&app, second).await;

    assert_eq!(status, StatusCode::OK);
    let merged: Vec<(u64, i64)> = body["hourly_forecast"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["hour_of_day"].as_u64().unwrap(),
                e["temperature"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(merged, vec![(9, 20), (10, 12), (11, 13)]);

    // The stored set matches what the reconcile reported
    let (status, body) = send(&app, get_with_hour("/v1/hourly/NYC_USA", "0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hourly_forecast"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn put_duplicate_hours_keep_the_last_occurrence() {
    let app = app(store_with_nyc().await, geo_ok("New York City", "US"));

    let put = json_request(
        "PUT",
        "/v1/hourly/NYC_USA",
        json!([entry(9, 11), entry(9, 25)]),
    );
    let (status, body) = send(&app, put).await;

    assert_eq!(status, StatusCode::OK);
    let merged = body["hourly_forecast"].as_array().unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0]["temperature"], 25);
}
