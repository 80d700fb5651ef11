//! Shared helpers for the endpoint test suites
#![allow(dead_code)]
//!
//! Builds the real router on top of the in-memory store with a stubbed
//! geolocation provider, mirroring how the service is wired in
//! production minus the network edges.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use shared::models::Location;
use skyapi_weather_backend::error::{AppError, AppResult};
use skyapi_weather_backend::external::{GeoIpResolver, GeoPlace};
use skyapi_weather_backend::store::{LocationDirectory, MemoryStore};
use skyapi_weather_backend::{create_app, AppState};

/// Geolocation stub returning a fixed outcome for every IP
pub struct StubGeo(pub Result<GeoPlace, String>);

#[async_trait]
impl GeoIpResolver for StubGeo {
    async fn lookup(&self, _ip: &str) -> AppResult<GeoPlace> {
        self.0.clone().map_err(AppError::Geolocation)
    }
}

pub fn geo_ok(city: &str, country: &str) -> Arc<StubGeo> {
    Arc::new(StubGeo(Ok(GeoPlace {
        city_name: city.to_string(),
        country_code: country.to_string(),
    })))
}

pub fn geo_fail(message: &str) -> Arc<StubGeo> {
    Arc::new(StubGeo(Err(message.to_string())))
}

pub fn nyc() -> Location {
    Location::new(
        "NYC_USA",
        "New York City",
        Some("New York".to_string()),
        "United States of America",
        "US",
    )
    .enabled(true)
}

pub async fn store_with_nyc() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert(&nyc()).await.unwrap();
    store
}

pub fn app(store: Arc<MemoryStore>, geo: Arc<StubGeo>) -> Router {
    create_app(AppState::new(store.clone(), store.clone(), store, geo))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_hour(uri: &str, hour: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-Current-Hour", hour)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run one request against a clone of the app, returning status plus
/// the parsed JSON body (Null for empty bodies).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
