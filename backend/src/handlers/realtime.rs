//! HTTP handlers for realtime weather endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use shared::models::{Location, RealtimeSnapshot};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::client_ip;
use crate::services::{GeolocationService, RealtimeService};
use crate::AppState;

/// Realtime weather for one location
#[derive(Debug, Serialize)]
pub struct RealtimeResponse {
    pub location: String,
    #[serde(flatten)]
    pub weather: RealtimeSnapshot,
}

impl RealtimeResponse {
    fn new(location: &Location, weather: RealtimeSnapshot) -> Self {
        Self {
            location: location.to_string(),
            weather,
        }
    }
}

/// Get realtime weather for the caller's IP-resolved location
pub async fn get_realtime_by_ip(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<RealtimeResponse>> {
    let ip = client_ip(&headers);

    let location = GeolocationService::new(state.geo.clone(), state.directory.clone())
        .resolve(&ip)
        .await?;

    let service = RealtimeService::new(state.directory, state.realtime);
    let snapshot = service.by_location(&location).await?;
    Ok(Json(RealtimeResponse::new(&location, snapshot)))
}

/// Get realtime weather for an explicit location code
pub async fn get_realtime_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<RealtimeResponse>> {
    let service = RealtimeService::new(state.directory, state.realtime);
    let (location, snapshot) = service.by_code(&code).await?;
    Ok(Json(RealtimeResponse::new(&location, snapshot)))
}

/// Replace the realtime weather for a location
pub async fn update_realtime(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(snapshot): Json<RealtimeSnapshot>,
) -> AppResult<Json<RealtimeResponse>> {
    snapshot
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = RealtimeService::new(state.directory, state.realtime);
    let (location, stored) = service.update(&code, snapshot).await?;
    Ok(Json(RealtimeResponse::new(&location, stored)))
}
