//! HTTP handlers for location administration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::Location;

use crate::error::AppResult;
use crate::services::LocationService;
use crate::AppState;

/// Create a new location
pub async fn add_location(
    State(state): State<AppState>,
    Json(location): Json<Location>,
) -> AppResult<Response> {
    let service = LocationService::new(state.directory);
    let created = service.add(location).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// List all non-trashed locations
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Response> {
    let service = LocationService::new(state.directory);
    let locations = service.list().await?;

    if locations.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(locations).into_response())
}

/// Get a location by code
pub async fn get_location(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.directory);
    Ok(Json(service.get(&code).await?))
}

/// Update a location's editable fields
pub async fn update_location(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(location): Json<Location>,
) -> AppResult<Json<Location>> {
    let service = LocationService::new(state.directory);
    Ok(Json(service.update(&code, location).await?))
}

/// Soft-delete a location
pub async fn delete_location(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<StatusCode> {
    let service = LocationService::new(state.directory);
    service.trash(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
