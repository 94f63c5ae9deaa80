//! CRUD handlers over the driver registry and location store.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::Json;
use hyper::StatusCode;

use fleettrack_shared::domain::{Driver, Location, LocationUpdate};

use crate::error::ApiError;
use crate::AppState;

pub async fn list_drivers(state: &'static AppState) -> Json<HashMap<String, Driver>> {
    Json(state.drivers.list())
}

pub async fn get_driver(
    state: &'static AppState,
    Path(id): Path<String>,
) -> Result<Json<Driver>, ApiError> {
    state
        .drivers
        .get(&id)
        .map(Json)
        .ok_or(ApiError::DriverNotFound(id))
}

pub async fn create_driver(
    state: &'static AppState,
    payload: Result<Json<Driver>, JsonRejection>,
) -> Result<(StatusCode, Json<Driver>), ApiError> {
    let Json(driver) = payload?;
    let stored = state.drivers.create(driver);
    tracing::info!(id = %stored.id, "driver registered");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_location(
    state: &'static AppState,
    Path(id): Path<String>,
    payload: Result<Json<LocationUpdate>, JsonRejection>,
) -> Result<Json<Driver>, ApiError> {
    // Unknown id wins over a malformed body, like the CRUD contract states.
    if state.drivers.get(&id).is_none() {
        return Err(ApiError::DriverNotFound(id));
    }
    let Json(update) = payload?;
    state
        .drivers
        .update_location(&id, update.latitude, update.longitude)
        .map(Json)
        .ok_or(ApiError::DriverNotFound(id))
}

/// Looks up the location store by the path literal. This key space is the
/// transport identity of live channels, not the driver-id space used by the
/// other `/drivers` endpoints.
pub async fn get_track(
    state: &'static AppState,
    Path(key): Path<String>,
) -> Result<Json<Location>, ApiError> {
    state
        .locations
        .get(&key)
        .map(Json)
        .ok_or(ApiError::TrackNotFound(key))
}
