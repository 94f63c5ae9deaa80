//! Real-time fleet location hub.
//!
//! Three independent, individually locked maps make up the server state:
//! driver records (CRUD surface), last-known locations per live channel, and
//! the set of active observer connections. The live channel key space is the
//! transport identity of the peer, not a driver id; no relationship between
//! the maps is enforced.

pub mod api;
pub mod credentials;
pub mod error;
pub mod hub;
pub mod live;
pub mod locations;
pub mod registry;

use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Path, WebSocketUpgrade},
    routing::{get, put},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use fleettrack_shared::domain::{Driver, LocationUpdate};

use crate::hub::ConnectionHub;
use crate::locations::LocationStore;
use crate::registry::DriverRegistry;

pub struct AppState {
    pub drivers: DriverRegistry,
    pub locations: LocationStore,
    pub hub: ConnectionHub,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            drivers: DriverRegistry::new(),
            locations: LocationStore::new(),
            hub: ConnectionHub::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the full router over leaked state.
pub fn router(state: &'static AppState) -> Router {
    Router::new()
        .route(
            "/ws",
            get(
                move |req: WebSocketUpgrade, ConnectInfo(peer): ConnectInfo<SocketAddr>| async move {
                    req.on_upgrade(move |socket| live::accept_and_log(socket, peer, state))
                },
            ),
        )
        .route(
            "/drivers",
            get(move || api::list_drivers(state)).post(
                move |payload: Result<Json<Driver>, JsonRejection>| {
                    api::create_driver(state, payload)
                },
            ),
        )
        .route(
            "/drivers/:id",
            get(move |id: Path<String>| api::get_driver(state, id)),
        )
        .route(
            "/drivers/:id/location",
            put(
                move |id: Path<String>, payload: Result<Json<LocationUpdate>, JsonRejection>| {
                    api::update_location(state, id, payload)
                },
            ),
        )
        .route(
            "/drivers/:id/track",
            get(move |key: Path<String>| api::get_track(state, key)),
        )
        .layer(CorsLayer::very_permissive())
}

pub fn leak<T>(val: T) -> &'static T {
    &*Box::leak(Box::new(val))
}
