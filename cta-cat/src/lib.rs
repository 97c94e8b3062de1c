//! cta-cat library - cassette catalog browse service
//!
//! Serves the projected cassette catalog, the personnel discography fold
//! and the playback mirror as JSON.

use axum::Router;
use cta_common::audio::AudioSettings;
use cta_common::player::PlayerMirror;
use cta_common::Catalog;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog loaded once at startup, never reloaded
    pub catalog: Arc<Catalog>,
    pub audio: AudioSettings,
    pub player: Arc<RwLock<PlayerMirror>>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, audio: AudioSettings) -> Self {
        Self {
            catalog,
            audio,
            player: Arc::new(RwLock::new(PlayerMirror::new())),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let catalog_routes = Router::new()
        .route("/api/catalog", get(api::get_catalog_info))
        .route("/api/sides", get(api::list_sides))
        .route("/api/sides/:filename", get(api::get_side))
        .route("/api/personnel", get(api::list_personnel))
        .route("/api/personnel/:name", get(api::get_personnel))
        .route("/api/player", get(api::get_player))
        .route("/api/player/load", post(api::load_side))
        .route("/api/player/events", post(api::apply_event))
        .route("/api/player/command", post(api::player_command));

    Router::new()
        .merge(catalog_routes)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
