//! Playback mirror endpoints
//!
//! The client's audio element reports its events here; the mirror never
//! advances on its own.

use axum::{extract::State, Json};
use cta_common::catalog::find_side;
use cta_common::player::{PlayerCommand, PlayerView, TransportEvent, TransportTarget};
use serde::Deserialize;
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// GET /api/player
pub async fn get_player(State(state): State<AppState>) -> Json<PlayerView> {
    Json(state.player.read().await.view())
}

#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    pub filename: String,
}

/// POST /api/player/load
pub async fn load_side(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<PlayerView>, ApiError> {
    let side = find_side(state.catalog.sides(), &request.filename)
        .ok_or_else(|| ApiError::SideNotFound(request.filename.clone()))?;
    if !side.has_audio {
        return Err(ApiError::NoAudio(side.filename.clone()));
    }

    let mut player = state.player.write().await;
    player.load(&side.filename, state.audio.url_for(&side.filename));
    debug!("Player loaded {}", side.filename);
    Ok(Json(player.view()))
}

/// POST /api/player/events
pub async fn apply_event(
    State(state): State<AppState>,
    Json(event): Json<TransportEvent>,
) -> Json<PlayerView> {
    let mut player = state.player.write().await;
    player.apply(&event);
    Json(player.view())
}

/// POST /api/player/command
///
/// Returns the target for the transport. The mirror is left as is until
/// the transport reports the change through `/api/player/events`.
pub async fn player_command(
    State(state): State<AppState>,
    Json(command): Json<PlayerCommand>,
) -> Json<TransportTarget> {
    let target = state.player.read().await.target(&command);
    debug!("Player command {:?} -> {:?}", command, target);
    Json(target)
}
