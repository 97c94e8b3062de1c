//! Collection grid and side-detail endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use cta_common::catalog::{find_side, visible_sides, CassetteSide, CatalogOrigin, SideSummary};
use cta_common::human_time::{format_seconds, total_seconds};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

/// Where the served sides came from
///
/// The fallback state is visible here and in the logs, never as an error.
#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    #[serde(flatten)]
    pub origin: CatalogOrigin,
    pub side_count: usize,
}

/// GET /api/catalog
pub async fn get_catalog_info(State(state): State<AppState>) -> Json<CatalogInfo> {
    Json(CatalogInfo {
        origin: state.catalog.origin().clone(),
        side_count: state.catalog.sides().len(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SidesQuery {
    /// Hide sides without digitized audio
    #[serde(default)]
    pub with_audio: bool,
}

/// GET /api/sides?with_audio=bool
pub async fn list_sides(
    State(state): State<AppState>,
    Query(query): Query<SidesQuery>,
) -> Json<Vec<SideSummary>> {
    let summaries = visible_sides(state.catalog.sides(), query.with_audio)
        .into_iter()
        .map(SideSummary::from)
        .collect();
    Json(summaries)
}

#[derive(Debug, Serialize)]
pub struct SideDetail {
    pub side: CassetteSide,
    /// Absent when the side has no digitized audio
    pub audio_url: Option<String>,
    pub total_duration: String,
}

/// GET /api/sides/:filename
pub async fn get_side(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<SideDetail>, ApiError> {
    let side = find_side(state.catalog.sides(), &filename)
        .ok_or_else(|| ApiError::SideNotFound(filename.clone()))?;

    Ok(Json(SideDetail {
        audio_url: side.has_audio.then(|| state.audio.url_for(&side.filename)),
        total_duration: format_seconds(total_seconds(side)),
        side: side.clone(),
    }))
}
