//! Personnel endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use cta_common::catalog::{discography, personnel_names, Discography};

use super::ApiError;
use crate::AppState;

/// GET /api/personnel
pub async fn list_personnel(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(personnel_names(state.catalog.sides()))
}

/// GET /api/personnel/:name
///
/// Every track of every session the name is listed in, grouped by album.
pub async fn get_personnel(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Discography>, ApiError> {
    discography(state.catalog.sides(), &name)
        .map(Json)
        .ok_or(ApiError::PersonnelNotFound(name))
}
