//! Handler errors rendered as `{"error": message}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    SideNotFound(String),
    PersonnelNotFound(String),
    NoAudio(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::SideNotFound(filename) => {
                (StatusCode::NOT_FOUND, format!("Side not found: {}", filename))
            }
            ApiError::PersonnelNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("No appearances for: {}", name))
            }
            ApiError::NoAudio(filename) => (
                StatusCode::CONFLICT,
                format!("Side has no digitized audio: {}", filename),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
