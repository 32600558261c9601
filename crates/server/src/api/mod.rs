mod reports;
mod stations;

pub use reports::*;
pub use stations::*;

use crate::{dto::ErrorDto, state::AppState};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/markers", get(list_markers).post(create_marker))
        .route("/api/stations/near", get(near))
        .route("/api/stations/search", get(search))
        .route("/api/stations/directions", get(directions))
        .route("/api/categories", get(categories))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Error answered as `{ "error": ... }` with the given status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorDto {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
