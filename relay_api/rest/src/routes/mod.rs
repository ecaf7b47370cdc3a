use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub mod contact;
pub mod health;

/// Generic body for any failure the caller cannot fix by changing the request.
const SEND_FAILED: &str = "Failed to send message. Please try again.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED)
}

fn error(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiResponse::error(message))).into_response()
}
