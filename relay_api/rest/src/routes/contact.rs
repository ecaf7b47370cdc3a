use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use relay_core_contact_contracts::{ContactSendMessageError, ContactService};
use relay_models::contact::{ContactSubmission, ContactValidationError};
use tracing::{debug, error};

use super::{error, SEND_FAILED};
use crate::models::{contact::ApiContactSubmission, ApiResponse};

/// Upper bound for a contact request body.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

const MESSAGE_SENT: &str = "Message sent successfully!";
const MISSING_FIELDS: &str = "Name, email, and message are required.";
const INVALID_EMAIL: &str = "Invalid email address.";
const PAYLOAD_TOO_LARGE: &str = "Message is too large.";
const METHOD_NOT_ALLOWED: &str = "Method not allowed. Please use POST.";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            "/contact",
            routing::post(send_message).fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return error(StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE)
        }
        Err(err) => {
            debug!("Failed to read contact request body: {err}");
            Bytes::new()
        }
    };

    let submission = match ContactSubmission::try_from(ApiContactSubmission::from_body(&body)) {
        Ok(submission) => submission,
        Err(ContactValidationError::MissingFields) => {
            return error(StatusCode::BAD_REQUEST, MISSING_FIELDS)
        }
        Err(ContactValidationError::InvalidEmail) => {
            return error(StatusCode::BAD_REQUEST, INVALID_EMAIL)
        }
    };

    match service.send_message(submission).await {
        Ok(()) => Json(ApiResponse::ok(MESSAGE_SENT)).into_response(),
        Err(ContactSendMessageError::Send(report)) => {
            error!(%report, "Failed to send contact message");
            error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED)
        }
    }
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}
