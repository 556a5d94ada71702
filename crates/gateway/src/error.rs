//! Mapping from domain errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use fitify_core::error::{Error, WardrobeError};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Anything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    Domain(Error),
    BadRequest(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Domain(e)
    }
}

impl From<WardrobeError> for ApiError {
    fn from(e: WardrobeError) -> Self {
        ApiError::Domain(e.into())
    }
}

pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Wardrobe(w) => match w {
            WardrobeError::UnknownCategory { .. }
            | WardrobeError::InvalidSlot(_)
            | WardrobeError::InvalidFormality(_)
            | WardrobeError::InvalidLogEntry(_) => StatusCode::BAD_REQUEST,
            WardrobeError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            WardrobeError::NoActiveOutfit | WardrobeError::NoAlternativeFound { .. } => {
                StatusCode::CONFLICT
            }
        },
        Error::Oracle(_) | Error::Calendar(_) => StatusCode::BAD_GATEWAY,
        Error::Weather(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Storage(_) | Error::Config { .. } | Error::Serialization(_) | Error::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Domain(e) => {
                let status = status_for(&e);
                if status.is_server_error() {
                    error!(error = %e, status = status.as_u16(), "Request failed");
                } else {
                    warn!(error = %e, status = status.as_u16(), "Request rejected");
                }
                (status, e.to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
