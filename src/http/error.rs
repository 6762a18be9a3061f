//! # HTTP Errors
//!
//! Maps collection errors onto status codes and a fixed JSON body. The
//! underlying error text is logged, never sent to the client.

use crate::framework::FrameworkError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors a request handler can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Collection(#[from] FrameworkError),

    /// The body was not valid JSON for the payload type.
    #[error("Malformed body: {0}")]
    Body(#[from] JsonRejection),

    /// The path segment does not parse as an identifier of this collection.
    #[error("Malformed identifier: {0:?}")]
    Identifier(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Collection(e) => match e {
                FrameworkError::NotFound(_) => StatusCode::NOT_FOUND,
                FrameworkError::Conflict(_) => StatusCode::CONFLICT,
                FrameworkError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                FrameworkError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                FrameworkError::Canceled
                | FrameworkError::StoreUnavailable(_)
                | FrameworkError::IdExhausted(_)
                | FrameworkError::ActorClosed
                | FrameworkError::ActorDropped => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Body(_) | ApiError::Identifier(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The message shown to clients; one per error kind.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Collection(e) => match e {
                FrameworkError::NotFound(_) => "resource not found",
                FrameworkError::Conflict(_) => "identifier already in use",
                FrameworkError::InvalidInput(_) => "invalid input",
                FrameworkError::Timeout => "request timed out",
                FrameworkError::Canceled => "request canceled",
                FrameworkError::IdExhausted(_) => "no identifier available",
                FrameworkError::StoreUnavailable(_)
                | FrameworkError::ActorClosed
                | FrameworkError::ActorDropped => "service unavailable",
            },
            ApiError::Body(_) => "malformed request body",
            ApiError::Identifier(_) => "malformed identifier",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        let body = ErrorBody {
            error: self.public_message(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
