//! Centralized translation of model failures into HTTP responses.
//!
//! Handlers never build error responses. They forward the `ModelError` with
//! `?`, which wraps it in [`ApiError`] unchanged, and this module decides the
//! status code and body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_core::ModelError;

/// A model failure on its way to the client.
#[derive(Debug, Error, PartialEq)]
#[error(transparent)]
pub struct ApiError(#[from] pub ModelError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn into_inner(self) -> ModelError {
        self.0
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "data access failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "request rejected by model");
        }

        let body = ErrorBody {
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
