//! HTTP error responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::error::{FieldViolation, ValidationError};
use crate::error::Error;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] Error),

    /// Query parameters failed the boundary checks.
    #[error("invalid query parameters: {0}")]
    InvalidQuery(ValidationError),

    /// The request could not be decoded at all.
    #[error("invalid request: {0}")]
    Unprocessable(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl ApiError {
    /// Status code for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_) | Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(err) => match err {
                Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                Error::InvalidIdentifier(_) => StatusCode::NOT_ACCEPTABLE,
                Error::NotFound { .. } => StatusCode::NOT_FOUND,
                Error::Store(store) if store.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::InvalidQuery(err) | Self::Service(Error::Validation(err)) => &err.violations,
            _ => &[],
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    field: &'a str,
    reason: &'a str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<ErrorDetail<'a>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            details: self
                .violations()
                .iter()
                .map(|v| ErrorDetail {
                    field: &v.field,
                    reason: &v.reason,
                })
                .collect(),
        };
        (status, Json(body)).into_response()
    }
}
