// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Request body too large: {0}")]
    BodyTooLarge(String),

    #[error("{0}")]
    UnsupportedShape(String),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    GeometryOperation(String),

    #[error("Batch too large: maximum is {max} shapes")]
    BatchTooLarge { max: usize },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidJson(_) => (StatusCode::BAD_REQUEST, "INVALID_JSON"),
            ApiError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "INVALID_QUERY"),
            ApiError::BodyTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "BODY_TOO_LARGE"),
            ApiError::UnsupportedShape(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNSUPPORTED_SHAPE"),
            ApiError::InvalidParameter(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_PARAMETER"),
            ApiError::GeometryOperation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "GEOMETRY_OPERATION_FAILED")
            }
            ApiError::BatchTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "BATCH_TOO_LARGE"),
            ApiError::Cache(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CACHE_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        }
    }

    /// Body without the status, for per-item errors inside a batch response.
    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.status_and_code().1.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(self.to_body())).into_response()
    }
}

impl From<psycad_geometry::Error> for ApiError {
    fn from(err: psycad_geometry::Error) -> Self {
        use psycad_geometry::Error;

        // Classify by the innermost failure, keep the full operand chain in the message
        let message = err.to_string();
        match err.into_root() {
            Error::UnsupportedShape(_) => ApiError::UnsupportedShape(message),
            Error::InvalidParameter { .. } => ApiError::InvalidParameter(message),
            Error::GeometryOperation { .. } => ApiError::GeometryOperation(message),
            Error::CoreError(core) => ApiError::from(core),
            _ => ApiError::Internal(message),
        }
    }
}

impl From<psycad_core::Error> for ApiError {
    fn from(err: psycad_core::Error) -> Self {
        match err {
            psycad_core::Error::Json(e) => ApiError::InvalidJson(e.to_string()),
            other => ApiError::InvalidParameter(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidJson(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl From<cacache::Error> for ApiError {
    fn from(err: cacache::Error) -> Self {
        ApiError::Cache(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_errors_map_to_422() {
        let err = ApiError::from(psycad_geometry::Error::UnsupportedShape("torus".into()));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "UNSUPPORTED_SHAPE")
        );

        let err = ApiError::from(psycad_geometry::Error::InvalidParameter {
            name: "radius".into(),
            value: -1.0,
            reason: "must be greater than zero",
        });
        assert_eq!(err.status_and_code().1, "INVALID_PARAMETER");
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn test_operand_errors_use_the_inner_code() {
        let err = ApiError::from(psycad_geometry::Error::InOperand {
            index: 2,
            source: Box::new(psycad_geometry::Error::UnsupportedShape("torus".into())),
        });
        assert_eq!(err.status_and_code().1, "UNSUPPORTED_SHAPE");
        assert!(err.to_string().contains("Operand of operation 2"));
        assert!(err.to_string().contains("torus"));
    }

    #[test]
    fn test_missing_attribute_is_internal() {
        let err = ApiError::from(psycad_geometry::Error::MissingAttribute("uv"));
        assert_eq!(err.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
