use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> ApiError {
        match error {
            StoreError::NotFound { .. } => ApiError::NotFound,
            StoreError::Database(error) => {
                tracing::warn!("Database error: {error}");
                ApiError::Unprocessable
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> ApiError {
        tracing::debug!("Rejected body: {}", rejection.body_text());
        ApiError::Unprocessable
    }
}

// a path segment that doesn't parse means the route doesn't exist
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> ApiError {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        ApiError::NotFound
    }
}

/// Rewrites the framework's bare 405 into the error envelope, keeping `Allow`.
pub async fn envelope_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}
