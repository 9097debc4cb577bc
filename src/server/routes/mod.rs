mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use axum::{
    extract::FromRequest,
    extract::FromRequestParts,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::error::ApiError;

/// Success envelope: `{"success": true, ...body}`.
#[derive(Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

impl<T> Success<T> {
    pub fn new(body: T) -> Self {
        Success {
            success: true,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub type ApiResponse<T> = Result<Success<T>, ApiError>;

/// JSON body whose rejections become the 422 envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameters whose rejections become the 404 envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
