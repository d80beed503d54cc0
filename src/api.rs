use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::RankError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub message: String,
    pub error: ApiErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorInfo {
    pub code: String,
    pub details: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    pub fn bad_request(message: &str, code: &str, details: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                success: false,
                message: message.to_string(),
                error: ApiErrorInfo {
                    code: code.to_string(),
                    details,
                },
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request("Invalid request body", "invalid_request", rejection.body_text())
    }
}

impl From<RankError> for ApiError {
    fn from(err: RankError) -> Self {
        ApiError::bad_request("Validation failed", err.code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
