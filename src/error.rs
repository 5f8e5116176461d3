use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Advisory returned when a `/users/...` path does not carry both a user and a resource.
pub const INVALID_RESOURCE_PATH: &str = "Invalid path. Use: /users/{user_id}/{resource}";

/// Startup failures. Any of these ends the process with a non-zero status.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid SERVICE_PORT: {0:?}")]
    InvalidPort(String),
}

/// ApiError
///
/// Request-shape failures surfaced to the caller. There is deliberately no
/// 401/403 variant: authentication and authorization happen in the policy layer
/// in front of this service.
#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("Invalid path. Use: /users/{{user_id}}/{{resource}}")]
    InvalidResourcePath,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidResourcePath => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
