use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// Token failed signature or expiry validation, or its subject is malformed.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Login and password did not match a user.
    ///
    /// A single variant covers both unknown logins and wrong passwords so the response does not
    /// reveal which accounts exist.
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// Token is valid but the user it names no longer exists.
    #[error("User {0} not found in database")]
    UserNotInDatabase(i32),

    /// User is authenticated but lacks the required permission.
    ///
    /// # Fields
    /// - ID of the user who was denied
    /// - Description of the denied action for server-side logging
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
///
/// # Returns
/// - 401 Unauthorized - Missing or invalid token, bad credentials, or deleted user
/// - 403 Forbidden - Authenticated user lacks the required role
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid login or password".to_string(),
                }),
            )
                .into_response(),
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Insufficient permissions".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
