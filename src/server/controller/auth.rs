use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        auth::{AuthResponseDto, LoginDto, RegisterDto},
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::auth::{AuthService, RegisterParam},
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new student account.
///
/// Creates the account with a zero point balance and returns an access token so the client
/// is logged in straight away.
///
/// # Returns
/// - `201 Created` - Account created, token and user returned
/// - `400 Bad Request` - Invalid login, password, name or class
/// - `409 Conflict` - Login already taken
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Login already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens);

    let (token, user) = service
        .register(RegisterParam {
            login: payload.login,
            password: payload.password,
            name: payload.name,
            class_grade: payload.class_grade,
            class_letter: payload.class_letter,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto {
            token,
            user: user.into_dto(),
        }),
    ))
}

/// Log in with login and password.
///
/// # Returns
/// - `200 OK` - Token and user
/// - `401 Unauthorized` - Unknown login or wrong password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthResponseDto),
        (status = 401, description = "Invalid login or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(&state.db, &state.tokens);

    let (token, user) = service.login(&payload.login, &payload.password).await?;

    Ok((
        StatusCode::OK,
        Json(AuthResponseDto {
            token,
            user: user.into_dto(),
        }),
    ))
}

/// Get the user the bearer token belongs to.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
