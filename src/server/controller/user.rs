use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        achievement::EarnedAchievementDto,
        api::{ErrorDto, MessageDto},
        event::MyEventDto,
        user::{ChangePasswordDto, LeaderboardEntryDto, UpdateProfileDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            achievement::EarnedAchievement, participation::MyEvent, user::LeaderboardEntry,
        },
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping self-service user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<u64>,
}

/// Get the caller's profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user profile", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update the caller's display name and avatar.
///
/// Absent fields are left unchanged; an empty avatar clears it.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Name empty or too long
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = UserService::new(&state.db)
        .update_profile(user.id, payload.name, payload.avatar)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Change the caller's password.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Current password wrong or new password too short
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    put,
    path = "/api/users/me/password",
    tag = USER_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Current password incorrect or new password invalid", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db)
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password changed"))))
}

/// List the achievements the caller has earned, most recent first.
#[utoipa::path(
    get,
    path = "/api/users/me/achievements",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Earned achievements", body = Vec<EarnedAchievementDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_achievements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let achievements = UserService::new(&state.db).achievements(user.id).await?;
    let achievements: Vec<EarnedAchievementDto> = achievements
        .into_iter()
        .map(EarnedAchievement::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(achievements)))
}

/// List the events the caller registered for, including cancelled registrations.
#[utoipa::path(
    get,
    path = "/api/users/me/events",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Own participations with their events", body = Vec<MyEventDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let events = UserService::new(&state.db).events(user.id).await?;
    let events: Vec<MyEventDto> = events.into_iter().map(MyEvent::into_dto).collect();

    Ok((StatusCode::OK, Json(events)))
}

/// Get the students with the most points.
///
/// # Returns
/// - `200 OK` - Ranked students, at most `limit` (default 10, max 100)
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/users/leaderboard",
    tag = USER_TAG,
    params(
        ("limit" = Option<u64>, Query, description = "Number of students (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Leaderboard", body = Vec<LeaderboardEntryDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let entries = UserService::new(&state.db).leaderboard(params.limit).await?;
    let entries: Vec<LeaderboardEntryDto> = entries
        .into_iter()
        .map(LeaderboardEntry::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(entries)))
}
