use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        achievement::{AchievementDto, SaveAchievementDto},
        api::{ErrorDto, MessageDto, UserTargetDto},
    },
    server::{
        controller::VisibilityParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::achievement::{Achievement, SaveAchievementParam},
        service::achievement::AchievementService,
        state::AppState,
    },
};

/// Tag for grouping achievement endpoints in OpenAPI documentation
pub static ACHIEVEMENT_TAG: &str = "achievement";

/// List achievements.
///
/// Students always get active achievements only; admins may pass `include_inactive=true`.
#[utoipa::path(
    get,
    path = "/api/achievements",
    tag = ACHIEVEMENT_TAG,
    params(
        ("include_inactive" = Option<bool>, Query, description = "Include deactivated achievements (admins only)")
    ),
    responses(
        (status = 200, description = "Achievements", body = Vec<AchievementDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_achievements(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<VisibilityParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let include_inactive = params.include_inactive && user.role.is_admin();
    let achievements = AchievementService::new(&state.db)
        .list(include_inactive)
        .await?;
    let achievements: Vec<AchievementDto> = achievements
        .into_iter()
        .map(Achievement::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(achievements)))
}

#[utoipa::path(
    get,
    path = "/api/achievements/{achievement_id}",
    tag = ACHIEVEMENT_TAG,
    params(
        ("achievement_id" = i32, Path, description = "Achievement ID")
    ),
    responses(
        (status = 200, description = "Achievement details", body = AchievementDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Achievement not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let achievement = AchievementService::new(&state.db)
        .get(achievement_id, user.role.is_admin())
        .await?;

    Ok((StatusCode::OK, Json(achievement.into_dto())))
}

/// Create an achievement.
///
/// Users who already meet the condition receive it the next time their progress changes.
#[utoipa::path(
    post,
    path = "/api/achievements",
    tag = ACHIEVEMENT_TAG,
    request_body = SaveAchievementDto,
    responses(
        (status = 201, description = "Achievement created", body = AchievementDto),
        (status = 400, description = "Invalid achievement data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SaveAchievementDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = SaveAchievementParam::from_dto(payload)?;
    let achievement = AchievementService::new(&state.db).create(param).await?;

    Ok((StatusCode::CREATED, Json(achievement.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/achievements/{achievement_id}",
    tag = ACHIEVEMENT_TAG,
    params(
        ("achievement_id" = i32, Path, description = "Achievement ID")
    ),
    request_body = SaveAchievementDto,
    responses(
        (status = 200, description = "Achievement updated", body = AchievementDto),
        (status = 400, description = "Invalid achievement data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Achievement not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<i32>,
    Json(payload): Json<SaveAchievementDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = SaveAchievementParam::from_dto(payload)?;
    let achievement = AchievementService::new(&state.db)
        .update(achievement_id, param)
        .await?;

    Ok((StatusCode::OK, Json(achievement.into_dto())))
}

/// Delete an achievement. Users keep the reward points they already received.
#[utoipa::path(
    delete,
    path = "/api/achievements/{achievement_id}",
    tag = ACHIEVEMENT_TAG,
    params(
        ("achievement_id" = i32, Path, description = "Achievement ID")
    ),
    responses(
        (status = 204, description = "Achievement deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Achievement not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    AchievementService::new(&state.db)
        .delete(achievement_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Award an achievement to a user by hand.
///
/// Works for any condition type, including inactive achievements. The reward is credited and
/// the user notified.
///
/// # Returns
/// - `200 OK` - Achievement awarded
/// - `404 Not Found` - Achievement or user not found
/// - `409 Conflict` - User already has the achievement
#[utoipa::path(
    post,
    path = "/api/admin/achievements/{achievement_id}/assign",
    tag = ACHIEVEMENT_TAG,
    params(
        ("achievement_id" = i32, Path, description = "Achievement ID")
    ),
    request_body = UserTargetDto,
    responses(
        (status = 200, description = "Achievement awarded", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Achievement or user not found", body = ErrorDto),
        (status = 409, description = "User already has this achievement", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<i32>,
    Json(payload): Json<UserTargetDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    AchievementService::new(&state.db)
        .assign(achievement_id, payload.user_id, admin.id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Achievement awarded"))))
}

/// Take an achievement away from a user. Reward points are not deducted.
#[utoipa::path(
    post,
    path = "/api/admin/achievements/{achievement_id}/revoke",
    tag = ACHIEVEMENT_TAG,
    params(
        ("achievement_id" = i32, Path, description = "Achievement ID")
    ),
    request_body = UserTargetDto,
    responses(
        (status = 200, description = "Achievement revoked", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User does not have this achievement", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn revoke_achievement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(achievement_id): Path<i32>,
    Json(payload): Json<UserTargetDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    AchievementService::new(&state.db)
        .revoke(achievement_id, payload.user_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Achievement revoked"))))
}
