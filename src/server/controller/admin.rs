use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        user::{
            AdjustPointsDto, CreateUserDto, PaginatedUsersDto, ResetPasswordDto,
            ResetPasswordResponseDto, RoleDto, UpdateUserDto, UserDto,
        },
    },
    server::{
        controller::{clamp_per_page, default_per_page},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::{Role, UserQuery},
        service::user::{AdminCreateUserParam, AdminUpdateUserParam, UserService},
        state::AppState,
    },
};

/// Tag for grouping admin user management endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize)]
pub struct UserListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub search: Option<String>,
    pub role: Option<RoleDto>,
}

/// Get paginated users.
///
/// Users are ordered by name. The optional search term matches part of the login or name.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` - Missing or invalid token
/// - `403 Forbidden` - User is not an admin
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Users per page (default: 20, max: 100)"),
        ("search" = Option<String>, Query, description = "Substring of login or name"),
        ("role" = Option<RoleDto>, Query, description = "Only users with this role")
    ),
    responses(
        (status = 200, description = "Successfully retrieved users", body = PaginatedUsersDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db)
        .get_paginated(UserQuery {
            search: params.search,
            role: params.role.map(Role::from_dto),
            page: params.page,
            per_page: clamp_per_page(params.per_page),
        })
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db).get(user_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Create a user with any role.
///
/// # Returns
/// - `201 Created` - User created
/// - `400 Bad Request` - Invalid login, password, name or class
/// - `409 Conflict` - Login already taken
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 409, description = "Login already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .create(AdminCreateUserParam {
            login: payload.login,
            password: payload.password,
            name: payload.name,
            class_grade: payload.class_grade,
            class_letter: payload.class_letter,
            role: payload.role.map(Role::from_dto).unwrap_or(Role::Student),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Update a user.
///
/// Only the fields present in the body change. An admin cannot remove their own admin role.
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Invalid field or self-demotion
/// - `404 Not Found` - User not found
/// - `409 Conflict` - New login already taken
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Login already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .update(
            admin.id,
            user_id,
            AdminUpdateUserParam {
                login: payload.login,
                name: payload.name,
                class_grade: payload.class_grade,
                class_letter: payload.class_letter,
                role: payload.role.map(Role::from_dto),
                avatar: payload.avatar,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Delete a user along with their participations, achievements, orders and notifications.
///
/// # Returns
/// - `204 No Content` - User deleted
/// - `400 Bad Request` - Admin tried to delete their own account
/// - `404 Not Found` - User not found
#[utoipa::path(
    delete,
    path = "/api/admin/users/{user_id}",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete own account", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db).delete(admin.id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reset a user's password.
///
/// Sets the password from the body, or generates a random one when the body omits it. The
/// password in effect is returned so the admin can hand it over.
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/reset-password",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = ResetPasswordResponseDto),
        (status = 400, description = "Password too short", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let new_password = UserService::new(&state.db)
        .reset_password(user_id, payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ResetPasswordResponseDto { new_password }),
    ))
}

/// Add or deduct points with a reason.
///
/// The user is notified of the change and achievement evaluation runs afterwards. A deduction
/// may leave the balance negative.
///
/// # Returns
/// - `200 OK` - User with the new balance
/// - `400 Bad Request` - Empty reason
/// - `404 Not Found` - User not found
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/points",
    tag = ADMIN_TAG,
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = AdjustPointsDto,
    responses(
        (status = 200, description = "Points adjusted", body = UserDto),
        (status = 400, description = "Reason missing", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn adjust_points(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
    Json(payload): Json<AdjustPointsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .adjust_points(user_id, payload.delta, &payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
