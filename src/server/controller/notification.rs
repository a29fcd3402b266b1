use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        notification::{PaginatedNotificationsDto, UnreadCountDto},
    },
    server::{
        controller::{clamp_per_page, default_per_page},
        error::AppError,
        middleware::auth::AuthGuard,
        model::notification::NotificationQuery,
        service::notification::NotificationService,
        state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

#[derive(Deserialize)]
pub struct NotificationListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    #[serde(default)]
    pub unread_only: bool,
}

/// List the caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("per_page" = Option<u64>, Query, description = "Notifications per page (default: 20, max: 100)"),
        ("unread_only" = Option<bool>, Query, description = "Only unread notifications")
    ),
    responses(
        (status = 200, description = "Page of notifications", body = PaginatedNotificationsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let notifications = NotificationService::new(&state.db)
        .get_paginated(NotificationQuery {
            user_id: user.id,
            unread_only: params.unread_only,
            page: params.page,
            per_page: clamp_per_page(params.per_page),
        })
        .await?;

    Ok((StatusCode::OK, Json(notifications.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of unread notifications", body = UnreadCountDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let count = NotificationService::new(&state.db)
        .unread_count(user.id)
        .await?;

    Ok((StatusCode::OK, Json(UnreadCountDto { count })))
}

/// Mark one of the caller's notifications as read.
///
/// Notifications of other users are reported as missing.
#[utoipa::path(
    put,
    path = "/api/notifications/{notification_id}/read",
    tag = NOTIFICATION_TAG,
    params(
        ("notification_id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked read", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    NotificationService::new(&state.db)
        .mark_read(notification_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Notification marked as read"))))
}

#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "All notifications marked read", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let updated = NotificationService::new(&state.db)
        .mark_all_read(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(format!(
            "{} notifications marked as read",
            updated
        ))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{notification_id}",
    tag = NOTIFICATION_TAG,
    params(
        ("notification_id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    NotificationService::new(&state.db)
        .delete(notification_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
