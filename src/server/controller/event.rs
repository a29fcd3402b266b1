use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, UserTargetDto},
        event::{CreateEventDto, EventDto, ParticipantDto, ParticipationDto, UpdateEventDto},
    },
    server::{
        controller::VisibilityParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            event::{EventWithCount, SaveEventParam},
            participation::Participant,
        },
        service::{
            attendance::AttendanceService,
            event::EventService,
            export::{ExportService, XLSX_CONTENT_TYPE},
        },
        state::AppState,
    },
};

/// Tag for grouping event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "event";

/// List events ordered by start date.
///
/// Students always get active events only; admins may pass `include_inactive=true`.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(
        ("include_inactive" = Option<bool>, Query, description = "Include deactivated events (admins only)")
    ),
    responses(
        (status = 200, description = "Events with participant counts", body = Vec<EventDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<VisibilityParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let include_inactive = params.include_inactive && user.role.is_admin();
    let events = EventService::new(&state.db).list(include_inactive).await?;
    let events: Vec<EventDto> = events.into_iter().map(EventWithCount::into_dto).collect();

    Ok((StatusCode::OK, Json(events)))
}

/// Get an event by ID.
///
/// Deactivated events are only visible to admins.
#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event details", body = EventDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let event = EventService::new(&state.db)
        .get(event_id, user.role.is_admin())
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// Create an event.
///
/// # Access Control
/// - `Admin` - Only admins can create events
///
/// # Returns
/// - `201 Created` - Event created
/// - `400 Bad Request` - Empty title, negative points, end before start or capacity below 1
#[utoipa::path(
    post,
    path = "/api/events",
    tag = EVENT_TAG,
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = SaveEventParam::from_create_dto(payload)?;
    let event = EventService::new(&state.db).create(param).await?;

    Ok((StatusCode::CREATED, Json(event.into_dto(0))))
}

/// Replace an event's fields.
///
/// Points already awarded to confirmed participants are not changed.
#[utoipa::path(
    put,
    path = "/api/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
    Json(payload): Json<UpdateEventDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = SaveEventParam::from_update_dto(payload)?;
    let event = EventService::new(&state.db).update(event_id, param).await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// Delete an event and all of its participations.
#[utoipa::path(
    delete,
    path = "/api/events/{event_id}",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    EventService::new(&state.db).delete(event_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Register the caller for an event.
///
/// A previously cancelled registration is reopened.
///
/// # Returns
/// - `201 Created` - Registered
/// - `400 Bad Request` - Event has ended or is full
/// - `404 Not Found` - Event not found or inactive
/// - `409 Conflict` - Already registered
#[utoipa::path(
    post,
    path = "/api/events/{event_id}/register",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 201, description = "Registered for the event", body = ParticipationDto),
        (status = 400, description = "Event ended or full", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 409, description = "Already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_for_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let participation = EventService::new(&state.db)
        .register(event_id, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(participation.into_dto())))
}

/// Withdraw the caller's registration.
///
/// Only possible while the attendance has not been confirmed.
#[utoipa::path(
    delete,
    path = "/api/events/{event_id}/register",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Registration cancelled"),
        (status = 400, description = "Attendance already confirmed or registration cancelled", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Not registered for this event", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unregister_from_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    EventService::new(&state.db)
        .unregister(event_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List an event's participants in registration order.
#[utoipa::path(
    get,
    path = "/api/admin/events/{event_id}/participants",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Participants with their status", body = Vec<ParticipantDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_participants(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let participants = EventService::new(&state.db).participants(event_id).await?;
    let participants: Vec<ParticipantDto> = participants
        .into_iter()
        .map(Participant::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(participants)))
}

/// Confirm a participant's attendance and credit the event's points.
///
/// Achievement evaluation runs for the participant afterwards.
///
/// # Returns
/// - `200 OK` - Confirmed participation with the awarded points
/// - `400 Bad Request` - Already confirmed or registration cancelled
/// - `404 Not Found` - Event or participation not found
#[utoipa::path(
    post,
    path = "/api/admin/events/{event_id}/confirm-attendance",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = UserTargetDto,
    responses(
        (status = 200, description = "Attendance confirmed", body = ParticipationDto),
        (status = 400, description = "Attendance already confirmed", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event or participation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
    Json(payload): Json<UserTargetDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let participation = AttendanceService::new(&state.db)
        .confirm(event_id, payload.user_id)
        .await?;

    Ok((StatusCode::OK, Json(participation.into_dto())))
}

/// Revert a confirmed attendance and take back the points it awarded.
///
/// The participant's balance may go negative if the points were already spent.
#[utoipa::path(
    post,
    path = "/api/admin/events/{event_id}/cancel-attendance",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    request_body = UserTargetDto,
    responses(
        (status = 200, description = "Confirmation cancelled", body = ParticipationDto),
        (status = 400, description = "Attendance is not confirmed", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event or participation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
    Json(payload): Json<UserTargetDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let participation = AttendanceService::new(&state.db)
        .cancel(event_id, payload.user_id)
        .await?;

    Ok((StatusCode::OK, Json(participation.into_dto())))
}

/// Download an event's participant list as an XLSX workbook.
#[utoipa::path(
    get,
    path = "/api/admin/events/{event_id}/export-participants",
    tag = EVENT_TAG,
    params(
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Participant workbook", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export_participants(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let export = ExportService::new(&state.db).participants(event_id).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        export.bytes,
    ))
}
