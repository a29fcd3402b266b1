use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatusDto {
    Registered,
    Confirmed,
    Cancelled,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct EventDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub points: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub image: Option<String>,
    pub is_active: bool,
    /// Registered plus confirmed participants.
    pub participant_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateEventDto {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub points: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct UpdateEventDto {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub points: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub image: Option<String>,
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ParticipationDto {
    pub event_id: i32,
    pub user_id: i32,
    pub status: ParticipationStatusDto,
    pub points_awarded: i32,
    pub registered_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// A participation joined with the event it belongs to, for a student's own history.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MyEventDto {
    pub event: EventDto,
    pub status: ParticipationStatusDto,
    pub points_awarded: i32,
    pub registered_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// A participation joined with the participant's identity, for admin attendance views.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ParticipantDto {
    pub user_id: i32,
    pub login: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    pub status: ParticipationStatusDto,
    pub points_awarded: i32,
    pub registered_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}
