//! Event participation models and the participation state machine.

use chrono::{DateTime, Utc};

use crate::{
    model::event::{MyEventDto, ParticipantDto, ParticipationDto, ParticipationStatusDto},
    server::{error::AppError, model::event::Event},
};

/// Lifecycle of a user's registration for an event.
///
/// Allowed transitions:
/// - `Registered -> Confirmed` when an admin confirms attendance
/// - `Confirmed -> Registered` when an admin cancels the confirmation
/// - `Registered -> Cancelled` when the student unregisters
/// - `Cancelled -> Registered` when the student registers again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationStatus {
    Registered,
    Confirmed,
    Cancelled,
}

impl ParticipationStatus {
    /// Whether moving from `self` to `next` is an allowed transition.
    pub fn can_transition_to(self, next: ParticipationStatus) -> bool {
        use ParticipationStatus::*;

        matches!(
            (self, next),
            (Registered, Confirmed)
                | (Confirmed, Registered)
                | (Registered, Cancelled)
                | (Cancelled, Registered)
        )
    }

    /// Checks a transition, producing the client-facing rejection when it is not allowed.
    pub fn ensure_transition(self, next: ParticipationStatus) -> Result<(), AppError> {
        if self.can_transition_to(next) {
            return Ok(());
        }

        use ParticipationStatus::*;

        let message = match (self, next) {
            (Confirmed, Confirmed) => "Attendance already confirmed",
            (Confirmed, Cancelled) => "Cannot unregister after attendance is confirmed",
            (Registered, Registered) => "Attendance is not confirmed",
            (Cancelled, Confirmed) => "Participation was cancelled",
            _ => "Not registered for this event",
        };

        Err(AppError::BadRequest(message.to_string()))
    }

    /// Checks that an admin may take back a confirmation.
    ///
    /// `Registered` is also reachable from `Cancelled`, but only through the student
    /// re-registering, so this path accepts `Confirmed` alone.
    pub fn ensure_unconfirm(self) -> Result<(), AppError> {
        if self != ParticipationStatus::Confirmed {
            return Err(AppError::BadRequest(
                "Attendance is not confirmed".to_string(),
            ));
        }

        self.ensure_transition(ParticipationStatus::Registered)
    }

    /// Whether the participation occupies a seat toward the event's capacity.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ParticipationStatus::Registered | ParticipationStatus::Confirmed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParticipationStatus::Registered => "registered",
            ParticipationStatus::Confirmed => "confirmed",
            ParticipationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_entity(status: entity::event_participant::ParticipationStatus) -> Self {
        use entity::event_participant::ParticipationStatus as Status;

        match status {
            Status::Registered => Self::Registered,
            Status::Confirmed => Self::Confirmed,
            Status::Cancelled => Self::Cancelled,
        }
    }

    pub fn into_entity(self) -> entity::event_participant::ParticipationStatus {
        use entity::event_participant::ParticipationStatus as Status;

        match self {
            Self::Registered => Status::Registered,
            Self::Confirmed => Status::Confirmed,
            Self::Cancelled => Status::Cancelled,
        }
    }

    pub fn into_dto(self) -> ParticipationStatusDto {
        match self {
            Self::Registered => ParticipationStatusDto::Registered,
            Self::Confirmed => ParticipationStatusDto::Confirmed,
            Self::Cancelled => ParticipationStatusDto::Cancelled,
        }
    }
}

/// A user's participation row for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Participation {
    pub event_id: i32,
    pub user_id: i32,
    pub status: ParticipationStatus,
    /// Points credited at confirmation; zero unless confirmed.
    pub points_awarded: i32,
    pub registered_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Participation {
    pub fn from_entity(entity: entity::event_participant::Model) -> Self {
        Self {
            event_id: entity.event_id,
            user_id: entity.user_id,
            status: ParticipationStatus::from_entity(entity.status),
            points_awarded: entity.points_awarded,
            registered_at: entity.registered_at,
            confirmed_at: entity.confirmed_at,
        }
    }

    pub fn into_dto(self) -> ParticipationDto {
        ParticipationDto {
            event_id: self.event_id,
            user_id: self.user_id,
            status: self.status.into_dto(),
            points_awarded: self.points_awarded,
            registered_at: self.registered_at,
            confirmed_at: self.confirmed_at,
        }
    }
}

/// Participation joined with the participant's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub participation: Participation,
    pub login: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
}

impl Participant {
    pub fn from_entity(
        participation: entity::event_participant::Model,
        user: entity::user::Model,
    ) -> Self {
        Self {
            participation: Participation::from_entity(participation),
            login: user.login,
            name: user.name,
            class_grade: user.class_grade,
            class_letter: user.class_letter,
        }
    }

    /// Class label such as `10A`, empty when the participant has no class.
    pub fn class_label(&self) -> String {
        match (self.class_grade, &self.class_letter) {
            (Some(grade), Some(letter)) => format!("{}{}", grade, letter),
            (Some(grade), None) => grade.to_string(),
            _ => String::new(),
        }
    }

    pub fn into_dto(self) -> ParticipantDto {
        ParticipantDto {
            user_id: self.participation.user_id,
            login: self.login,
            name: self.name,
            class_grade: self.class_grade,
            class_letter: self.class_letter,
            status: self.participation.status.into_dto(),
            points_awarded: self.participation.points_awarded,
            registered_at: self.participation.registered_at,
            confirmed_at: self.participation.confirmed_at,
        }
    }
}

/// Participation joined with its event, for a student's own history.
#[derive(Debug, Clone, PartialEq)]
pub struct MyEvent {
    pub participation: Participation,
    pub event: Event,
    pub participant_count: u64,
}

impl MyEvent {
    pub fn into_dto(self) -> MyEventDto {
        MyEventDto {
            event: self.event.into_dto(self.participant_count),
            status: self.participation.status.into_dto(),
            points_awarded: self.participation.points_awarded,
            registered_at: self.participation.registered_at,
            confirmed_at: self.participation.confirmed_at,
        }
    }
}
