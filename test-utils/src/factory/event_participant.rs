//! Participation factory for linking users to events in tests.

use chrono::Utc;
use entity::event_participant::ParticipationStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating participation rows with a chosen status.
///
/// A `confirmed` row is created with `points_awarded` equal to the supplied value, but the
/// user's balance is left untouched; tests that need a consistent balance should set it on
/// the user factory.
pub struct ParticipationFactory<'a> {
    db: &'a DatabaseConnection,
    event_id: i32,
    user_id: i32,
    status: ParticipationStatus,
    points_awarded: i32,
}

impl<'a> ParticipationFactory<'a> {
    /// Creates a new factory for a `registered` participation.
    pub fn new(db: &'a DatabaseConnection, event_id: i32, user_id: i32) -> Self {
        Self {
            db,
            event_id,
            user_id,
            status: ParticipationStatus::Registered,
            points_awarded: 0,
        }
    }

    /// Marks the participation as confirmed with the given awarded points.
    pub fn confirmed(mut self, points_awarded: i32) -> Self {
        self.status = ParticipationStatus::Confirmed;
        self.points_awarded = points_awarded;
        self
    }

    pub fn cancelled(mut self) -> Self {
        self.status = ParticipationStatus::Cancelled;
        self
    }

    /// Builds and inserts the participation into the database.
    pub async fn build(self) -> Result<entity::event_participant::Model, DbErr> {
        let now = Utc::now();
        let confirmed_at = (self.status == ParticipationStatus::Confirmed).then_some(now);

        entity::event_participant::ActiveModel {
            event_id: ActiveValue::Set(self.event_id),
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            points_awarded: ActiveValue::Set(self.points_awarded),
            registered_at: ActiveValue::Set(now),
            confirmed_at: ActiveValue::Set(confirmed_at),
        }
        .insert(self.db)
        .await
    }
}

/// Registers a user for an event.
pub async fn create_participation(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
) -> Result<entity::event_participant::Model, DbErr> {
    ParticipationFactory::new(db, event_id, user_id).build().await
}

/// Creates an already-confirmed participation.
pub async fn create_confirmed_participation(
    db: &DatabaseConnection,
    event_id: i32,
    user_id: i32,
    points_awarded: i32,
) -> Result<entity::event_participant::Model, DbErr> {
    ParticipationFactory::new(db, event_id, user_id)
        .confirmed(points_awarded)
        .build()
        .await
}
