//! Attendance confirmation and reversal.
//!
//! Confirming attendance credits the event's points and notifies the student; cancelling a
//! confirmation takes back exactly the points recorded on the participation. Each runs in a
//! single transaction guarded by a conditional status update, so a participation is never
//! credited twice.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        event::EventRepository, notification::NotificationRepository,
        participant::ParticipantRepository,
    },
    error::AppError,
    model::{
        event::Event,
        notification::{NewNotification, NotificationKind},
        participation::{Participation, ParticipationStatus},
    },
    service::{achievement::AchievementService, change_points},
};

pub struct AttendanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AttendanceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Confirms that a registered user attended an event.
    ///
    /// Awards the event's points, sends an `event_confirmed` notification and then evaluates
    /// achievements for the user.
    ///
    /// # Returns
    /// - `Ok(Participation)` - Confirmed participation with `points_awarded` set
    /// - `Err(AppError::NotFound)` - Event or participation does not exist
    /// - `Err(AppError::BadRequest)` - Already confirmed or cancelled
    pub async fn confirm(&self, event_id: i32, user_id: i32) -> Result<Participation, AppError> {
        let txn = self.db.begin().await?;
        let participants = ParticipantRepository::new(&txn);

        let event = find_event(&txn, event_id).await?;
        let participation = participants
            .find(event_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))?;

        participation
            .status
            .ensure_transition(ParticipationStatus::Confirmed)?;

        if !participants.confirm(event_id, user_id, event.points).await? {
            return Err(AppError::BadRequest(
                "Attendance already confirmed".to_string(),
            ));
        }

        change_points(&txn, user_id, event.points).await?;

        NotificationRepository::new(&txn)
            .create(NewNotification {
                user_id,
                kind: NotificationKind::EventConfirmed,
                title: "Attendance confirmed".to_string(),
                message: format!(
                    "Your attendance at \"{}\" was confirmed: +{} points",
                    event.title, event.points
                ),
                related_id: Some(event.id),
            })
            .await?;

        let participation = participants
            .find(event_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))?;

        txn.commit().await?;

        tracing::info!(
            "Confirmed attendance of user {} at event {} (+{} points)",
            user_id,
            event_id,
            event.points
        );

        AchievementService::new(self.db).evaluate_or_log(user_id).await;

        Ok(participation)
    }

    /// Reverts a confirmation, returning the participation to `registered`.
    ///
    /// The points recorded at confirmation are subtracted even if that takes the balance
    /// below zero. Achievements already earned are kept.
    pub async fn cancel(&self, event_id: i32, user_id: i32) -> Result<Participation, AppError> {
        let txn = self.db.begin().await?;
        let participants = ParticipantRepository::new(&txn);

        let event = find_event(&txn, event_id).await?;
        let participation = participants
            .find(event_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))?;

        participation.status.ensure_unconfirm()?;

        if !participants.unconfirm(event_id, user_id).await? {
            return Err(AppError::BadRequest(
                "Attendance is not confirmed".to_string(),
            ));
        }

        let revoked = participation.points_awarded;
        change_points(&txn, user_id, -revoked).await?;

        NotificationRepository::new(&txn)
            .create(NewNotification {
                user_id,
                kind: NotificationKind::EventUnconfirmed,
                title: "Attendance cancelled".to_string(),
                message: format!(
                    "Your attendance at \"{}\" was cancelled: -{} points",
                    event.title, revoked
                ),
                related_id: Some(event.id),
            })
            .await?;

        let participation = participants
            .find(event_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))?;

        txn.commit().await?;

        tracing::info!(
            "Cancelled attendance of user {} at event {} (-{} points)",
            user_id,
            event_id,
            revoked
        );

        Ok(participation)
    }
}

async fn find_event<C: ConnectionTrait>(db: &C, event_id: i32) -> Result<Event, AppError> {
    EventRepository::new(db)
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
}
