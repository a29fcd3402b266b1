//! Event management and student registration.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{event::EventRepository, participant::ParticipantRepository},
    error::AppError,
    model::{
        event::{Event, EventWithCount, SaveEventParam},
        participation::{Participant, Participation, ParticipationStatus},
    },
};

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists events by start date with their participant counts.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<EventWithCount>, AppError> {
        let repo = EventRepository::new(self.db);

        let events = repo.list(include_inactive).await?;
        let ids: Vec<i32> = events.iter().map(|event| event.id).collect();
        let counts = repo.participant_counts(&ids).await?;

        Ok(events
            .into_iter()
            .map(|event| EventWithCount {
                participant_count: counts.get(&event.id).copied().unwrap_or(0),
                event,
            })
            .collect())
    }

    /// Gets an event. Inactive events are only visible when `include_inactive` is set.
    pub async fn get(&self, id: i32, include_inactive: bool) -> Result<EventWithCount, AppError> {
        let repo = EventRepository::new(self.db);

        let event = repo
            .find_by_id(id)
            .await?
            .filter(|event| include_inactive || event.is_active)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        let participant_count = repo.participant_count(id).await?;

        Ok(EventWithCount {
            event,
            participant_count,
        })
    }

    pub async fn create(&self, param: SaveEventParam) -> Result<Event, AppError> {
        let event = EventRepository::new(self.db).create(param).await?;

        tracing::info!("Created event {} ({})", event.title, event.id);

        Ok(event)
    }

    pub async fn update(
        &self,
        id: i32,
        param: SaveEventParam,
    ) -> Result<EventWithCount, AppError> {
        let repo = EventRepository::new(self.db);

        let event = repo
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        let participant_count = repo.participant_count(id).await?;

        Ok(EventWithCount {
            event,
            participant_count,
        })
    }

    /// Deletes an event together with its participations.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !EventRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        tracing::info!("Deleted event {}", id);

        Ok(())
    }

    /// Registers a user for an event.
    ///
    /// A previously cancelled registration is revived rather than duplicated.
    ///
    /// # Returns
    /// - `Ok(Participation)` - User is now registered
    /// - `Err(AppError::NotFound)` - Event does not exist or is inactive
    /// - `Err(AppError::BadRequest)` - Event has ended or is full
    /// - `Err(AppError::Conflict)` - User is already registered or confirmed
    pub async fn register(&self, event_id: i32, user_id: i32) -> Result<Participation, AppError> {
        let txn = self.db.begin().await?;
        let events = EventRepository::new(&txn);
        let participants = ParticipantRepository::new(&txn);

        let event = events
            .find_by_id(event_id)
            .await?
            .filter(|event| event.is_active)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if event.has_ended(Utc::now()) {
            return Err(AppError::BadRequest("Event has already ended".to_string()));
        }

        let existing = participants.find(event_id, user_id).await?;
        if let Some(existing) = &existing {
            if existing.status.is_active() {
                return Err(AppError::Conflict(
                    "Already registered for this event".to_string(),
                ));
            }
        }

        if let Some(capacity) = event.capacity {
            if events.participant_count(event_id).await? >= capacity.max(0) as u64 {
                return Err(AppError::BadRequest("Event is full".to_string()));
            }
        }

        let participation = match existing {
            Some(existing) => {
                existing
                    .status
                    .ensure_transition(ParticipationStatus::Registered)?;
                if !participants.revive(event_id, user_id).await? {
                    return Err(AppError::Conflict(
                        "Already registered for this event".to_string(),
                    ));
                }
                participants
                    .find(event_id, user_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))?
            }
            None => participants.create(event_id, user_id).await?,
        };

        txn.commit().await?;

        tracing::info!("User {} registered for event {}", user_id, event_id);

        Ok(participation)
    }

    /// Withdraws a registration that has not been confirmed yet.
    pub async fn unregister(&self, event_id: i32, user_id: i32) -> Result<(), AppError> {
        let participants = ParticipantRepository::new(self.db);

        let participation = participants
            .find(event_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not registered for this event".to_string()))?;

        participation
            .status
            .ensure_transition(ParticipationStatus::Cancelled)?;

        if !participants.cancel(event_id, user_id).await? {
            return Err(AppError::BadRequest(
                "Registration changed, please retry".to_string(),
            ));
        }

        tracing::info!("User {} unregistered from event {}", user_id, event_id);

        Ok(())
    }

    /// Lists an event's participants in registration order.
    pub async fn participants(&self, event_id: i32) -> Result<Vec<Participant>, AppError> {
        if EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        Ok(ParticipantRepository::new(self.db)
            .get_by_event(event_id)
            .await?)
    }
}
