//! Event participation repository.
//!
//! Every status change is a conditional update guarded by the expected current status, so two
//! racing requests cannot both apply the same transition. Callers inspect the returned flag to
//! detect a lost race.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    event::Event,
    participation::{Participant, Participation, ParticipationStatus},
};

pub struct ParticipantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ParticipantRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find(&self, event_id: i32, user_id: i32) -> Result<Option<Participation>, DbErr> {
        let entity = entity::prelude::EventParticipant::find_by_id((event_id, user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Participation::from_entity))
    }

    /// Inserts a new `registered` participation.
    ///
    /// # Returns
    /// - `Ok(Participation)` - Created row
    /// - `Err(DbErr)` - Database error, including a unique violation if the pair exists
    pub async fn create(&self, event_id: i32, user_id: i32) -> Result<Participation, DbErr> {
        let entity = entity::event_participant::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(ParticipationStatus::Registered.into_entity()),
            points_awarded: ActiveValue::Set(0),
            registered_at: ActiveValue::Set(Utc::now()),
            confirmed_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(Participation::from_entity(entity))
    }

    /// Moves a `registered` participation to `confirmed`, recording the points credited.
    ///
    /// # Returns
    /// - `Ok(true)` - Transition applied
    /// - `Ok(false)` - Row missing or no longer `registered`
    pub async fn confirm(
        &self,
        event_id: i32,
        user_id: i32,
        points_awarded: i32,
    ) -> Result<bool, DbErr> {
        self.transition(
            event_id,
            user_id,
            ParticipationStatus::Registered,
            entity::event_participant::ActiveModel {
                status: ActiveValue::Set(ParticipationStatus::Confirmed.into_entity()),
                points_awarded: ActiveValue::Set(points_awarded),
                confirmed_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            },
        )
        .await
    }

    /// Moves a `confirmed` participation back to `registered` and clears the awarded points.
    pub async fn unconfirm(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        self.transition(
            event_id,
            user_id,
            ParticipationStatus::Confirmed,
            entity::event_participant::ActiveModel {
                status: ActiveValue::Set(ParticipationStatus::Registered.into_entity()),
                points_awarded: ActiveValue::Set(0),
                confirmed_at: ActiveValue::Set(None),
                ..Default::default()
            },
        )
        .await
    }

    /// Moves a `registered` participation to `cancelled`.
    pub async fn cancel(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        self.transition(
            event_id,
            user_id,
            ParticipationStatus::Registered,
            entity::event_participant::ActiveModel {
                status: ActiveValue::Set(ParticipationStatus::Cancelled.into_entity()),
                ..Default::default()
            },
        )
        .await
    }

    /// Moves a `cancelled` participation back to `registered` with a fresh registration time.
    pub async fn revive(&self, event_id: i32, user_id: i32) -> Result<bool, DbErr> {
        self.transition(
            event_id,
            user_id,
            ParticipationStatus::Cancelled,
            entity::event_participant::ActiveModel {
                status: ActiveValue::Set(ParticipationStatus::Registered.into_entity()),
                registered_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            },
        )
        .await
    }

    async fn transition(
        &self,
        event_id: i32,
        user_id: i32,
        from: ParticipationStatus,
        changes: entity::event_participant::ActiveModel,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::EventParticipant::update_many()
            .set(changes)
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .filter(entity::event_participant::Column::Status.eq(from.into_entity()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Gets every participation of an event joined with the participant, in registration order.
    pub async fn get_by_event(&self, event_id: i32) -> Result<Vec<Participant>, DbErr> {
        let rows = entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::EventId.eq(event_id))
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::event_participant::Column::RegisteredAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(participation, user)| {
                user.map(|user| Participant::from_entity(participation, user))
            })
            .collect())
    }

    /// Gets a user's participations joined with their events, most recent registration first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<(Participation, Event)>, DbErr> {
        let rows = entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::Event)
            .order_by_desc(entity::event_participant::Column::RegisteredAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(participation, event)| {
                event.map(|event| {
                    (
                        Participation::from_entity(participation),
                        Event::from_entity(event),
                    )
                })
            })
            .collect())
    }

    /// Counts a user's confirmed attendances.
    pub async fn count_confirmed_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::UserId.eq(user_id))
            .filter(
                entity::event_participant::Column::Status
                    .eq(ParticipationStatus::Confirmed.into_entity()),
            )
            .count(self.db)
            .await
    }
}
