//! Event data repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::{
    event::{Event, SaveEventParam},
    participation::ParticipationStatus,
};

pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: SaveEventParam) -> Result<Event, DbErr> {
        let now = Utc::now();
        let entity = entity::event::ActiveModel {
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            event_type: ActiveValue::Set(param.event_type),
            points: ActiveValue::Set(param.points),
            start_date: ActiveValue::Set(param.start_date),
            end_date: ActiveValue::Set(param.end_date),
            capacity: ActiveValue::Set(param.capacity),
            image: ActiveValue::Set(param.image),
            is_active: ActiveValue::Set(param.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Event::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, DbErr> {
        let entity = entity::prelude::Event::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Event::from_entity))
    }

    /// Lists events ordered by start date, soonest first.
    ///
    /// # Arguments
    /// - `include_inactive` - Whether to include events hidden from students
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Event>, DbErr> {
        let mut select = entity::prelude::Event::find();
        if !include_inactive {
            select = select.filter(entity::event::Column::IsActive.eq(true));
        }

        let entities = select
            .order_by_asc(entity::event::Column::StartDate)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Event::from_entity).collect())
    }

    /// Replaces all editable fields of an event.
    ///
    /// # Returns
    /// - `Ok(Some(Event))` - Updated event
    /// - `Ok(None)` - No event with that ID
    pub async fn update(&self, id: i32, param: SaveEventParam) -> Result<Option<Event>, DbErr> {
        let Some(entity) = entity::prelude::Event::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.title = ActiveValue::Set(param.title);
        active.description = ActiveValue::Set(param.description);
        active.event_type = ActiveValue::Set(param.event_type);
        active.points = ActiveValue::Set(param.points);
        active.start_date = ActiveValue::Set(param.start_date);
        active.end_date = ActiveValue::Set(param.end_date);
        active.capacity = ActiveValue::Set(param.capacity);
        active.image = ActiveValue::Set(param.image);
        active.is_active = ActiveValue::Set(param.is_active);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Event::from_entity(entity)))
    }

    /// Deletes an event. Participations cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Event::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts registered and confirmed participants for each of the given events.
    ///
    /// Events without active participants are absent from the returned map.
    pub async fn participant_counts(&self, event_ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .column_as(Expr::cust("COUNT(*)"), "participant_count")
            .filter(entity::event_participant::Column::EventId.is_in(event_ids.to_vec()))
            .filter(entity::event_participant::Column::Status.is_in([
                ParticipationStatus::Registered.into_entity(),
                ParticipationStatus::Confirmed.into_entity(),
            ]))
            .group_by(entity::event_participant::Column::EventId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(event_id, count)| (event_id, count.max(0) as u64))
            .collect())
    }

    /// Counts registered and confirmed participants of one event.
    pub async fn participant_count(&self, event_id: i32) -> Result<u64, DbErr> {
        let counts = self.participant_counts(&[event_id]).await?;

        Ok(counts.get(&event_id).copied().unwrap_or(0))
    }
}
