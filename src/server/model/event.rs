//! Event domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::event::{CreateEventDto, EventDto, UpdateEventDto},
    server::error::AppError,
};

/// School event that awards points to confirmed attendees.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub points: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Maximum number of active participants, `None` for unlimited.
    pub capacity: Option<i32>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            event_type: entity.event_type,
            points: entity.points,
            start_date: entity.start_date,
            end_date: entity.end_date,
            capacity: entity.capacity,
            image: entity.image,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    /// Whether the event has finished at the given instant.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_date < now
    }

    /// Converts to a DTO, attaching the current participant count.
    pub fn into_dto(self, participant_count: u64) -> EventDto {
        EventDto {
            id: self.id,
            title: self.title,
            description: self.description,
            event_type: self.event_type,
            points: self.points,
            start_date: self.start_date,
            end_date: self.end_date,
            capacity: self.capacity,
            image: self.image,
            is_active: self.is_active,
            participant_count,
            created_at: self.created_at,
        }
    }
}

/// Event with the number of registered and confirmed participants.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWithCount {
    pub event: Event,
    pub participant_count: u64,
}

impl EventWithCount {
    pub fn into_dto(self) -> EventDto {
        self.event.into_dto(self.participant_count)
    }
}

/// Validated fields for creating or replacing an event.
#[derive(Debug, Clone)]
pub struct SaveEventParam {
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

impl SaveEventParam {
    pub fn from_create_dto(dto: CreateEventDto) -> Result<Self, AppError> {
        Self {
            title: dto.title,
            description: dto.description,
            event_type: dto.event_type,
            points: dto.points,
            start_date: dto.start_date,
            end_date: dto.end_date,
            capacity: dto.capacity,
            image: dto.image,
            is_active: dto.is_active,
        }
        .validated()
    }

    pub fn from_update_dto(dto: UpdateEventDto) -> Result<Self, AppError> {
        Self {
            title: dto.title,
            description: dto.description,
            event_type: dto.event_type,
            points: dto.points,
            start_date: dto.start_date,
            end_date: dto.end_date,
            capacity: dto.capacity,
            image: dto.image,
            is_active: dto.is_active,
        }
        .validated()
    }

    fn validated(mut self) -> Result<Self, AppError> {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            return Err(AppError::BadRequest("Event title is required".to_string()));
        }

        self.event_type = self.event_type.trim().to_string();
        if self.event_type.is_empty() {
            return Err(AppError::BadRequest("Event type is required".to_string()));
        }

        if self.points < 0 {
            return Err(AppError::BadRequest(
                "Event points must not be negative".to_string(),
            ));
        }

        if self.end_date < self.start_date {
            return Err(AppError::BadRequest(
                "Event end date must not be before its start date".to_string(),
            ));
        }

        if matches!(self.capacity, Some(capacity) if capacity < 1) {
            return Err(AppError::BadRequest(
                "Event capacity must be at least 1".to_string(),
            ));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn dto() -> CreateEventDto {
        let start_date = Utc::now();
        CreateEventDto {
            title: " Olympiad ".to_string(),
            description: None,
            event_type: "competition".to_string(),
            points: 20,
            start_date,
            end_date: start_date + Duration::hours(3),
            capacity: Some(10),
            image: None,
            is_active: true,
        }
    }

    #[test]
    fn trims_title() {
        let param = SaveEventParam::from_create_dto(dto()).unwrap();

        assert_eq!(param.title, "Olympiad");
    }

    #[test]
    fn rejects_invalid_fields() {
        let mut negative = dto();
        negative.points = -1;
        assert!(SaveEventParam::from_create_dto(negative).is_err());

        let mut reversed = dto();
        reversed.end_date = reversed.start_date - Duration::minutes(1);
        assert!(SaveEventParam::from_create_dto(reversed).is_err());

        let mut zero_capacity = dto();
        zero_capacity.capacity = Some(0);
        assert!(SaveEventParam::from_create_dto(zero_capacity).is_err());

        let mut untitled = dto();
        untitled.title = "   ".to_string();
        assert!(SaveEventParam::from_create_dto(untitled).is_err());
    }
}
