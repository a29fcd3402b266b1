//! Event factory for creating test event entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test events with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let event = EventFactory::new(&db)
///     .title("Science fair")
///     .points(50)
///     .capacity(Some(30))
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    event_type: String,
    points: i32,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    capacity: Option<i32>,
    is_active: bool,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Event {id}"`
    /// - event_type: `"general"`
    /// - points: 10
    /// - starts in one day, lasts two hours
    /// - unlimited capacity, active
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let start_date = Utc::now() + Duration::days(1);
        Self {
            db,
            title: format!("Event {}", id),
            event_type: "general".to_string(),
            points: 10,
            start_date,
            end_date: start_date + Duration::hours(2),
            capacity: None,
            is_active: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    pub fn capacity(mut self, capacity: Option<i32>) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the event window.
    pub fn dates(mut self, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Builds and inserts the event entity into the database.
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        let now = Utc::now();
        entity::event::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(Some("Test event description".to_string())),
            event_type: ActiveValue::Set(self.event_type),
            points: ActiveValue::Set(self.points),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            capacity: ActiveValue::Set(self.capacity),
            image: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an event with default values.
pub async fn create_event(db: &DatabaseConnection) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db).build().await
}

/// Creates an event worth the given number of points.
pub async fn create_event_with_points(
    db: &DatabaseConnection,
    points: i32,
) -> Result<entity::event::Model, DbErr> {
    EventFactory::new(db).points(points).build().await
}
