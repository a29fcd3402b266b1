//! Achievement factory for creating test achievement entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::achievement::AchievementCondition;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test achievements.
///
/// # Example
///
/// ```rust,ignore
/// let achievement = AchievementFactory::new(&db)
///     .events_count(3)
///     .reward(5)
///     .build()
///     .await?;
/// ```
pub struct AchievementFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    condition_type: AchievementCondition,
    condition_value: i32,
    points_reward: i32,
    is_active: bool,
}

impl<'a> AchievementFactory<'a> {
    /// Creates a new AchievementFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Achievement {id}"`
    /// - condition: 100 points
    /// - reward: 0 points, active
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Achievement {}", id),
            condition_type: AchievementCondition::Points,
            condition_value: 100,
            points_reward: 0,
            is_active: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Requires the given point balance.
    pub fn points_threshold(mut self, value: i32) -> Self {
        self.condition_type = AchievementCondition::Points;
        self.condition_value = value;
        self
    }

    /// Requires the given number of confirmed events.
    pub fn events_count(mut self, value: i32) -> Self {
        self.condition_type = AchievementCondition::EventsCount;
        self.condition_value = value;
        self
    }

    /// Makes the achievement assignable by an admin only.
    pub fn manual(mut self) -> Self {
        self.condition_type = AchievementCondition::Manual;
        self.condition_value = 0;
        self
    }

    pub fn reward(mut self, points_reward: i32) -> Self {
        self.points_reward = points_reward;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the achievement into the database.
    pub async fn build(self) -> Result<entity::achievement::Model, DbErr> {
        entity::achievement::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            icon: ActiveValue::Set(None),
            condition_type: ActiveValue::Set(self.condition_type),
            condition_value: ActiveValue::Set(self.condition_value),
            points_reward: ActiveValue::Set(self.points_reward),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a points-threshold achievement with the given threshold.
pub async fn create_achievement(
    db: &DatabaseConnection,
    points_threshold: i32,
) -> Result<entity::achievement::Model, DbErr> {
    AchievementFactory::new(db)
        .points_threshold(points_threshold)
        .build()
        .await
}
