//! Achievement domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::achievement::{
        AchievementConditionDto, AchievementDto, EarnedAchievementDto, SaveAchievementDto,
    },
    server::error::AppError,
};

/// What a user must reach for an achievement to be awarded automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCondition {
    /// Point balance at or above the threshold.
    Points,
    /// Confirmed event attendances at or above the threshold.
    EventsCount,
    /// Awarded by an admin only, never automatically.
    Manual,
}

impl AchievementCondition {
    pub fn from_entity(condition: entity::achievement::AchievementCondition) -> Self {
        use entity::achievement::AchievementCondition as Condition;

        match condition {
            Condition::Points => Self::Points,
            Condition::EventsCount => Self::EventsCount,
            Condition::Manual => Self::Manual,
        }
    }

    pub fn into_entity(self) -> entity::achievement::AchievementCondition {
        use entity::achievement::AchievementCondition as Condition;

        match self {
            Self::Points => Condition::Points,
            Self::EventsCount => Condition::EventsCount,
            Self::Manual => Condition::Manual,
        }
    }

    pub fn from_dto(condition: AchievementConditionDto) -> Self {
        match condition {
            AchievementConditionDto::Points => Self::Points,
            AchievementConditionDto::EventsCount => Self::EventsCount,
            AchievementConditionDto::Manual => Self::Manual,
        }
    }

    pub fn into_dto(self) -> AchievementConditionDto {
        match self {
            Self::Points => AchievementConditionDto::Points,
            Self::EventsCount => AchievementConditionDto::EventsCount,
            Self::Manual => AchievementConditionDto::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub condition: AchievementCondition,
    pub condition_value: i32,
    /// Points credited to the user when the achievement is earned.
    pub points_reward: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Achievement {
    pub fn from_entity(entity: entity::achievement::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            icon: entity.icon,
            condition: AchievementCondition::from_entity(entity.condition_type),
            condition_value: entity.condition_value,
            points_reward: entity.points_reward,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> AchievementDto {
        AchievementDto {
            id: self.id,
            title: self.title,
            description: self.description,
            icon: self.icon,
            condition_type: self.condition.into_dto(),
            condition_value: self.condition_value,
            points_reward: self.points_reward,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }

    /// Whether a user with the given aggregates qualifies for automatic award.
    ///
    /// Inactive and manual achievements never qualify.
    pub fn is_satisfied_by(&self, progress: &UserProgress) -> bool {
        if !self.is_active {
            return false;
        }

        match self.condition {
            AchievementCondition::Points => progress.points >= self.condition_value as i64,
            AchievementCondition::EventsCount => {
                progress.confirmed_events >= self.condition_value as i64
            }
            AchievementCondition::Manual => false,
        }
    }
}

/// Aggregates an achievement condition is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserProgress {
    pub points: i64,
    pub confirmed_events: i64,
}

/// Validated fields for creating or replacing an achievement.
#[derive(Debug, Clone)]
pub struct SaveAchievementParam {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub condition: AchievementCondition,
    pub condition_value: i32,
    pub points_reward: i32,
    pub is_active: bool,
}

impl SaveAchievementParam {
    pub fn from_dto(dto: SaveAchievementDto) -> Result<Self, AppError> {
        let title = dto.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::BadRequest(
                "Achievement title is required".to_string(),
            ));
        }
        if dto.condition_value < 0 {
            return Err(AppError::BadRequest(
                "Condition value must not be negative".to_string(),
            ));
        }
        if dto.points_reward < 0 {
            return Err(AppError::BadRequest(
                "Points reward must not be negative".to_string(),
            ));
        }

        Ok(Self {
            title,
            description: dto.description,
            icon: dto.icon,
            condition: AchievementCondition::from_dto(dto.condition_type),
            condition_value: dto.condition_value,
            points_reward: dto.points_reward,
            is_active: dto.is_active,
        })
    }
}

/// Achievement owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct EarnedAchievement {
    pub achievement: Achievement,
    pub earned_at: DateTime<Utc>,
    /// Admin who assigned it manually, `None` for automatic awards.
    pub awarded_by: Option<i32>,
}

impl EarnedAchievement {
    pub fn into_dto(self) -> EarnedAchievementDto {
        EarnedAchievementDto {
            achievement: self.achievement.into_dto(),
            earned_at: self.earned_at,
            awarded_by: self.awarded_by,
        }
    }
}
