use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AchievementConditionDto {
    Points,
    EventsCount,
    Manual,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AchievementDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub condition_type: AchievementConditionDto,
    pub condition_value: i32,
    pub points_reward: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SaveAchievementDto {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub condition_type: AchievementConditionDto,
    #[serde(default)]
    pub condition_value: i32,
    #[serde(default)]
    pub points_reward: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct EarnedAchievementDto {
    pub achievement: AchievementDto,
    pub earned_at: DateTime<Utc>,
    pub awarded_by: Option<i32>,
}
