//! SeaORM Entity for achievements table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "achievements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub icon: Option<String>,
    pub condition_type: AchievementCondition,
    pub condition_value: i32,
    pub points_reward: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AchievementCondition {
    #[sea_orm(string_value = "points")]
    Points,
    #[sea_orm(string_value = "events_count")]
    EventsCount,
    #[sea_orm(string_value = "manual")]
    Manual,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_achievement::Entity")]
    UserAchievement,
}

impl Related<super::user_achievement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAchievement.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_achievement::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_achievement::Relation::Achievement.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
