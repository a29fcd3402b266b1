//! SeaORM Entity for events table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub event_type: String,
    pub points: i32,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    #[sea_orm(nullable)]
    pub capacity: Option<i32>,
    #[sea_orm(nullable)]
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_participant::Entity")]
    EventParticipant,
}

impl Related<super::event_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventParticipant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
