use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000001_create_users_table::Users, m20251001_000002_create_events_table::Events,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventParticipants::Table)
                    .if_not_exists()
                    .col(integer(EventParticipants::EventId))
                    .col(integer(EventParticipants::UserId))
                    .col(string_len(EventParticipants::Status, 16).default("registered"))
                    .col(integer(EventParticipants::PointsAwarded).default(0))
                    .col(
                        timestamp_with_time_zone(EventParticipants::RegisteredAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(
                        EventParticipants::ConfirmedAt,
                    ))
                    .primary_key(
                        Index::create()
                            .col(EventParticipants::EventId)
                            .col(EventParticipants::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_participants_event_id")
                            .from(EventParticipants::Table, EventParticipants::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_participants_user_id")
                            .from(EventParticipants::Table, EventParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventParticipants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EventParticipants {
    Table,
    EventId,
    UserId,
    Status,
    PointsAwarded,
    RegisteredAt,
    ConfirmedAt,
}
