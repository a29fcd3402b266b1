use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_auto(Events::Id))
                    .col(string(Events::Title))
                    .col(text_null(Events::Description))
                    .col(string(Events::EventType).default("general"))
                    .col(integer(Events::Points).default(0))
                    .col(timestamp_with_time_zone(Events::StartDate))
                    .col(timestamp_with_time_zone(Events::EndDate))
                    .col(integer_null(Events::Capacity))
                    .col(string_null(Events::Image))
                    .col(boolean(Events::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Events::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Events {
    Table,
    Id,
    Title,
    Description,
    EventType,
    Points,
    StartDate,
    EndDate,
    Capacity,
    Image,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
