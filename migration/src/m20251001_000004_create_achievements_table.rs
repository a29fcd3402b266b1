use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Achievements::Table)
                    .if_not_exists()
                    .col(pk_auto(Achievements::Id))
                    .col(string(Achievements::Title))
                    .col(text_null(Achievements::Description))
                    .col(string_null(Achievements::Icon))
                    .col(string_len(Achievements::ConditionType, 16))
                    .col(integer(Achievements::ConditionValue).default(0))
                    .col(integer(Achievements::PointsReward).default(0))
                    .col(boolean(Achievements::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Achievements::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Achievements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Achievements {
    Table,
    Id,
    Title,
    Description,
    Icon,
    ConditionType,
    ConditionValue,
    PointsReward,
    IsActive,
    CreatedAt,
}
