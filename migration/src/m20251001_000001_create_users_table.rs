use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_uniq(Users::Login))
                    .col(string(Users::PasswordHash))
                    .col(string(Users::Name))
                    .col(integer_null(Users::ClassGrade))
                    .col(string_len_null(Users::ClassLetter, 4))
                    .col(string_len(Users::Role, 16).default("student"))
                    .col(integer(Users::Points).default(0))
                    .col(string_null(Users::Avatar))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Users::LastLoginAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Login,
    PasswordHash,
    Name,
    ClassGrade,
    ClassLetter,
    Role,
    Points,
    Avatar,
    CreatedAt,
    UpdatedAt,
    LastLoginAt,
}
