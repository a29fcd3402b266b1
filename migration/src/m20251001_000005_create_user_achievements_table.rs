use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20251001_000001_create_users_table::Users,
    m20251001_000004_create_achievements_table::Achievements,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAchievements::Table)
                    .if_not_exists()
                    .col(integer(UserAchievements::UserId))
                    .col(integer(UserAchievements::AchievementId))
                    .col(
                        timestamp_with_time_zone(UserAchievements::EarnedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(UserAchievements::AwardedBy))
                    .primary_key(
                        Index::create()
                            .col(UserAchievements::UserId)
                            .col(UserAchievements::AchievementId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievements_user_id")
                            .from(UserAchievements::Table, UserAchievements::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_achievements_achievement_id")
                            .from(UserAchievements::Table, UserAchievements::AchievementId)
                            .to(Achievements::Table, Achievements::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAchievements::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserAchievements {
    Table,
    UserId,
    AchievementId,
    EarnedAt,
    AwardedBy,
}
