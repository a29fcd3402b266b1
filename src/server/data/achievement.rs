//! Achievement and earned-achievement repositories.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashSet;

use crate::server::model::achievement::{Achievement, EarnedAchievement, SaveAchievementParam};

pub struct AchievementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AchievementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: SaveAchievementParam) -> Result<Achievement, DbErr> {
        let entity = entity::achievement::ActiveModel {
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            icon: ActiveValue::Set(param.icon),
            condition_type: ActiveValue::Set(param.condition.into_entity()),
            condition_value: ActiveValue::Set(param.condition_value),
            points_reward: ActiveValue::Set(param.points_reward),
            is_active: ActiveValue::Set(param.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Achievement::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Achievement>, DbErr> {
        let entity = entity::prelude::Achievement::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Achievement::from_entity))
    }

    /// Lists achievements in creation order.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Achievement>, DbErr> {
        let mut select = entity::prelude::Achievement::find();
        if !include_inactive {
            select = select.filter(entity::achievement::Column::IsActive.eq(true));
        }

        let entities = select
            .order_by_asc(entity::achievement::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Achievement::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        param: SaveAchievementParam,
    ) -> Result<Option<Achievement>, DbErr> {
        let Some(entity) = entity::prelude::Achievement::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.title = ActiveValue::Set(param.title);
        active.description = ActiveValue::Set(param.description);
        active.icon = ActiveValue::Set(param.icon);
        active.condition_type = ActiveValue::Set(param.condition.into_entity());
        active.condition_value = ActiveValue::Set(param.condition_value);
        active.points_reward = ActiveValue::Set(param.points_reward);
        active.is_active = ActiveValue::Set(param.is_active);

        let entity = active.update(self.db).await?;

        Ok(Some(Achievement::from_entity(entity)))
    }

    /// Deletes an achievement. Earned rows cascade; points already rewarded are kept.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Achievement::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Repository for the user/achievement ownership pairs.
pub struct UserAchievementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserAchievementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records that a user owns an achievement.
    ///
    /// The pair is unique: awarding an owned achievement changes nothing and reports `false`.
    /// The check is left to the primary key, so two concurrent awards of the same pair insert
    /// exactly one row and neither fails.
    ///
    /// # Arguments
    /// - `user_id` - Recipient
    /// - `achievement_id` - Achievement being awarded
    /// - `awarded_by` - Admin ID for manual awards, `None` for automatic ones
    ///
    /// # Returns
    /// - `Ok(true)` - Pair inserted
    /// - `Ok(false)` - User already owned the achievement
    /// - `Err(DbErr)` - Database error
    pub async fn award(
        &self,
        user_id: i32,
        achievement_id: i32,
        awarded_by: Option<i32>,
    ) -> Result<bool, DbErr> {
        let inserted = entity::prelude::UserAchievement::insert(
            entity::user_achievement::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                achievement_id: ActiveValue::Set(achievement_id),
                earned_at: ActiveValue::Set(Utc::now()),
                awarded_by: ActiveValue::Set(awarded_by),
            },
        )
        .on_conflict(
            OnConflict::columns([
                entity::user_achievement::Column::UserId,
                entity::user_achievement::Column::AchievementId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(inserted > 0)
    }

    pub async fn exists(&self, user_id: i32, achievement_id: i32) -> Result<bool, DbErr> {
        let entity = entity::prelude::UserAchievement::find_by_id((user_id, achievement_id))
            .one(self.db)
            .await?;

        Ok(entity.is_some())
    }

    /// Removes an owned achievement.
    ///
    /// # Returns
    /// - `Ok(true)` - Pair removed
    /// - `Ok(false)` - User did not own the achievement
    pub async fn revoke(&self, user_id: i32, achievement_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::UserAchievement::delete_many()
            .filter(entity::user_achievement::Column::UserId.eq(user_id))
            .filter(entity::user_achievement::Column::AchievementId.eq(achievement_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// IDs of every achievement the user owns.
    pub async fn earned_ids(&self, user_id: i32) -> Result<HashSet<i32>, DbErr> {
        let ids: Vec<i32> = entity::prelude::UserAchievement::find()
            .select_only()
            .column(entity::user_achievement::Column::AchievementId)
            .filter(entity::user_achievement::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().collect())
    }

    /// Gets a user's achievements with their award details, most recent first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<EarnedAchievement>, DbErr> {
        let rows = entity::prelude::UserAchievement::find()
            .filter(entity::user_achievement::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::Achievement)
            .order_by_desc(entity::user_achievement::Column::EarnedAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(earned, achievement)| {
                achievement.map(|achievement| EarnedAchievement {
                    achievement: Achievement::from_entity(achievement),
                    earned_at: earned.earned_at,
                    awarded_by: earned.awarded_by,
                })
            })
            .collect())
    }
}
