//! Achievement management, manual awards and automatic evaluation.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        achievement::{AchievementRepository, UserAchievementRepository},
        notification::NotificationRepository,
        participant::ParticipantRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        achievement::{Achievement, SaveAchievementParam, UserProgress},
        notification::{NewNotification, NotificationKind},
    },
    service::change_points,
};

pub struct AchievementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AchievementService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Achievement>, AppError> {
        Ok(AchievementRepository::new(self.db)
            .list(include_inactive)
            .await?)
    }

    /// Gets an achievement. Inactive ones are only visible when `include_inactive` is set.
    pub async fn get(&self, id: i32, include_inactive: bool) -> Result<Achievement, AppError> {
        AchievementRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|achievement| include_inactive || achievement.is_active)
            .ok_or_else(|| AppError::NotFound("Achievement not found".to_string()))
    }

    pub async fn create(&self, param: SaveAchievementParam) -> Result<Achievement, AppError> {
        let achievement = AchievementRepository::new(self.db).create(param).await?;

        tracing::info!(
            "Created achievement {} ({})",
            achievement.title,
            achievement.id
        );

        Ok(achievement)
    }

    pub async fn update(
        &self,
        id: i32,
        param: SaveAchievementParam,
    ) -> Result<Achievement, AppError> {
        AchievementRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Achievement not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !AchievementRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Achievement not found".to_string()));
        }

        Ok(())
    }

    /// Manually awards an achievement to a user.
    ///
    /// The reward is credited and the user notified in one transaction, after which automatic
    /// evaluation runs since the reward may unlock further achievements.
    ///
    /// # Returns
    /// - `Ok(())` - Achievement awarded
    /// - `Err(AppError::NotFound)` - Achievement or user does not exist
    /// - `Err(AppError::Conflict)` - User already owns the achievement
    pub async fn assign(
        &self,
        achievement_id: i32,
        user_id: i32,
        admin_id: i32,
    ) -> Result<(), AppError> {
        let achievement = self.get(achievement_id, true).await?;
        if UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let txn = self.db.begin().await?;

        if !UserAchievementRepository::new(&txn)
            .award(user_id, achievement.id, Some(admin_id))
            .await?
        {
            return Err(AppError::Conflict(
                "User already has this achievement".to_string(),
            ));
        }
        credit_reward(&txn, user_id, &achievement).await?;

        txn.commit().await?;

        tracing::info!(
            "Admin {} awarded achievement {} to user {}",
            admin_id,
            achievement.id,
            user_id
        );

        self.evaluate_or_log(user_id).await;

        Ok(())
    }

    /// Removes an achievement from a user. Points already credited are kept.
    pub async fn revoke(&self, achievement_id: i32, user_id: i32) -> Result<(), AppError> {
        if !UserAchievementRepository::new(self.db)
            .revoke(user_id, achievement_id)
            .await?
        {
            return Err(AppError::NotFound(
                "User does not have this achievement".to_string(),
            ));
        }

        tracing::info!(
            "Revoked achievement {} from user {}",
            achievement_id,
            user_id
        );

        Ok(())
    }

    /// Evaluates achievements after a balance change has been committed.
    ///
    /// The committed change stands regardless of the outcome, so a failure is logged rather
    /// than reported to the caller.
    pub async fn evaluate_or_log(&self, user_id: i32) {
        if let Err(e) = self.evaluate(user_id).await {
            tracing::error!("Achievement evaluation for user {} failed: {}", user_id, e);
        }
    }

    /// Awards every automatic achievement the user now qualifies for.
    ///
    /// Rewards raise the balance, which can satisfy further point thresholds, so passes repeat
    /// until one awards nothing. Each pass awards at least one achievement the user did not
    /// own, which bounds the loop by the number of achievements. Awarding is idempotent, so
    /// running evaluation again changes nothing.
    ///
    /// # Returns
    /// - `Ok(Vec<Achievement>)` - Achievements newly awarded by this call
    pub async fn evaluate(&self, user_id: i32) -> Result<Vec<Achievement>, AppError> {
        let achievements = AchievementRepository::new(self.db).list(false).await?;
        let mut awarded = Vec::new();

        for _ in 0..=achievements.len() {
            let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
                return Ok(awarded);
            };
            let progress = UserProgress {
                points: user.points as i64,
                confirmed_events: ParticipantRepository::new(self.db)
                    .count_confirmed_by_user(user_id)
                    .await? as i64,
            };
            let owned = UserAchievementRepository::new(self.db)
                .earned_ids(user_id)
                .await?;

            let due: Vec<&Achievement> = achievements
                .iter()
                .filter(|a| !owned.contains(&a.id) && a.is_satisfied_by(&progress))
                .collect();
            if due.is_empty() {
                break;
            }

            for achievement in due {
                let txn = self.db.begin().await?;
                let inserted = UserAchievementRepository::new(&txn)
                    .award(user_id, achievement.id, None)
                    .await?;
                if inserted {
                    credit_reward(&txn, user_id, achievement).await?;
                }
                txn.commit().await?;

                if inserted {
                    tracing::info!("User {} earned achievement {}", user_id, achievement.id);
                    awarded.push(achievement.clone());
                }
            }
        }

        Ok(awarded)
    }
}

/// Adds an achievement's reward to the balance and notifies the user.
async fn credit_reward<C: sea_orm::ConnectionTrait>(
    db: &C,
    user_id: i32,
    achievement: &Achievement,
) -> Result<(), AppError> {
    if achievement.points_reward > 0 {
        change_points(db, user_id, achievement.points_reward).await?;
    }

    let message = if achievement.points_reward > 0 {
        format!(
            "You earned \"{}\" and received {} points",
            achievement.title, achievement.points_reward
        )
    } else {
        format!("You earned \"{}\"", achievement.title)
    };

    NotificationRepository::new(db)
        .create(NewNotification {
            user_id,
            kind: NotificationKind::AchievementEarned,
            title: "New achievement".to_string(),
            message,
            related_id: Some(achievement.id),
        })
        .await?;

    Ok(())
}
