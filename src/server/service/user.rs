//! Profile self-service, the leaderboard and admin user management.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        achievement::UserAchievementRepository, event::EventRepository,
        notification::NotificationRepository, participant::ParticipantRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        achievement::EarnedAchievement,
        notification::{NewNotification, NotificationKind},
        participation::MyEvent,
        total_pages,
        user::{
            CreateUserParam, LeaderboardEntry, PaginatedUsers, Role, UpdateUserParam, User,
            UserQuery,
        },
    },
    service::{achievement::AchievementService, change_points},
    util::{password, validation},
};

pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;
pub const MAX_LEADERBOARD_LIMIT: u64 = 100;

/// Fields an admin may change on a user; absent fields stay as they are.
#[derive(Debug, Clone, Default)]
pub struct AdminUpdateUserParam {
    pub login: Option<String>,
    pub name: Option<String>,
    pub class_grade: Option<i32>,
    /// An empty string clears the letter.
    pub class_letter: Option<String>,
    pub role: Option<Role>,
    /// An empty string clears the avatar.
    pub avatar: Option<String>,
}

/// Fields for an admin-created account.
#[derive(Debug, Clone)]
pub struct AdminCreateUserParam {
    pub login: String,
    pub password: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    pub role: Role,
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Updates the caller's own display name and avatar.
    pub async fn update_profile(
        &self,
        id: i32,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Result<User, AppError> {
        let param = UpdateUserParam {
            name: name.as_deref().map(validation::normalize_name).transpose()?,
            avatar: avatar.map(non_empty),
            ..Default::default()
        };

        UserRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Changes the caller's password after checking the current one.
    pub async fn change_password(
        &self,
        id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get(id).await?;
        if !password::verify(current_password, &user.password_hash) {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }
        validation::validate_password(new_password)?;

        UserRepository::new(self.db)
            .update_password(id, password::hash(new_password)?)
            .await?;

        Ok(())
    }

    pub async fn achievements(&self, id: i32) -> Result<Vec<EarnedAchievement>, AppError> {
        Ok(UserAchievementRepository::new(self.db)
            .get_by_user(id)
            .await?)
    }

    /// Lists the caller's participations with each event's current participant count.
    pub async fn events(&self, id: i32) -> Result<Vec<MyEvent>, AppError> {
        let rows = ParticipantRepository::new(self.db).get_by_user(id).await?;
        let event_ids: Vec<i32> = rows.iter().map(|(_, event)| event.id).collect();
        let counts = EventRepository::new(self.db)
            .participant_counts(&event_ids)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(participation, event)| MyEvent {
                participant_count: counts.get(&event.id).copied().unwrap_or(0),
                participation,
                event,
            })
            .collect())
    }

    /// Ranks students by points. `limit` defaults to 10 and is clamped to 1..=100.
    pub async fn leaderboard(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT);

        let users = UserRepository::new(self.db).leaderboard(limit).await?;

        Ok(users
            .into_iter()
            .enumerate()
            .map(|(index, user)| LeaderboardEntry {
                rank: index as u64 + 1,
                user,
            })
            .collect())
    }

    pub async fn get_paginated(&self, query: UserQuery) -> Result<PaginatedUsers, AppError> {
        let (users, total) = UserRepository::new(self.db).get_paginated(&query).await?;

        Ok(PaginatedUsers {
            users,
            total,
            page: query.page,
            per_page: query.per_page,
            total_pages: total_pages(total, query.per_page),
        })
    }

    pub async fn create(&self, param: AdminCreateUserParam) -> Result<User, AppError> {
        let login = param.login.trim().to_string();
        validation::validate_login(&login)?;
        validation::validate_password(&param.password)?;
        let name = validation::normalize_name(&param.name)?;
        let (class_grade, class_letter) =
            validation::normalize_class(param.class_grade, param.class_letter)?;

        let repo = UserRepository::new(self.db);
        if repo.find_by_login(&login).await?.is_some() {
            return Err(AppError::Conflict("Login is already taken".to_string()));
        }

        let user = repo
            .create(CreateUserParam {
                login,
                password_hash: password::hash(&param.password)?,
                name,
                class_grade,
                class_letter,
                role: param.role,
            })
            .await?;

        tracing::info!("Created {} account {}", user.role.as_str(), user.login);

        Ok(user)
    }

    /// Applies an admin edit to a user.
    ///
    /// Changing either class field revalidates the class as a whole, filling the other part
    /// from the stored value.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Invalid field, or an admin demoting themselves
    /// - `Err(AppError::NotFound)` - User does not exist
    /// - `Err(AppError::Conflict)` - New login already taken
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        param: AdminUpdateUserParam,
    ) -> Result<User, AppError> {
        let user = self.get(id).await?;

        if actor_id == id && param.role == Some(Role::Student) {
            return Err(AppError::BadRequest(
                "You cannot remove your own admin role".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db);

        let login = match param.login {
            Some(login) => {
                let login = login.trim().to_string();
                validation::validate_login(&login)?;
                if login != user.login && repo.find_by_login(&login).await?.is_some() {
                    return Err(AppError::Conflict("Login is already taken".to_string()));
                }
                Some(login)
            }
            None => None,
        };

        let (class_grade, class_letter) =
            if param.class_grade.is_some() || param.class_letter.is_some() {
                let (grade, letter) = validation::normalize_class(
                    param.class_grade.or(user.class_grade),
                    param.class_letter.or(user.class_letter),
                )?;
                (Some(grade), Some(letter))
            } else {
                (None, None)
            };

        let update = UpdateUserParam {
            login,
            name: param
                .name
                .as_deref()
                .map(validation::normalize_name)
                .transpose()?,
            class_grade,
            class_letter,
            role: param.role,
            avatar: param.avatar.map(non_empty),
        };

        repo.update(id, update)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn delete(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        if !UserRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("Admin {} deleted user {}", actor_id, id);

        Ok(())
    }

    /// Sets a new password, generating one when none is given.
    ///
    /// # Returns
    /// - `Ok(String)` - The password now in effect, to hand to the user
    pub async fn reset_password(
        &self,
        id: i32,
        new_password: Option<String>,
    ) -> Result<String, AppError> {
        let new_password = match new_password {
            Some(new_password) => {
                validation::validate_password(&new_password)?;
                new_password
            }
            None => password::generate(),
        };

        if !UserRepository::new(self.db)
            .update_password(id, password::hash(&new_password)?)
            .await?
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("Password reset for user {}", id);

        Ok(new_password)
    }

    /// Adds a signed number of points to a user and notifies them.
    ///
    /// Negative deltas may take the balance below zero. Achievement evaluation runs afterwards.
    ///
    /// # Returns
    /// - `Ok(User)` - User with the new balance
    /// - `Err(AppError::NotFound)` - User does not exist
    /// - `Err(AppError::BadRequest)` - Empty reason, or the balance would leave the `i32` range
    pub async fn adjust_points(
        &self,
        id: i32,
        delta: i32,
        reason: &str,
    ) -> Result<User, AppError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::BadRequest("Reason is required".to_string()));
        }

        self.get(id).await?;

        let txn = self.db.begin().await?;

        change_points(&txn, id, delta).await?;

        let message = if delta >= 0 {
            format!("You received {} points: {}", delta, reason)
        } else {
            format!("{} points were deducted: {}", delta.unsigned_abs(), reason)
        };
        NotificationRepository::new(&txn)
            .create(NewNotification {
                user_id: id,
                kind: NotificationKind::PointsAdjusted,
                title: "Points balance changed".to_string(),
                message,
                related_id: None,
            })
            .await?;

        txn.commit().await?;

        tracing::info!("Adjusted points of user {} by {}: {}", id, delta, reason);

        AchievementService::new(self.db).evaluate_or_log(id).await;

        self.get(id).await
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
