//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::user::UserRole;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Placeholder stored when a test never logs the user in.
const UNUSABLE_PASSWORD_HASH: &str = "!";

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .login("ivanov")
///     .name("Ivan Ivanov")
///     .class(10, "A")
///     .points(120)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    login: String,
    password_hash: String,
    name: String,
    class_grade: Option<i32>,
    class_letter: Option<String>,
    role: UserRole,
    points: i32,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - login: `"user_{id}"` where id is auto-incremented
    /// - name: `"User {id}"`
    /// - class: none
    /// - role: student
    /// - points: 0
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            login: format!("user_{}", id),
            password_hash: UNUSABLE_PASSWORD_HASH.to_string(),
            name: format!("User {}", id),
            class_grade: None,
            class_letter: None,
            role: UserRole::Student,
            points: 0,
        }
    }

    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }

    /// Sets a pre-computed password hash, for tests that exercise login.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn class(mut self, grade: i32, letter: impl Into<String>) -> Self {
        self.class_grade = Some(grade);
        self.class_letter = Some(letter.into());
        self
    }

    /// Makes the user an administrator.
    pub fn admin(mut self) -> Self {
        self.role = UserRole::Admin;
        self
    }

    pub fn points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            login: ActiveValue::Set(self.login),
            password_hash: ActiveValue::Set(self.password_hash),
            name: ActiveValue::Set(self.name),
            class_grade: ActiveValue::Set(self.class_grade),
            class_letter: ActiveValue::Set(self.class_letter),
            role: ActiveValue::Set(self.role),
            points: ActiveValue::Set(self.points),
            avatar: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            last_login_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a student with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates an administrator with default values.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).admin().build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(!user.login.is_empty());
        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.points, 0);

        Ok(())
    }

    #[tokio::test]
    async fn creates_user_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = UserFactory::new(db)
            .login("petrova")
            .name("Anna Petrova")
            .class(9, "B")
            .points(40)
            .admin()
            .build()
            .await?;

        assert_eq!(user.login, "petrova");
        assert_eq!(user.class_grade, Some(9));
        assert_eq!(user.class_letter.as_deref(), Some("B"));
        assert_eq!(user.points, 40);
        assert_eq!(user.role, UserRole::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user1 = create_user(db).await?;
        let user2 = create_user(db).await?;

        assert_ne!(user1.id, user2.id);
        assert_ne!(user1.login, user2.login);

        Ok(())
    }
}
