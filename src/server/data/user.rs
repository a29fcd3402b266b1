//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles account creation, lookups, profile updates, point balance changes and the
//! leaderboard, converting between entity models and domain models at the infrastructure
//! boundary.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::user::{CreateUserParam, Role, UpdateUserParam, User, UserQuery};

/// Repository providing database operations for user management.
///
/// Generic over the connection so the same queries run against the pool or inside a
/// transaction.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user with a zero point balance.
    ///
    /// # Arguments
    /// - `param` - Account fields with an already-hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation for a taken login
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            login: ActiveValue::Set(param.login),
            password_hash: ActiveValue::Set(param.password_hash),
            name: ActiveValue::Set(param.name),
            class_grade: ActiveValue::Set(param.class_grade),
            class_letter: ActiveValue::Set(param.class_letter),
            role: ActiveValue::Set(param.role.into_entity()),
            points: ActiveValue::Set(0),
            avatar: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            last_login_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by exact login.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Login.eq(login))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used during startup to decide whether a bootstrap admin must be created.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(entity::user::UserRole::Admin))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets users matching the query with pagination.
    ///
    /// Users are ordered alphabetically by name, then login. The search term matches a
    /// substring of either login or name.
    ///
    /// # Arguments
    /// - `query` - Optional search term and role filter plus zero-indexed page settings
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total matching user count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(&self, query: &UserQuery) -> Result<(Vec<User>, u64), DbErr> {
        let mut select = entity::prelude::User::find();

        if let Some(search) = query.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                select = select.filter(
                    Condition::any()
                        .add(entity::user::Column::Login.contains(search))
                        .add(entity::user::Column::Name.contains(search)),
                );
            }
        }

        if let Some(role) = query.role {
            select = select.filter(entity::user::Column::Role.eq(role.into_entity()));
        }

        let paginator = select
            .order_by_asc(entity::user::Column::Name)
            .order_by_asc(entity::user::Column::Login)
            .paginate(self.db, query.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(query.page).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok((users, total))
    }

    /// Applies a partial update to a user.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error, including a unique violation for a taken login
    pub async fn update(&self, id: i32, param: UpdateUserParam) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(login) = param.login {
            active.login = ActiveValue::Set(login);
        }
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(class_grade) = param.class_grade {
            active.class_grade = ActiveValue::Set(class_grade);
        }
        if let Some(class_letter) = param.class_letter {
            active.class_letter = ActiveValue::Set(class_letter);
        }
        if let Some(role) = param.role {
            active.role = ActiveValue::Set(role.into_entity());
        }
        if let Some(avatar) = param.avatar {
            active.avatar = ActiveValue::Set(avatar);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    /// Replaces a user's password hash.
    ///
    /// # Returns
    /// - `Ok(true)` - Password updated
    /// - `Ok(false)` - No user with that ID
    pub async fn update_password(&self, id: i32, password_hash: String) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .set(entity::user::ActiveModel {
                password_hash: ActiveValue::Set(password_hash),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Records a successful login.
    pub async fn touch_last_login(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .set(entity::user::ActiveModel {
                last_login_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a user. Participations, achievements, orders and notifications cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that ID
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Adds a signed amount to a user's point balance in a single statement.
    ///
    /// The increment is computed by the database so concurrent adjustments never overwrite
    /// each other. The update only applies while the new balance still fits in an `i32`.
    ///
    /// # Returns
    /// - `Ok(true)` - Balance updated
    /// - `Ok(false)` - No user with that ID, or the balance would leave the `i32` range
    pub async fn add_points(&self, id: i32, delta: i32) -> Result<bool, DbErr> {
        let fits = if delta >= 0 {
            entity::user::Column::Points.lte(i32::MAX - delta)
        } else {
            entity::user::Column::Points.gte(i32::MIN - delta)
        };

        let result = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::Points,
                Expr::col(entity::user::Column::Points).add(delta),
            )
            .filter(entity::user::Column::Id.eq(id))
            .filter(fits)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deducts points only if the balance covers the amount.
    ///
    /// # Returns
    /// - `Ok(true)` - Points deducted
    /// - `Ok(false)` - Balance too low or no user with that ID
    pub async fn deduct_points(&self, id: i32, amount: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::Points,
                Expr::col(entity::user::Column::Points).sub(amount),
            )
            .filter(entity::user::Column::Id.eq(id))
            .filter(entity::user::Column::Points.gte(amount))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the students with the highest point balances.
    ///
    /// Ties are broken by name so the ordering is stable between requests.
    pub async fn leaderboard(&self, limit: u64) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(Role::Student.into_entity()))
            .order_by_desc(entity::user::Column::Points)
            .order_by_asc(entity::user::Column::Name)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }
}
