//! Notification repository.
//!
//! All reads and mutations are scoped to the owning user; a notification belonging to someone
//! else behaves exactly like a missing one.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::notification::{NewNotification, Notification, NotificationQuery};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: NewNotification) -> Result<Notification, DbErr> {
        let entity = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            kind: ActiveValue::Set(param.kind.into_entity()),
            title: ActiveValue::Set(param.title),
            message: ActiveValue::Set(param.message),
            related_id: ActiveValue::Set(param.related_id),
            is_read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Notification::from_entity(entity))
    }

    /// Gets a page of a user's notifications, newest first.
    ///
    /// # Returns
    /// - `Ok((notifications, total))` - Notifications for the page and total matching count
    pub async fn get_paginated(
        &self,
        query: &NotificationQuery,
    ) -> Result<(Vec<Notification>, u64), DbErr> {
        let mut select = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(query.user_id));
        if query.unread_only {
            select = select.filter(entity::notification::Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, query.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(query.page).await?;

        Ok((
            entities.into_iter().map(Notification::from_entity).collect(),
            total,
        ))
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Returns
    /// - `Ok(true)` - Notification belongs to the user (already-read counts)
    /// - `Ok(false)` - Missing or owned by another user
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(entity::notification::ActiveModel {
                is_read: ActiveValue::Set(true),
                ..Default::default()
            })
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks all of a user's unread notifications as read, returning how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(entity::notification::ActiveModel {
                is_read: ActiveValue::Set(true),
                ..Default::default()
            })
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
