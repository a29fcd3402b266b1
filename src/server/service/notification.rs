use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::{
        notification::{NotificationQuery, PaginatedNotifications},
        total_pages,
    },
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        query: NotificationQuery,
    ) -> Result<PaginatedNotifications, AppError> {
        let (notifications, total) = NotificationRepository::new(self.db)
            .get_paginated(&query)
            .await?;

        Ok(PaginatedNotifications {
            notifications,
            total,
            page: query.page,
            per_page: query.per_page,
            total_pages: total_pages(total, query.per_page),
        })
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_count(user_id)
            .await?)
    }

    /// Marks one of the user's notifications as read.
    ///
    /// A notification owned by someone else is reported as missing.
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .mark_read(id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }

    /// Marks all of the user's notifications as read, returning how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .delete(id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }
}
