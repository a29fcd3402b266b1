use crate::server::error::AppError;
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

mod achievement;
mod event;
mod order;

async fn balance(db: &DatabaseConnection, user_id: i32) -> i32 {
    crate::server::data::user::UserRepository::new(db)
        .find_by_id(user_id)
        .await
        .unwrap()
        .unwrap()
        .points
}

async fn notification_kinds(
    db: &DatabaseConnection,
    user_id: i32,
) -> Vec<crate::server::model::notification::NotificationKind> {
    let (notifications, _) = crate::server::data::notification::NotificationRepository::new(db)
        .get_paginated(&crate::server::model::notification::NotificationQuery {
            user_id,
            unread_only: false,
            page: 0,
            per_page: 100,
        })
        .await
        .unwrap();

    notifications.into_iter().map(|n| n.kind).collect()
}
