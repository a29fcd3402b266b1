use crate::server::{
    data::notification::NotificationRepository,
    model::notification::{NewNotification, NotificationKind, NotificationQuery},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_paginated;
mod ownership;

fn new_notification(user_id: i32, title: &str) -> NewNotification {
    NewNotification {
        user_id,
        kind: NotificationKind::PointsAdjusted,
        title: title.to_string(),
        message: "Balance changed".to_string(),
        related_id: None,
    }
}
