//! Notification domain models.

use chrono::{DateTime, Utc};

use crate::model::notification::{
    NotificationDto, NotificationKindDto, PaginatedNotificationsDto,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    EventConfirmed,
    EventUnconfirmed,
    AchievementEarned,
    PointsAdjusted,
    OrderStatus,
}

impl NotificationKind {
    pub fn from_entity(kind: entity::notification::NotificationKind) -> Self {
        use entity::notification::NotificationKind as Kind;

        match kind {
            Kind::EventConfirmed => Self::EventConfirmed,
            Kind::EventUnconfirmed => Self::EventUnconfirmed,
            Kind::AchievementEarned => Self::AchievementEarned,
            Kind::PointsAdjusted => Self::PointsAdjusted,
            Kind::OrderStatus => Self::OrderStatus,
        }
    }

    pub fn into_entity(self) -> entity::notification::NotificationKind {
        use entity::notification::NotificationKind as Kind;

        match self {
            Self::EventConfirmed => Kind::EventConfirmed,
            Self::EventUnconfirmed => Kind::EventUnconfirmed,
            Self::AchievementEarned => Kind::AchievementEarned,
            Self::PointsAdjusted => Kind::PointsAdjusted,
            Self::OrderStatus => Kind::OrderStatus,
        }
    }

    pub fn into_dto(self) -> NotificationKindDto {
        match self {
            Self::EventConfirmed => NotificationKindDto::EventConfirmed,
            Self::EventUnconfirmed => NotificationKindDto::EventUnconfirmed,
            Self::AchievementEarned => NotificationKindDto::AchievementEarned,
            Self::PointsAdjusted => NotificationKindDto::PointsAdjusted,
            Self::OrderStatus => NotificationKindDto::OrderStatus,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// ID of the event, achievement or order the notification refers to.
    pub related_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: NotificationKind::from_entity(entity.kind),
            title: entity.title,
            message: entity.message,
            related_id: entity.related_id,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind.into_dto(),
            title: self.title,
            message: self.message,
            related_id: self.related_id,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}

/// Parameters for inserting a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NotificationQuery {
    pub user_id: i32,
    pub unread_only: bool,
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedNotifications {
    pub notifications: Vec<Notification>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedNotifications {
    pub fn into_dto(self) -> PaginatedNotificationsDto {
        PaginatedNotificationsDto {
            notifications: self
                .notifications
                .into_iter()
                .map(Notification::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
