//! User domain models and parameters.
//!
//! Provides the domain model for accounts (students and administrators) together with the
//! parameter types used by registration, profile editing and admin user management.

use chrono::{DateTime, Utc};

use crate::model::user::{LeaderboardEntryDto, PaginatedUsersDto, RoleDto, UserDto};

/// Account role controlling access to admin endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    pub fn from_entity(role: entity::user::UserRole) -> Self {
        match role {
            entity::user::UserRole::Student => Role::Student,
            entity::user::UserRole::Admin => Role::Admin,
        }
    }

    pub fn into_entity(self) -> entity::user::UserRole {
        match self {
            Role::Student => entity::user::UserRole::Student,
            Role::Admin => entity::user::UserRole::Admin,
        }
    }

    pub fn from_dto(role: RoleDto) -> Self {
        match role {
            RoleDto::Student => Role::Student,
            RoleDto::Admin => Role::Admin,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        match self {
            Role::Student => RoleDto::Student,
            Role::Admin => RoleDto::Admin,
        }
    }
}

/// Account with identity, class, role and point balance.
///
/// The password hash is carried so authentication can verify credentials, but it never
/// leaves the server: `into_dto` drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    pub role: Role,
    /// Current point balance. May be negative after an attendance reversal.
    pub points: i32,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            login: self.login,
            name: self.name,
            class_grade: self.class_grade,
            class_letter: self.class_letter,
            role: self.role.into_dto(),
            points: self.points,
            avatar: self.avatar,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            login: entity.login,
            password_hash: entity.password_hash,
            name: entity.name,
            class_grade: entity.class_grade,
            class_letter: entity.class_letter,
            role: Role::from_entity(entity.role),
            points: entity.points,
            avatar: entity.avatar,
            created_at: entity.created_at,
            last_login_at: entity.last_login_at,
        }
    }
}

/// Parameters for inserting a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub login: String,
    pub password_hash: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    pub role: Role,
}

/// Parameters for a partial user update.
///
/// `None` leaves a field unchanged. Class and avatar use a nested `Option` where the outer
/// level means "change this field" and the inner value may clear it.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParam {
    pub login: Option<String>,
    pub name: Option<String>,
    pub class_grade: Option<Option<i32>>,
    pub class_letter: Option<Option<String>>,
    pub role: Option<Role>,
    pub avatar: Option<Option<String>>,
}

/// Filters for the admin user list.
#[derive(Debug, Clone)]
pub struct UserQuery {
    /// Case-insensitive substring matched against login and name.
    pub search: Option<String>,
    pub role: Option<Role>,
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    /// Users for this page.
    pub users: Vec<User>,
    /// Total number of matching users across all pages.
    pub total: u64,
    /// Current page number (zero-indexed).
    pub page: u64,
    /// Number of users per page.
    pub per_page: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Position of a student on the points leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// One-based rank in the returned ordering.
    pub rank: u64,
    pub user: User,
}

impl LeaderboardEntry {
    pub fn into_dto(self) -> LeaderboardEntryDto {
        LeaderboardEntryDto {
            rank: self.rank,
            id: self.user.id,
            name: self.user.name,
            class_grade: self.user.class_grade,
            class_letter: self.user.class_letter,
            avatar: self.user.avatar,
            points: self.user.points,
        }
    }
}
