use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleDto {
    Student,
    Admin,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub login: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    pub role: RoleDto,
    pub points: i32,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct CreateUserDto {
    pub login: String,
    pub password: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    #[serde(default)]
    pub role: Option<RoleDto>,
}

/// Partial update, absent fields are left unchanged.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub login: Option<String>,
    pub name: Option<String>,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    pub role: Option<RoleDto>,
    pub avatar: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct AdjustPointsDto {
    /// Signed number of points to add, negative values deduct.
    pub delta: i32,
    pub reason: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct ResetPasswordDto {
    /// Password to set; a random one is generated when omitted.
    pub new_password: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ResetPasswordResponseDto {
    pub new_password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct LeaderboardEntryDto {
    pub rank: u64,
    pub id: i32,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
    pub avatar: Option<String>,
    pub points: i32,
}
