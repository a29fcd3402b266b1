use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct RegisterDto {
    pub login: String,
    pub password: String,
    pub name: String,
    pub class_grade: Option<i32>,
    pub class_letter: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct LoginDto {
    pub login: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: UserDto,
}
