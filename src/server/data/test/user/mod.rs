use crate::server::{
    data::user::UserRepository,
    model::user::{CreateUserParam, Role, UpdateUserParam, UserQuery},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod create;
mod get_paginated;
mod leaderboard;
mod points;
mod update;
