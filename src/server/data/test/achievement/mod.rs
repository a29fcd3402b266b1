use crate::server::{
    data::achievement::{AchievementRepository, UserAchievementRepository},
    model::achievement::{AchievementCondition, SaveAchievementParam},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr};
use test_utils::{builder::TestBuilder, factory};

mod award;
mod crud;
