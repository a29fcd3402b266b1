use crate::server::{data::product::ProductRepository, model::shop::SaveProductParam};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
mod stock;
