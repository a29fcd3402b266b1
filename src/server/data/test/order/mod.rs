use crate::server::{
    data::order::{NewOrderItem, OrderRepository},
    model::shop::OrderStatus,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod transition;
