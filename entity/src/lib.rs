//! SeaORM entities for the meritboard schema.
//!
//! The schema itself is owned by the `migration` crate; these models mirror it column for column.

pub mod prelude;

pub mod achievement;
pub mod event;
pub mod event_participant;
pub mod notification;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;
pub mod user_achievement;
