//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! Every repository borrows any `ConnectionTrait`, so the same code serves plain requests
//! and multi-step transactions.

pub mod achievement;
pub mod event;
pub mod notification;
pub mod order;
pub mod participant;
pub mod product;
pub mod user;

#[cfg(test)]
mod test;
