//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! They provide type-safe representations with business logic separated from database
//! and API concerns.

pub mod achievement;
pub mod event;
pub mod notification;
pub mod participation;
pub mod shop;
pub mod user;

/// Computes the number of pages needed to show `total` items `per_page` at a time.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        (total as f64 / per_page as f64).ceil() as u64
    } else {
        0
    }
}
