//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a student, an event and a `registered` participation linking them.
///
/// All entities are created with default values. Use the individual
/// factories if you need to customize specific entities.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, event, participation))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_participation_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::event::Model,
        entity::event_participant::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let event = crate::factory::event::create_event(db).await?;
    let participation =
        crate::factory::event_participant::create_participation(db, event.id, user.id).await?;

    Ok((user, event, participation))
}
