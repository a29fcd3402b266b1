//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running point, stock and status changes atomically

pub mod achievement;
pub mod attendance;
pub mod auth;
pub mod event;
pub mod export;
pub mod notification;
pub mod order;
pub mod product;
pub mod token;
pub mod user;

#[cfg(test)]
mod test;

use sea_orm::ConnectionTrait;

use crate::server::{data::user::UserRepository, error::AppError};

/// Changes a user's balance, rejecting a change the balance cannot hold.
///
/// Callers check that the user exists beforehand, so a refused update means the new balance
/// would leave the `i32` range.
///
/// # Returns
/// - `Ok(())` - Balance updated
/// - `Err(AppError::BadRequest)` - Balance would overflow
pub(crate) async fn change_points<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    delta: i32,
) -> Result<(), AppError> {
    if !UserRepository::new(db).add_points(user_id, delta).await? {
        return Err(AppError::BadRequest(
            "Points balance would exceed the supported range".to_string(),
        ));
    }

    Ok(())
}
