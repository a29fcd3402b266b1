//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take the foreign keys they need as constructor
//! arguments so the caller controls which rows are related.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!     let event = factory::event::create_event(&db).await?;
//!
//!     // Create with all dependencies
//!     let (user, event, participation) =
//!         factory::helpers::create_participation_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .login("headteacher")
//!     .admin()
//!     .build()
//!     .await?;
//!
//! let event = factory::event::EventFactory::new(&db)
//!     .points(50)
//!     .capacity(Some(2))
//!     .build()
//!     .await?;
//! ```

pub mod achievement;
pub mod event;
pub mod event_participant;
pub mod helpers;
pub mod product;
pub mod user;

pub use achievement::create_achievement;
pub use event::create_event;
pub use event_participant::create_participation;
pub use product::create_product;
pub use user::create_user;
