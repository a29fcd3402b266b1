use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Event};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Event)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement (including foreign keys declared on the entity's
    /// relations) using SQLite backend syntax. Tables with foreign keys must be added after
    /// the tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables required for event participation and attendance.
    ///
    /// Adds, in dependency order: User, Event, EventParticipant, Notification.
    pub fn with_event_tables(self) -> Self {
        self.with_table(User)
            .with_table(Event)
            .with_table(EventParticipant)
            .with_table(Notification)
    }

    /// Adds the tables required for achievement evaluation.
    ///
    /// Equivalent to `with_event_tables()` followed by Achievement and UserAchievement, since
    /// evaluation counts confirmed participations.
    pub fn with_achievement_tables(self) -> Self {
        self.with_event_tables()
            .with_table(Achievement)
            .with_table(UserAchievement)
    }

    /// Adds the tables required for shop operations.
    ///
    /// Adds, in dependency order: User, Notification, Product, Order, OrderItem.
    pub fn with_shop_tables(self) -> Self {
        self.with_table(User)
            .with_table(Notification)
            .with_table(Product)
            .with_table(Order)
            .with_table(OrderItem)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
