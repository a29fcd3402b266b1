//! Product factory for creating test shop products.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test products.
pub struct ProductFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    price: i32,
    stock: Option<i32>,
    is_active: bool,
}

impl<'a> ProductFactory<'a> {
    /// Creates a new ProductFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Product {id}"`
    /// - price: 10
    /// - unlimited stock, active
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Product {}", id),
            price: 10,
            stock: None,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn price(mut self, price: i32) -> Self {
        self.price = price;
        self
    }

    pub fn stock(mut self, stock: Option<i32>) -> Self {
        self.stock = stock;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the product into the database.
    pub async fn build(self) -> Result<entity::product::Model, DbErr> {
        let now = Utc::now();
        entity::product::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            price: ActiveValue::Set(self.price),
            stock: ActiveValue::Set(self.stock),
            image: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a product with the given price and unlimited stock.
pub async fn create_product(
    db: &DatabaseConnection,
    price: i32,
) -> Result<entity::product::Model, DbErr> {
    ProductFactory::new(db).price(price).build().await
}
