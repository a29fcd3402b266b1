use sea_orm::DatabaseConnection;

use crate::server::{
    data::product::ProductRepository,
    error::AppError,
    model::shop::{Product, SaveProductParam},
};

pub struct ProductService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Product>, AppError> {
        Ok(ProductRepository::new(self.db)
            .list(include_inactive)
            .await?)
    }

    /// Gets a product. Inactive products are only visible when `include_inactive` is set.
    pub async fn get(&self, id: i32, include_inactive: bool) -> Result<Product, AppError> {
        ProductRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|product| include_inactive || product.is_active)
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn create(&self, param: SaveProductParam) -> Result<Product, AppError> {
        let product = ProductRepository::new(self.db).create(param).await?;

        tracing::info!("Created product {} ({})", product.name, product.id);

        Ok(product)
    }

    pub async fn update(&self, id: i32, param: SaveProductParam) -> Result<Product, AppError> {
        ProductRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ProductRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        tracing::info!("Deleted product {}", id);

        Ok(())
    }
}
