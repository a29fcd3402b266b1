//! Product catalog repository.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::shop::{Product, SaveProductParam};

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: SaveProductParam) -> Result<Product, DbErr> {
        let now = Utc::now();
        let entity = entity::product::ActiveModel {
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            price: ActiveValue::Set(param.price),
            stock: ActiveValue::Set(param.stock),
            image: ActiveValue::Set(param.image),
            is_active: ActiveValue::Set(param.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Product::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DbErr> {
        let entity = entity::prelude::Product::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Product::from_entity))
    }

    /// Loads several products at once. Unknown IDs are simply absent from the result.
    pub async fn find_many(&self, ids: &[i32]) -> Result<Vec<Product>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Product::find()
            .filter(entity::product::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Product::from_entity).collect())
    }

    /// Lists products alphabetically.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Product>, DbErr> {
        let mut select = entity::prelude::Product::find();
        if !include_inactive {
            select = select.filter(entity::product::Column::IsActive.eq(true));
        }

        let entities = select
            .order_by_asc(entity::product::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Product::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        param: SaveProductParam,
    ) -> Result<Option<Product>, DbErr> {
        let Some(entity) = entity::prelude::Product::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.name = ActiveValue::Set(param.name);
        active.description = ActiveValue::Set(param.description);
        active.price = ActiveValue::Set(param.price);
        active.stock = ActiveValue::Set(param.stock);
        active.image = ActiveValue::Set(param.image);
        active.is_active = ActiveValue::Set(param.is_active);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Product::from_entity(entity)))
    }

    /// Deletes a product. Order lines referencing it cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Product::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Takes units out of a product with limited stock.
    ///
    /// # Returns
    /// - `Ok(true)` - Stock decremented
    /// - `Ok(false)` - Not enough units left, the product has unlimited stock, or it does not
    ///   exist
    pub async fn take_stock(&self, id: i32, quantity: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Product::update_many()
            .col_expr(
                entity::product::Column::Stock,
                Expr::col(entity::product::Column::Stock).sub(quantity),
            )
            .filter(entity::product::Column::Id.eq(id))
            .filter(entity::product::Column::Stock.gte(quantity))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Returns units to a product with limited stock. Unlimited products are left untouched.
    pub async fn restore_stock(&self, id: i32, quantity: i32) -> Result<(), DbErr> {
        entity::prelude::Product::update_many()
            .col_expr(
                entity::product::Column::Stock,
                Expr::col(entity::product::Column::Stock).add(quantity),
            )
            .filter(entity::product::Column::Id.eq(id))
            .filter(entity::product::Column::Stock.is_not_null())
            .exec(self.db)
            .await?;

        Ok(())
    }
}
