//! Order repository.
//!
//! Orders are always loaded together with their items and the names of the ordered products.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::shop::{Order, OrderStatus};

/// Item to insert with a new order.
#[derive(Debug, Clone, Copy)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: i32,
}

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a `pending` order and its items.
    ///
    /// Callers that also move points or stock should run this inside a transaction.
    pub async fn create(
        &self,
        user_id: i32,
        total_points: i32,
        items: &[NewOrderItem],
    ) -> Result<Order, DbErr> {
        let now = Utc::now();
        let order = entity::order::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(OrderStatus::Pending.into_entity()),
            total_points: ActiveValue::Set(total_points),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for item in items {
            entity::order_item::ActiveModel {
                order_id: ActiveValue::Set(order.id),
                product_id: ActiveValue::Set(item.product_id),
                quantity: ActiveValue::Set(item.quantity),
                unit_price: ActiveValue::Set(item.unit_price),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        let mut orders = self.with_items(vec![order]).await?;

        orders
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound("Inserted order not found".to_string()))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Order>, DbErr> {
        let Some(order) = entity::prelude::Order::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_items(vec![order]).await?.pop())
    }

    /// Lists a user's orders, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Order>, DbErr> {
        let orders = entity::prelude::Order::find()
            .filter(entity::order::Column::UserId.eq(user_id))
            .order_by_desc(entity::order::Column::CreatedAt)
            .order_by_desc(entity::order::Column::Id)
            .all(self.db)
            .await?;

        self.with_items(orders).await
    }

    /// Lists all orders, newest first, optionally restricted to one status.
    pub async fn get_all(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DbErr> {
        let mut select = entity::prelude::Order::find();
        if let Some(status) = status {
            select = select.filter(entity::order::Column::Status.eq(status.into_entity()));
        }

        let orders = select
            .order_by_desc(entity::order::Column::CreatedAt)
            .order_by_desc(entity::order::Column::Id)
            .all(self.db)
            .await?;

        self.with_items(orders).await
    }

    /// Changes an order's status only if it is still `from`.
    ///
    /// # Returns
    /// - `Ok(true)` - Status changed
    /// - `Ok(false)` - Order missing or its status changed concurrently
    pub async fn transition(
        &self,
        id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Order::update_many()
            .set(entity::order::ActiveModel {
                status: ActiveValue::Set(to.into_entity()),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::order::Column::Id.eq(id))
            .filter(entity::order::Column::Status.eq(from.into_entity()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn with_items(&self, orders: Vec<entity::order::Model>) -> Result<Vec<Order>, DbErr> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
        let rows = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.is_in(order_ids))
            .find_also_related(entity::prelude::Product)
            .order_by_asc(entity::order_item::Column::Id)
            .all(self.db)
            .await?;

        let mut items_by_order: HashMap<i32, Vec<_>> = HashMap::new();
        for (item, product) in rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push((item, product));
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                Order::from_entity(order, items)
            })
            .collect())
    }
}
