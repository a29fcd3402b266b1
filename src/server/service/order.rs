//! Order placement and the order lifecycle.
//!
//! Placing an order deducts points, takes stock and records the order in one transaction.
//! Cancelling refunds the points and returns the stock, also atomically.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::HashMap;

use crate::server::{
    data::{
        notification::NotificationRepository,
        order::{NewOrderItem, OrderRepository},
        product::ProductRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        notification::{NewNotification, NotificationKind},
        shop::{Order, OrderLine, OrderStatus, Product},
        user::User,
    },
    service::change_points,
};

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Places an order for the user.
    ///
    /// # Arguments
    /// - `user_id` - Buyer
    /// - `lines` - Requested products, already merged so each product appears once
    ///
    /// # Returns
    /// - `Ok(Order)` - Pending order; points deducted and stock taken
    /// - `Err(AppError::BadRequest)` - Unknown or inactive product, insufficient stock or
    ///   insufficient points
    pub async fn place(&self, user_id: i32, lines: Vec<OrderLine>) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;
        let products = ProductRepository::new(&txn);

        let ids: Vec<i32> = lines.iter().map(|line| line.product_id).collect();
        let found: HashMap<i32, Product> = products
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let mut total: i32 = 0;
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = found
                .get(&line.product_id)
                .filter(|product| product.is_active)
                .ok_or_else(|| {
                    AppError::BadRequest(format!("Product {} is not available", line.product_id))
                })?;

            if matches!(product.stock, Some(stock) if stock < line.quantity) {
                return Err(AppError::BadRequest(format!(
                    "Not enough stock for \"{}\"",
                    product.name
                )));
            }

            total = product
                .price
                .checked_mul(line.quantity)
                .and_then(|line_total| total.checked_add(line_total))
                .ok_or_else(|| AppError::BadRequest("Order total is too large".to_string()))?;

            items.push(NewOrderItem {
                product_id: product.id,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        for item in &items {
            let limited = found
                .get(&item.product_id)
                .is_some_and(|product| product.stock.is_some());
            if limited && !products.take_stock(item.product_id, item.quantity).await? {
                return Err(AppError::BadRequest(
                    "Not enough stock for this order".to_string(),
                ));
            }
        }

        if !UserRepository::new(&txn)
            .deduct_points(user_id, total)
            .await?
        {
            return Err(AppError::BadRequest("Insufficient points".to_string()));
        }

        let order = OrderRepository::new(&txn)
            .create(user_id, total, &items)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} placed order {} for {} points",
            user_id,
            order.id,
            total
        );

        Ok(order)
    }

    pub async fn list_own(&self, user_id: i32) -> Result<Vec<Order>, AppError> {
        Ok(OrderRepository::new(self.db).get_by_user(user_id).await?)
    }

    pub async fn list_all(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
        Ok(OrderRepository::new(self.db).get_all(status).await?)
    }

    /// Gets an order for its owner or an admin.
    ///
    /// Orders of other users are reported as missing.
    pub async fn get(&self, id: i32, viewer: &User) -> Result<Order, AppError> {
        OrderRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|order| viewer.role.is_admin() || order.user_id == viewer.id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    /// Moves an order to a new status on behalf of an admin.
    ///
    /// # Returns
    /// - `Ok(Order)` - Order in its new status; owner notified
    /// - `Err(AppError::NotFound)` - Order does not exist
    /// - `Err(AppError::BadRequest)` - Transition not allowed
    pub async fn update_status(&self, id: i32, next: OrderStatus) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;

        let order = OrderRepository::new(&txn)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let order = apply_status(&txn, order, next).await?;

        txn.commit().await?;

        Ok(order)
    }

    /// Cancels one of the user's own orders while it is still pending.
    pub async fn cancel_own(&self, id: i32, user_id: i32) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;

        let order = OrderRepository::new(&txn)
            .find_by_id(id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.status != OrderStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending orders can be cancelled".to_string(),
            ));
        }

        let order = apply_status(&txn, order, OrderStatus::Cancelled).await?;

        txn.commit().await?;

        Ok(order)
    }
}

/// Applies a status change, refunding on cancellation and notifying the owner.
async fn apply_status<C: ConnectionTrait>(
    db: &C,
    order: Order,
    next: OrderStatus,
) -> Result<Order, AppError> {
    order.status.ensure_transition(next)?;

    let orders = OrderRepository::new(db);
    if !orders.transition(order.id, order.status, next).await? {
        return Err(AppError::BadRequest(
            "Order status changed, please retry".to_string(),
        ));
    }

    if next == OrderStatus::Cancelled {
        change_points(db, order.user_id, order.total_points).await?;

        let products = ProductRepository::new(db);
        for item in &order.items {
            products
                .restore_stock(item.product_id, item.quantity)
                .await?;
        }
    }

    let message = if next == OrderStatus::Cancelled {
        format!(
            "Order #{} was cancelled and {} points were refunded",
            order.id, order.total_points
        )
    } else {
        format!("Order #{} is now {}", order.id, next.as_str())
    };

    NotificationRepository::new(db)
        .create(NewNotification {
            user_id: order.user_id,
            kind: NotificationKind::OrderStatus,
            title: "Order status updated".to_string(),
            message,
            related_id: Some(order.id),
        })
        .await?;

    tracing::info!(
        "Order {} moved from {} to {}",
        order.id,
        order.status.as_str(),
        next.as_str()
    );

    orders
        .find_by_id(order.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
}
