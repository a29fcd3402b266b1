//! Shop domain models: products, orders and the order state machine.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::{
    model::shop::{
        OrderDto, OrderItemDto, OrderLineDto, OrderStatusDto, OrderStatusResponseDto, ProductDto,
        SaveProductDto,
    },
    server::error::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    /// Remaining units, `None` for unlimited stock.
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn from_entity(entity: entity::product::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            stock: entity.stock,
            image: entity.image,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ProductDto {
        ProductDto {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image: self.image,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Validated fields for creating or replacing a product.
#[derive(Debug, Clone)]
pub struct SaveProductParam {
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub is_active: bool,
}

impl SaveProductParam {
    pub fn from_dto(dto: SaveProductDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Product name is required".to_string()));
        }

        let Some(price) = dto.price else {
            return Err(AppError::BadRequest("Product price is required".to_string()));
        };
        if price < 0 {
            return Err(AppError::BadRequest(
                "Product price must not be negative".to_string(),
            ));
        }

        if matches!(dto.stock, Some(stock) if stock < 0) {
            return Err(AppError::BadRequest(
                "Product stock must not be negative".to_string(),
            ));
        }

        Ok(Self {
            name,
            description: dto.description,
            price,
            stock: dto.stock,
            image: dto.image,
            is_active: dto.is_active,
        })
    }
}

/// Lifecycle of a shop order.
///
/// Orders move forward through `Pending -> Processing -> Shipped -> Delivered` and may be
/// cancelled while `Pending` or `Processing`. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }

    pub fn ensure_transition(self, next: OrderStatus) -> Result<(), AppError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Cannot change order status from {} to {}",
                self.as_str(),
                next.as_str()
            )))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_entity(status: entity::order::OrderStatus) -> Self {
        use entity::order::OrderStatus as Status;

        match status {
            Status::Pending => Self::Pending,
            Status::Processing => Self::Processing,
            Status::Shipped => Self::Shipped,
            Status::Delivered => Self::Delivered,
            Status::Cancelled => Self::Cancelled,
        }
    }

    pub fn into_entity(self) -> entity::order::OrderStatus {
        use entity::order::OrderStatus as Status;

        match self {
            Self::Pending => Status::Pending,
            Self::Processing => Status::Processing,
            Self::Shipped => Status::Shipped,
            Self::Delivered => Status::Delivered,
            Self::Cancelled => Status::Cancelled,
        }
    }

    pub fn from_dto(status: OrderStatusDto) -> Self {
        match status {
            OrderStatusDto::Pending => Self::Pending,
            OrderStatusDto::Processing => Self::Processing,
            OrderStatusDto::Shipped => Self::Shipped,
            OrderStatusDto::Delivered => Self::Delivered,
            OrderStatusDto::Cancelled => Self::Cancelled,
        }
    }

    pub fn into_dto(self) -> OrderStatusDto {
        match self {
            Self::Pending => OrderStatusDto::Pending,
            Self::Processing => OrderStatusDto::Processing,
            Self::Shipped => OrderStatusDto::Shipped,
            Self::Delivered => OrderStatusDto::Delivered,
            Self::Cancelled => OrderStatusDto::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    /// Price per unit at the time of the order.
    pub unit_price: i32,
}

impl OrderItem {
    pub fn into_dto(self) -> OrderItemDto {
        OrderItemDto {
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status: OrderStatus,
    pub total_points: i32,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order from its row and item rows joined with their products.
    pub fn from_entity(
        entity: entity::order::Model,
        items: Vec<(entity::order_item::Model, Option<entity::product::Model>)>,
    ) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            status: OrderStatus::from_entity(entity.status),
            total_points: entity.total_points,
            items: items
                .into_iter()
                .map(|(item, product)| OrderItem {
                    product_id: item.product_id,
                    product_name: product.map(|p| p.name).unwrap_or_default(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> OrderDto {
        OrderDto {
            id: self.id,
            user_id: self.user_id,
            status: self.status.into_dto(),
            total_points: self.total_points,
            items: self.items.into_iter().map(OrderItem::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_status_dto(self) -> OrderStatusResponseDto {
        OrderStatusResponseDto {
            id: self.id,
            status: self.status.into_dto(),
            updated_at: self.updated_at,
        }
    }
}

/// One requested product and quantity in a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
}

impl OrderLine {
    /// Validates requested lines and merges repeated products.
    ///
    /// # Returns
    /// - `Ok(Vec<OrderLine>)` - One line per product, ordered by product ID
    /// - `Err(AppError::BadRequest)` - No lines, or a quantity below 1
    pub fn merge_dtos(lines: Vec<OrderLineDto>) -> Result<Vec<Self>, AppError> {
        if lines.is_empty() {
            return Err(AppError::BadRequest(
                "Order must contain at least one item".to_string(),
            ));
        }

        let mut merged: BTreeMap<i32, i32> = BTreeMap::new();
        for line in lines {
            if line.quantity < 1 {
                return Err(AppError::BadRequest(
                    "Item quantity must be at least 1".to_string(),
                ));
            }
            let quantity = merged.entry(line.product_id).or_insert(0);
            *quantity = quantity
                .checked_add(line.quantity)
                .ok_or_else(|| AppError::BadRequest("Item quantity is too large".to_string()))?;
        }

        Ok(merged
            .into_iter()
            .map(|(product_id, quantity)| Self {
                product_id,
                quantity,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;
    use super::*;

    #[test]
    fn orders_move_forward_only() {
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));

        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Shipped));
    }

    #[test]
    fn cancellation_only_before_shipping() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn merges_repeated_products() {
        let lines = OrderLine::merge_dtos(vec![
            OrderLineDto {
                product_id: 2,
                quantity: 1,
            },
            OrderLineDto {
                product_id: 1,
                quantity: 2,
            },
            OrderLineDto {
                product_id: 2,
                quantity: 3,
            },
        ])
        .unwrap();

        assert_eq!(
            lines,
            vec![
                OrderLine {
                    product_id: 1,
                    quantity: 2
                },
                OrderLine {
                    product_id: 2,
                    quantity: 4
                },
            ]
        );
    }

    #[test]
    fn rejects_empty_or_zero_quantity_orders() {
        assert!(OrderLine::merge_dtos(vec![]).is_err());
        assert!(OrderLine::merge_dtos(vec![OrderLineDto {
            product_id: 1,
            quantity: 0
        }])
        .is_err());
    }

    #[test]
    fn requires_non_negative_price() {
        let dto = |price| SaveProductDto {
            name: "Pen".to_string(),
            description: None,
            price,
            stock: None,
            image: None,
            is_active: true,
        };

        assert!(SaveProductParam::from_dto(dto(None)).is_err());
        assert!(SaveProductParam::from_dto(dto(Some(-5))).is_err());
        assert_eq!(SaveProductParam::from_dto(dto(Some(0))).unwrap().price, 0);
    }
}
