use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    /// Remaining units, absent for unlimited stock.
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SaveProductDto {
    pub name: String,
    pub description: Option<String>,
    /// Required; a missing price is rejected rather than defaulted.
    pub price: Option<i32>,
    pub stock: Option<i32>,
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatusDto {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct OrderLineDto {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct PlaceOrderDto {
    pub items: Vec<OrderLineDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct OrderItemDto {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct OrderDto {
    pub id: i32,
    pub user_id: i32,
    pub status: OrderStatusDto,
    pub total_points: i32,
    pub items: Vec<OrderItemDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct OrderStatusResponseDto {
    pub id: i32,
    pub status: OrderStatusDto,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatusDto,
}
