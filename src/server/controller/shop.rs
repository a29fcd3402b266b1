use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        shop::{
            OrderDto, OrderStatusDto, OrderStatusResponseDto, PlaceOrderDto, ProductDto,
            SaveProductDto, UpdateOrderStatusDto,
        },
    },
    server::{
        controller::VisibilityParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::shop::{Order, OrderLine, OrderStatus, Product, SaveProductParam},
        service::{order::OrderService, product::ProductService},
        state::AppState,
    },
};

/// Tag for grouping shop endpoints in OpenAPI documentation
pub static SHOP_TAG: &str = "shop";

#[derive(Deserialize)]
pub struct OrderListParams {
    pub status: Option<OrderStatusDto>,
}

/// List products by name.
///
/// Students always get active products only; admins may pass `include_inactive=true`.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = SHOP_TAG,
    params(
        ("include_inactive" = Option<bool>, Query, description = "Include deactivated products (admins only)")
    ),
    responses(
        (status = 200, description = "Products", body = Vec<ProductDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<VisibilityParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let include_inactive = params.include_inactive && user.role.is_admin();
    let products = ProductService::new(&state.db).list(include_inactive).await?;
    let products: Vec<ProductDto> = products.into_iter().map(Product::into_dto).collect();

    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    tag = SHOP_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let product = ProductService::new(&state.db)
        .get(product_id, user.role.is_admin())
        .await?;

    Ok((StatusCode::OK, Json(product.into_dto())))
}

/// Create a product.
///
/// # Returns
/// - `201 Created` - Product created
/// - `400 Bad Request` - Missing name or price, or negative price or stock
#[utoipa::path(
    post,
    path = "/api/products",
    tag = SHOP_TAG,
    request_body = SaveProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SaveProductDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = SaveProductParam::from_dto(payload)?;
    let product = ProductService::new(&state.db).create(param).await?;

    Ok((StatusCode::CREATED, Json(product.into_dto())))
}

/// Replace a product's fields. Existing orders keep the price they were placed at.
#[utoipa::path(
    put,
    path = "/api/products/{product_id}",
    tag = SHOP_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    request_body = SaveProductDto,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<i32>,
    Json(payload): Json<SaveProductDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let param = SaveProductParam::from_dto(payload)?;
    let product = ProductService::new(&state.db)
        .update(product_id, param)
        .await?;

    Ok((StatusCode::OK, Json(product.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/products/{product_id}",
    tag = SHOP_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    ProductService::new(&state.db).delete(product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Place an order paid for with points.
///
/// Lines for the same product are merged. Points are deducted and stock reserved in a single
/// transaction, so a failed order changes nothing.
///
/// # Returns
/// - `201 Created` - Pending order
/// - `400 Bad Request` - No lines, bad quantity, unavailable product, insufficient stock or
///   insufficient points
#[utoipa::path(
    post,
    path = "/api/products/order",
    tag = SHOP_TAG,
    request_body = PlaceOrderDto,
    responses(
        (status = 201, description = "Order placed", body = OrderDto),
        (status = 400, description = "Order cannot be fulfilled", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn place_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PlaceOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let lines = OrderLine::merge_dtos(payload.items)?;
    let order = OrderService::new(&state.db).place(user.id, lines).await?;

    Ok((StatusCode::CREATED, Json(order.into_dto())))
}

/// List the caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/products/orders",
    tag = SHOP_TAG,
    responses(
        (status = 200, description = "Own orders", body = Vec<OrderDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let orders = OrderService::new(&state.db).list_own(user.id).await?;
    let orders: Vec<OrderDto> = orders.into_iter().map(Order::into_dto).collect();

    Ok((StatusCode::OK, Json(orders)))
}

/// Get an order. Students only see their own orders.
#[utoipa::path(
    get,
    path = "/api/products/orders/{order_id}",
    tag = SHOP_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order details", body = OrderDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let order = OrderService::new(&state.db).get(order_id, &user).await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/products/orders/{order_id}/status",
    tag = SHOP_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order status", body = OrderStatusResponseDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let order = OrderService::new(&state.db).get(order_id, &user).await?;

    Ok((StatusCode::OK, Json(order.into_status_dto())))
}

/// Move an order to a new status.
///
/// Cancelling refunds the points and returns the stock. The owner is notified of every change.
///
/// # Returns
/// - `200 OK` - Order in its new status
/// - `400 Bad Request` - Transition not allowed from the current status
/// - `404 Not Found` - Order not found
#[utoipa::path(
    put,
    path = "/api/products/orders/{order_id}/status",
    tag = SHOP_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Order status changed", body = OrderStatusResponseDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let order = OrderService::new(&state.db)
        .update_status(order_id, OrderStatus::from_dto(payload.status))
        .await?;

    Ok((StatusCode::OK, Json(order.into_status_dto())))
}

/// Cancel one of the caller's own orders while it is still pending.
#[utoipa::path(
    post,
    path = "/api/products/orders/{order_id}/cancel",
    tag = SHOP_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order cancelled and refunded", body = OrderDto),
        (status = 400, description = "Order is no longer pending", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let order = OrderService::new(&state.db)
        .cancel_own(order_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

/// List every order, newest first, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = SHOP_TAG,
    params(
        ("status" = Option<OrderStatusDto>, Query, description = "Only orders in this status")
    ),
    responses(
        (status = 200, description = "Orders", body = Vec<OrderDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<OrderListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let orders = OrderService::new(&state.db)
        .list_all(params.status.map(OrderStatus::from_dto))
        .await?;
    let orders: Vec<OrderDto> = orders.into_iter().map(Order::into_dto).collect();

    Ok((StatusCode::OK, Json(orders)))
}
