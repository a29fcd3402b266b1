use super::*;
use crate::server::{
    data::product::ProductRepository,
    model::{
        notification::NotificationKind,
        shop::{OrderLine, OrderStatus},
    },
    service::order::OrderService,
};

fn line(product_id: i32, quantity: i32) -> Vec<OrderLine> {
    vec![OrderLine {
        product_id,
        quantity,
    }]
}

/// Tests placing an order.
///
/// Verifies that the total is deducted, stock is taken and unit prices are recorded.
///
/// Expected: Ok with balance 40, stock 3 and a pending order of 60 points
#[tokio::test]
async fn place_deducts_points_and_stock() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(100).build().await?;
    let product = factory::product::ProductFactory::new(db)
        .price(30)
        .stock(Some(5))
        .build()
        .await?;

    let order = OrderService::new(db)
        .place(user.id, line(product.id, 2))
        .await?;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_points, 60);
    assert_eq!(order.items[0].unit_price, 30);
    assert_eq!(balance(db, user.id).await, 40);
    let product = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(product.stock, Some(3));

    Ok(())
}

/// Tests placing an order without enough points.
///
/// Verifies that nothing changes when the balance does not cover the total.
///
/// Expected: Err(BadRequest) with balance and stock unchanged
#[tokio::test]
async fn insufficient_points_changes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(10).build().await?;
    let product = factory::product::ProductFactory::new(db)
        .price(30)
        .stock(Some(5))
        .build()
        .await?;

    let result = OrderService::new(db)
        .place(user.id, line(product.id, 1))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(balance(db, user.id).await, 10);
    let product = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(product.stock, Some(5));

    Ok(())
}

/// Tests placing an order beyond the available stock.
///
/// Expected: Err(BadRequest) with balance unchanged
#[tokio::test]
async fn insufficient_stock_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(1000).build().await?;
    let product = factory::product::ProductFactory::new(db)
        .price(1)
        .stock(Some(2))
        .build()
        .await?;

    let result = OrderService::new(db)
        .place(user.id, line(product.id, 3))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(balance(db, user.id).await, 1000);

    Ok(())
}

/// Tests ordering an inactive or unknown product.
///
/// Expected: Err(BadRequest) in both cases
#[tokio::test]
async fn unavailable_products_are_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(1000).build().await?;
    let inactive = factory::product::ProductFactory::new(db)
        .active(false)
        .build()
        .await?;

    let service = OrderService::new(db);

    assert!(matches!(
        service.place(user.id, line(inactive.id, 1)).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.place(user.id, line(999, 1)).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests cancelling an order as an admin.
///
/// Verifies that cancellation refunds the total, restores stock and notifies the owner.
///
/// Expected: Ok with balance and stock restored and an order_status notification
#[tokio::test]
async fn cancel_refunds_points_and_stock() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(100).build().await?;
    let product = factory::product::ProductFactory::new(db)
        .price(25)
        .stock(Some(4))
        .build()
        .await?;

    let service = OrderService::new(db);
    let order = service.place(user.id, line(product.id, 2)).await?;
    service
        .update_status(order.id, OrderStatus::Processing)
        .await?;
    let order = service
        .update_status(order.id, OrderStatus::Cancelled)
        .await?;

    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(balance(db, user.id).await, 100);
    let product = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(product.stock, Some(4));
    assert_eq!(
        notification_kinds(db, user.id).await,
        vec![NotificationKind::OrderStatus, NotificationKind::OrderStatus]
    );

    Ok(())
}

/// Tests an invalid status change.
///
/// Expected: Err(BadRequest) when skipping from pending to delivered
#[tokio::test]
async fn rejects_invalid_transition() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(10).build().await?;
    let product = factory::create_product(db, 10).await?;

    let service = OrderService::new(db);
    let order = service.place(user.id, line(product.id, 1)).await?;

    let result = service.update_status(order.id, OrderStatus::Delivered).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a student cancelling their own order.
///
/// Verifies that only the owner can cancel and only while the order is pending.
///
/// Expected: Err(NotFound) for a stranger, Ok for the owner, Err(BadRequest) afterwards
#[tokio::test]
async fn owner_cancels_pending_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::UserFactory::new(db).points(50).build().await?;
    let stranger = factory::create_user(db).await?;
    let product = factory::create_product(db, 20).await?;

    let service = OrderService::new(db);
    let order = service.place(owner.id, line(product.id, 1)).await?;

    assert!(matches!(
        service.cancel_own(order.id, stranger.id).await,
        Err(AppError::NotFound(_))
    ));

    service.cancel_own(order.id, owner.id).await?;
    assert_eq!(balance(db, owner.id).await, 50);

    assert!(matches!(
        service.cancel_own(order.id, owner.id).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}
