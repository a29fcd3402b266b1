use super::*;

/// Tests creating an order with items.
///
/// Verifies that the order starts pending and that items come back with their product
/// names and recorded unit prices.
///
/// Expected: Ok with a pending order of two items
#[tokio::test]
async fn creates_pending_order_with_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let pen = factory::product::ProductFactory::new(db)
        .name("Pen")
        .price(5)
        .build()
        .await?;
    let mug = factory::product::ProductFactory::new(db)
        .name("Mug")
        .price(40)
        .build()
        .await?;

    let repo = OrderRepository::new(db);
    let order = repo
        .create(
            user.id,
            50,
            &[
                NewOrderItem {
                    product_id: pen.id,
                    quantity: 2,
                    unit_price: 5,
                },
                NewOrderItem {
                    product_id: mug.id,
                    quantity: 1,
                    unit_price: 40,
                },
            ],
        )
        .await?;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_points, 50);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].product_name, "Pen");
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.items[1].unit_price, 40);

    let found = repo.find_by_id(order.id).await?.unwrap();
    assert_eq!(found.id, order.id);
    assert_eq!(found.items, order.items);

    Ok(())
}

/// Tests listing orders per user and by status.
///
/// Expected: Ok with each user seeing only their own order
#[tokio::test]
async fn lists_by_user_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;
    let product = factory::create_product(db, 10).await?;
    let item = NewOrderItem {
        product_id: product.id,
        quantity: 1,
        unit_price: 10,
    };

    let repo = OrderRepository::new(db);
    let first = repo.create(alice.id, 10, &[item]).await?;
    repo.create(bob.id, 10, &[item]).await?;
    repo.transition(first.id, OrderStatus::Pending, OrderStatus::Processing)
        .await?;

    let mine = repo.get_by_user(alice.id).await?;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, first.id);

    assert_eq!(repo.get_all(None).await?.len(), 2);
    let pending = repo.get_all(Some(OrderStatus::Pending)).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_id, bob.id);

    Ok(())
}
