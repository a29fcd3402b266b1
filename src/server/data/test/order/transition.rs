use super::*;

/// Tests a conditional status change.
///
/// Verifies that the transition only applies while the order is still in the expected
/// status.
///
/// Expected: Ok(true) once, Ok(false) when repeated from the stale status
#[tokio::test]
async fn transitions_only_from_expected_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db, 10).await?;

    let repo = OrderRepository::new(db);
    let order = repo
        .create(
            user.id,
            10,
            &[NewOrderItem {
                product_id: product.id,
                quantity: 1,
                unit_price: 10,
            }],
        )
        .await?;

    assert!(
        repo.transition(order.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await?
    );
    assert!(
        !repo
            .transition(order.id, OrderStatus::Pending, OrderStatus::Processing)
            .await?
    );

    let order = repo.find_by_id(order.id).await?.unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);

    Ok(())
}
