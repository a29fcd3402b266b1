use super::*;

/// Tests taking stock from a limited product.
///
/// Verifies that stock is decremented only while enough units remain.
///
/// Expected: Ok(true) for 3 of 5 units, Ok(false) for 3 more, 2 units left
#[tokio::test]
async fn takes_stock_while_available() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::ProductFactory::new(db)
        .stock(Some(5))
        .build()
        .await?;

    let repo = ProductRepository::new(db);
    assert!(repo.take_stock(product.id, 3).await?);
    assert!(!repo.take_stock(product.id, 3).await?);

    let product = repo.find_by_id(product.id).await?.unwrap();
    assert_eq!(product.stock, Some(2));

    Ok(())
}

/// Tests restoring stock.
///
/// Verifies that units come back to limited products while unlimited products stay
/// unlimited.
///
/// Expected: Ok with stock 4 and None respectively
#[tokio::test]
async fn restores_only_limited_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let limited = factory::product::ProductFactory::new(db)
        .stock(Some(1))
        .build()
        .await?;
    let unlimited = factory::product::ProductFactory::new(db)
        .stock(None)
        .build()
        .await?;

    let repo = ProductRepository::new(db);
    repo.restore_stock(limited.id, 3).await?;
    repo.restore_stock(unlimited.id, 3).await?;

    assert_eq!(repo.find_by_id(limited.id).await?.unwrap().stock, Some(4));
    assert_eq!(repo.find_by_id(unlimited.id).await?.unwrap().stock, None);

    Ok(())
}
