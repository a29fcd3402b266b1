use super::*;

/// Tests creating, updating and listing products.
///
/// Verifies that inactive products are only listed for admins and that an update
/// replaces every field.
///
/// Expected: Ok with the updated price and 1 of 2 products visible to students
#[tokio::test]
async fn creates_updates_and_lists() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    let param = SaveProductParam {
        name: "Notebook".to_string(),
        description: None,
        price: 30,
        stock: Some(10),
        image: None,
        is_active: true,
    };
    let product = repo.create(param.clone()).await?;

    let updated = repo
        .update(
            product.id,
            SaveProductParam {
                price: 35,
                ..param
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.price, 35);
    assert_eq!(updated.stock, Some(10));

    factory::product::ProductFactory::new(db)
        .active(false)
        .build()
        .await?;

    assert_eq!(repo.list(false).await?.len(), 1);
    assert_eq!(repo.list(true).await?.len(), 2);

    Ok(())
}

/// Tests loading several products by ID.
///
/// Expected: Ok with only the existing product
#[tokio::test]
async fn find_many_skips_unknown_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_shop_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::create_product(db, 10).await?;

    let repo = ProductRepository::new(db);
    let found = repo.find_many(&[product.id, 999]).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, product.id);
    assert!(repo.find_many(&[]).await?.is_empty());

    Ok(())
}
