use super::*;

/// Tests adding a signed delta to a balance.
///
/// Verifies that positive and negative deltas are applied and that the balance may go
/// below zero.
///
/// Expected: Ok with balance -5 after +10 and -15
#[tokio::test]
async fn adds_signed_delta() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);
    assert!(repo.add_points(user.id, 10).await?);
    assert!(repo.add_points(user.id, -15).await?);

    let user = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(user.points, -5);

    Ok(())
}

/// Tests deducting points without a sufficient balance.
///
/// Verifies that the conditional deduction leaves the balance untouched when it would go
/// negative.
///
/// Expected: Ok(false) with balance unchanged
#[tokio::test]
async fn refuses_deduction_beyond_balance() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(30).build().await?;

    let repo = UserRepository::new(db);
    assert!(!repo.deduct_points(user.id, 31).await?);
    assert!(repo.deduct_points(user.id, 30).await?);

    let user = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(user.points, 0);

    Ok(())
}

/// Tests adjusting points of a user that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    assert!(!repo.add_points(42, 10).await?);

    Ok(())
}

/// Tests deltas that would leave the `i32` range.
///
/// Verifies that both an overflowing credit and an underflowing debit are refused and the
/// balance keeps its previous value, while a credit landing exactly on `i32::MAX` applies.
///
/// Expected: Ok(false) twice, then Ok(true) with balance `i32::MAX`
#[tokio::test]
async fn refuses_out_of_range_balance() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let rich = factory::user::UserFactory::new(db).points(10).build().await?;
    let poor = factory::user::UserFactory::new(db).points(-10).build().await?;

    let repo = UserRepository::new(db);
    assert!(!repo.add_points(rich.id, i32::MAX).await?);
    assert!(!repo.add_points(poor.id, i32::MIN).await?);

    assert_eq!(repo.find_by_id(rich.id).await?.unwrap().points, 10);
    assert_eq!(repo.find_by_id(poor.id).await?.unwrap().points, -10);

    assert!(repo.add_points(rich.id, i32::MAX - 10).await?);
    assert_eq!(repo.find_by_id(rich.id).await?.unwrap().points, i32::MAX);

    Ok(())
}
