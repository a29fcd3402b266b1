use super::*;

/// Tests the leaderboard ordering.
///
/// Verifies that only students are ranked, highest balance first, ties broken by name, and
/// that the limit is honoured.
///
/// Expected: Ok with [Bea, Ann] and the admin excluded
#[tokio::test]
async fn ranks_students_by_points() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .name("Ann")
        .points(50)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .name("Bea")
        .points(80)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .name("Cid")
        .points(50)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .name("Admin")
        .points(1000)
        .admin()
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let top = repo.leaderboard(2).await?;

    assert_eq!(
        top.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Bea", "Ann"]
    );

    Ok(())
}
