use super::*;

/// Tests awarding an achievement twice.
///
/// Verifies that awarding is idempotent: the second call reports `false` and the user
/// still owns exactly one copy.
///
/// Expected: Ok(true) then Ok(false), one owned achievement
#[tokio::test]
async fn award_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let achievement = factory::achievement::AchievementFactory::new(db)
        .manual()
        .build()
        .await?;

    let repo = UserAchievementRepository::new(db);
    assert!(repo.award(user.id, achievement.id, Some(admin.id)).await?);
    assert!(!repo.award(user.id, achievement.id, None).await?);

    let earned = repo.get_by_user(user.id).await?;
    assert_eq!(earned.len(), 1);
    assert_eq!(earned[0].achievement.id, achievement.id);
    assert_eq!(earned[0].awarded_by, Some(admin.id));

    Ok(())
}

/// Tests awarding a pair that another writer inserted first.
///
/// Verifies that the award yields to the existing row through the primary key instead of
/// raising a unique constraint violation, as happens when two evaluations for the same user
/// overlap.
///
/// Expected: Ok(false), the first writer's row kept
#[tokio::test]
async fn award_yields_to_existing_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;
    let achievement = factory::create_achievement(db, 10).await?;

    entity::user_achievement::ActiveModel {
        user_id: ActiveValue::Set(user.id),
        achievement_id: ActiveValue::Set(achievement.id),
        earned_at: ActiveValue::Set(Utc::now()),
        awarded_by: ActiveValue::Set(Some(admin.id)),
    }
    .insert(db)
    .await?;

    let repo = UserAchievementRepository::new(db);
    assert!(!repo.award(user.id, achievement.id, None).await?);

    let earned = repo.get_by_user(user.id).await?;
    assert_eq!(earned.len(), 1);
    assert_eq!(earned[0].awarded_by, Some(admin.id));

    Ok(())
}

/// Tests revoking an achievement.
///
/// Expected: Ok(true) for an owned achievement, Ok(false) afterwards
#[tokio::test]
async fn revokes_owned_achievement() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let achievement = factory::create_achievement(db, 10).await?;

    let repo = UserAchievementRepository::new(db);
    repo.award(user.id, achievement.id, None).await?;

    assert!(repo.earned_ids(user.id).await?.contains(&achievement.id));
    assert!(repo.revoke(user.id, achievement.id).await?);
    assert!(!repo.revoke(user.id, achievement.id).await?);
    assert!(repo.earned_ids(user.id).await?.is_empty());

    Ok(())
}
