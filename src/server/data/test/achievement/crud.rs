use super::*;

/// Tests creating an achievement and listing active ones.
///
/// Verifies that inactive achievements are hidden unless explicitly requested.
///
/// Expected: Ok with 1 active and 2 total achievements
#[tokio::test]
async fn creates_and_lists_achievements() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AchievementRepository::new(db);
    let created = repo
        .create(SaveAchievementParam {
            title: "Regular".to_string(),
            description: None,
            icon: Some("star".to_string()),
            condition: AchievementCondition::EventsCount,
            condition_value: 5,
            points_reward: 10,
            is_active: true,
        })
        .await?;
    assert_eq!(created.condition, AchievementCondition::EventsCount);
    assert_eq!(created.points_reward, 10);

    factory::achievement::AchievementFactory::new(db)
        .active(false)
        .build()
        .await?;

    assert_eq!(repo.list(false).await?.len(), 1);
    assert_eq!(repo.list(true).await?.len(), 2);

    Ok(())
}

/// Tests deleting an achievement that users own.
///
/// Verifies that ownership rows go with the achievement.
///
/// Expected: Ok(true) and the user no longer owns it
#[tokio::test]
async fn delete_removes_ownership() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let achievement = factory::create_achievement(db, 10).await?;

    let owned = UserAchievementRepository::new(db);
    owned.award(user.id, achievement.id, None).await?;

    assert!(AchievementRepository::new(db).delete(achievement.id).await?);
    assert!(!owned.exists(user.id, achievement.id).await?);

    Ok(())
}
