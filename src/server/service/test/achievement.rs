use super::*;
use crate::server::{
    data::achievement::UserAchievementRepository, model::notification::NotificationKind,
    service::achievement::AchievementService,
};

/// Tests that evaluation is idempotent.
///
/// Verifies that a second evaluation awards nothing and does not credit the reward again.
///
/// Expected: Ok with one award, then none; balance 105
#[tokio::test]
async fn evaluation_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(100).build().await?;
    factory::achievement::AchievementFactory::new(db)
        .points_threshold(100)
        .reward(5)
        .build()
        .await?;

    let service = AchievementService::new(db);
    assert_eq!(service.evaluate(user.id).await?.len(), 1);
    assert!(service.evaluate(user.id).await?.is_empty());
    assert_eq!(balance(db, user.id).await, 105);

    Ok(())
}

/// Tests chained awards.
///
/// Verifies that a reward pushing the balance over another threshold unlocks that
/// achievement within the same evaluation.
///
/// Expected: Ok with both achievements awarded and balance 70
#[tokio::test]
async fn rewards_can_unlock_further_achievements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(40).build().await?;
    factory::achievement::AchievementFactory::new(db)
        .points_threshold(40)
        .reward(20)
        .build()
        .await?;
    factory::achievement::AchievementFactory::new(db)
        .points_threshold(60)
        .reward(10)
        .build()
        .await?;

    let awarded = AchievementService::new(db).evaluate(user.id).await?;

    assert_eq!(awarded.len(), 2);
    assert_eq!(balance(db, user.id).await, 70);

    Ok(())
}

/// Tests that manual and inactive achievements are never awarded automatically.
///
/// Expected: Ok with nothing awarded
#[tokio::test]
async fn skips_manual_and_inactive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).points(500).build().await?;
    factory::achievement::AchievementFactory::new(db)
        .manual()
        .build()
        .await?;
    factory::achievement::AchievementFactory::new(db)
        .points_threshold(10)
        .active(false)
        .build()
        .await?;

    let awarded = AchievementService::new(db).evaluate(user.id).await?;

    assert!(awarded.is_empty());

    Ok(())
}

/// Tests awarding by confirmed event count.
///
/// Expected: Ok with the events_count achievement awarded after two confirmations
#[tokio::test]
async fn awards_by_confirmed_events() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let achievement = factory::achievement::AchievementFactory::new(db)
        .events_count(2)
        .build()
        .await?;

    for _ in 0..2 {
        let event = factory::create_event(db).await?;
        factory::event_participant::create_confirmed_participation(db, event.id, user.id, 0)
            .await?;
    }

    let awarded = AchievementService::new(db).evaluate(user.id).await?;

    assert_eq!(awarded.len(), 1);
    assert_eq!(awarded[0].id, achievement.id);

    Ok(())
}

/// Tests manual assignment.
///
/// Verifies that the reward is credited, the student notified and a second assignment
/// rejected as a conflict.
///
/// Expected: Ok, then Err(Conflict); balance 15
#[tokio::test]
async fn assign_credits_reward_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    let achievement = factory::achievement::AchievementFactory::new(db)
        .manual()
        .reward(15)
        .build()
        .await?;

    let service = AchievementService::new(db);
    service.assign(achievement.id, user.id, admin.id).await?;
    let again = service.assign(achievement.id, user.id, admin.id).await;

    assert!(matches!(again, Err(AppError::Conflict(_))));
    assert_eq!(balance(db, user.id).await, 15);
    assert_eq!(
        notification_kinds(db, user.id).await,
        vec![NotificationKind::AchievementEarned]
    );

    Ok(())
}

/// Tests assigning to a missing user or achievement.
///
/// Expected: Err(NotFound) in both cases
#[tokio::test]
async fn assign_requires_existing_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let achievement = factory::create_achievement(db, 10).await?;

    let service = AchievementService::new(db);

    assert!(matches!(
        service.assign(achievement.id, 999, admin.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.assign(999, admin.id, admin.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests revoking keeps credited points.
///
/// Expected: Ok, then Err(NotFound) for a second revoke; balance unchanged
#[tokio::test]
async fn revoke_keeps_points() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_achievement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    let achievement = factory::achievement::AchievementFactory::new(db)
        .manual()
        .reward(15)
        .build()
        .await?;

    let service = AchievementService::new(db);
    service.assign(achievement.id, user.id, admin.id).await?;
    service.revoke(achievement.id, user.id).await?;

    assert!(matches!(
        service.revoke(achievement.id, user.id).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(balance(db, user.id).await, 15);
    assert!(!UserAchievementRepository::new(db)
        .exists(user.id, achievement.id)
        .await?);

    Ok(())
}
