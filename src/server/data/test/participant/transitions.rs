use super::*;

/// Tests confirming a registered participation.
///
/// Verifies that confirmation records the awarded points and the confirmation time.
///
/// Expected: Ok(true) with status confirmed and 15 points awarded
#[tokio::test]
async fn confirms_registered_participation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, event, _) = factory::helpers::create_participation_with_dependencies(db).await?;

    let repo = ParticipantRepository::new(db);
    assert!(repo.confirm(event.id, user.id, 15).await?);

    let participation = repo.find(event.id, user.id).await?.unwrap();
    assert_eq!(participation.status, ParticipationStatus::Confirmed);
    assert_eq!(participation.points_awarded, 15);
    assert!(participation.confirmed_at.is_some());

    Ok(())
}

/// Tests confirming twice.
///
/// Verifies that the conditional update only matches a `registered` row, so a second
/// confirmation changes nothing.
///
/// Expected: Ok(false) on the second call
#[tokio::test]
async fn second_confirm_is_a_no_op() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, event, _) = factory::helpers::create_participation_with_dependencies(db).await?;

    let repo = ParticipantRepository::new(db);
    assert!(repo.confirm(event.id, user.id, 15).await?);
    assert!(!repo.confirm(event.id, user.id, 15).await?);

    Ok(())
}

/// Tests reverting a confirmation.
///
/// Expected: Ok(true) with status registered, zero points and no confirmation time
#[tokio::test]
async fn unconfirm_resets_award() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let event = factory::create_event(db).await?;
    factory::event_participant::create_confirmed_participation(db, event.id, user.id, 20)
        .await?;

    let repo = ParticipantRepository::new(db);
    assert!(repo.unconfirm(event.id, user.id).await?);

    let participation = repo.find(event.id, user.id).await?.unwrap();
    assert_eq!(participation.status, ParticipationStatus::Registered);
    assert_eq!(participation.points_awarded, 0);
    assert!(participation.confirmed_at.is_none());

    Ok(())
}

/// Tests cancelling and reviving a registration.
///
/// Verifies that only a registered row can be cancelled and only a cancelled row revived.
///
/// Expected: Ok with cancel and revive succeeding once each
#[tokio::test]
async fn cancel_and_revive() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, event, _) = factory::helpers::create_participation_with_dependencies(db).await?;

    let repo = ParticipantRepository::new(db);
    assert!(!repo.revive(event.id, user.id).await?);
    assert!(repo.cancel(event.id, user.id).await?);
    assert!(!repo.cancel(event.id, user.id).await?);
    assert_eq!(
        repo.find(event.id, user.id).await?.unwrap().status,
        ParticipationStatus::Cancelled
    );

    assert!(repo.revive(event.id, user.id).await?);
    assert_eq!(
        repo.find(event.id, user.id).await?.unwrap().status,
        ParticipationStatus::Registered
    );

    Ok(())
}

/// Tests that a confirmed participation cannot be cancelled directly.
///
/// Expected: Ok(false)
#[tokio::test]
async fn cannot_cancel_confirmed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let event = factory::create_event(db).await?;
    factory::event_participant::create_confirmed_participation(db, event.id, user.id, 5)
        .await?;

    let repo = ParticipantRepository::new(db);
    assert!(!repo.cancel(event.id, user.id).await?);
    assert_eq!(repo.count_confirmed_by_user(user.id).await?, 1);

    Ok(())
}
