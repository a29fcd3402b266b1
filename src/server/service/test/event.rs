use super::*;
use crate::server::{model::participation::ParticipationStatus, service::event::EventService};
use chrono::{Duration, Utc};

/// Tests registering twice for the same event.
///
/// Expected: Ok, then Err(Conflict)
#[tokio::test]
async fn second_registration_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let event = factory::create_event(db).await?;

    let service = EventService::new(db);
    let participation = service.register(event.id, user.id).await?;
    assert_eq!(participation.status, ParticipationStatus::Registered);

    let again = service.register(event.id, user.id).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests registering for a full event.
///
/// Verifies that only registered and confirmed participants occupy seats.
///
/// Expected: Err(BadRequest) for the second student
#[tokio::test]
async fn respects_capacity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::event::EventFactory::new(db)
        .capacity(Some(1))
        .build()
        .await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    let service = EventService::new(db);
    service.register(event.id, first.id).await?;

    let result = service.register(event.id, second.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    service.unregister(event.id, first.id).await?;
    service.register(event.id, second.id).await?;

    Ok(())
}

/// Tests registering for an event that has ended or is inactive.
///
/// Expected: Err(BadRequest) for the ended event, Err(NotFound) for the inactive one
#[tokio::test]
async fn rejects_ended_and_inactive_events() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let ended = factory::event::EventFactory::new(db)
        .dates(Utc::now() - Duration::days(2), Utc::now() - Duration::days(1))
        .build()
        .await?;
    let inactive = factory::event::EventFactory::new(db)
        .active(false)
        .build()
        .await?;

    let service = EventService::new(db);

    assert!(matches!(
        service.register(ended.id, user.id).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.register(inactive.id, user.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests registering again after unregistering.
///
/// Verifies that the cancelled row is revived instead of a second row being inserted.
///
/// Expected: Ok with status registered and a participant count of 1
#[tokio::test]
async fn revives_cancelled_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let event = factory::create_event(db).await?;

    let service = EventService::new(db);
    service.register(event.id, user.id).await?;
    service.unregister(event.id, user.id).await?;
    assert_eq!(service.get(event.id, false).await?.participant_count, 0);

    let participation = service.register(event.id, user.id).await?;

    assert_eq!(participation.status, ParticipationStatus::Registered);
    assert_eq!(service.get(event.id, false).await?.participant_count, 1);

    Ok(())
}

/// Tests unregistering after attendance was confirmed.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn cannot_unregister_when_confirmed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let event = factory::create_event(db).await?;
    factory::event_participant::create_confirmed_participation(db, event.id, user.id, 10)
        .await?;

    let result = EventService::new(db).unregister(event.id, user.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests the participant roster and export of a deleted event.
///
/// Verifies that once an event is deleted its participants are gone with it.
///
/// Expected: Err(NotFound) when listing participants afterwards
#[tokio::test]
async fn deleted_event_has_no_participants() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, event, _) = factory::helpers::create_participation_with_dependencies(db).await?;

    let service = EventService::new(db);
    assert_eq!(service.participants(event.id).await?.len(), 1);

    service.delete(event.id).await?;

    assert!(matches!(
        service.participants(event.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
