use super::*;

fn param(title: &str, is_active: bool) -> SaveEventParam {
    let start_date = Utc::now() + Duration::days(3);
    SaveEventParam {
        title: title.to_string(),
        description: Some("Bring a notebook".to_string()),
        event_type: "olympiad".to_string(),
        points: 25,
        start_date,
        end_date: start_date + Duration::hours(3),
        capacity: Some(20),
        image: None,
        is_active,
    }
}

/// Tests creating and updating an event.
///
/// Verifies that every field is stored and that an update replaces them.
///
/// Expected: Ok with the updated title and points
#[tokio::test]
async fn creates_and_updates_event() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventRepository::new(db);
    let event = repo.create(param("Math olympiad", true)).await?;
    assert_eq!(event.points, 25);
    assert_eq!(event.capacity, Some(20));

    let mut changed = param("Physics olympiad", true);
    changed.points = 40;
    let updated = repo.update(event.id, changed).await?.unwrap();

    assert_eq!(updated.id, event.id);
    assert_eq!(updated.title, "Physics olympiad");
    assert_eq!(updated.points, 40);

    Ok(())
}

/// Tests listing events with and without inactive ones.
///
/// Expected: Ok with 1 event for students and 2 for admins
#[tokio::test]
async fn hides_inactive_events_unless_requested() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventRepository::new(db);
    repo.create(param("Visible", true)).await?;
    repo.create(param("Hidden", false)).await?;

    assert_eq!(repo.list(false).await?.len(), 1);
    assert_eq!(repo.list(true).await?.len(), 2);

    Ok(())
}

/// Tests deleting an event with participants.
///
/// Verifies that deleting the event removes its participation rows as well.
///
/// Expected: Ok(true) and no participation left
#[tokio::test]
async fn delete_cascades_to_participations() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, event, _) = factory::helpers::create_participation_with_dependencies(db).await?;

    let repo = EventRepository::new(db);
    assert!(repo.delete(event.id).await?);
    assert!(!repo.delete(event.id).await?);

    let participation = ParticipantRepository::new(db)
        .find(event.id, user.id)
        .await?;
    assert!(participation.is_none());

    Ok(())
}
