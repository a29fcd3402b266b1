use super::*;

/// Tests listing an event's participants.
///
/// Verifies that each participation is joined with its user so the roster carries login
/// and name.
///
/// Expected: Ok with two participants carrying their logins
#[tokio::test]
async fn joins_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let event = factory::create_event(db).await?;
    let first = factory::user::UserFactory::new(db)
        .login("first")
        .class(9, "C")
        .build()
        .await?;
    let second = factory::user::UserFactory::new(db)
        .login("second")
        .build()
        .await?;
    factory::create_participation(db, event.id, first.id).await?;
    factory::create_participation(db, event.id, second.id).await?;

    let repo = ParticipantRepository::new(db);
    let participants = repo.get_by_event(event.id).await?;

    assert_eq!(participants.len(), 2);
    let first = participants.iter().find(|p| p.login == "first").unwrap();
    assert_eq!(first.class_label(), "9C");
    assert!(participants.iter().any(|p| p.login == "second"));

    Ok(())
}

/// Tests listing a user's participations.
///
/// Expected: Ok with the participation and its event
#[tokio::test]
async fn lists_user_events() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, event, _) = factory::helpers::create_participation_with_dependencies(db).await?;

    let repo = ParticipantRepository::new(db);
    let rows = repo.get_by_user(user.id).await?;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1.id, event.id);
    assert_eq!(rows[0].0.status, ParticipationStatus::Registered);

    Ok(())
}
