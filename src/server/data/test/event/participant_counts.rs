use super::*;

/// Tests counting participants per event.
///
/// Verifies that registered and confirmed participations count while cancelled ones do
/// not, and that events without participants are absent from the map.
///
/// Expected: Ok with a count of 2 for the first event and nothing for the second
#[tokio::test]
async fn counts_active_participations() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let busy = factory::create_event(db).await?;
    let quiet = factory::create_event(db).await?;

    let registered = factory::create_user(db).await?;
    let confirmed = factory::create_user(db).await?;
    let cancelled = factory::create_user(db).await?;

    factory::create_participation(db, busy.id, registered.id).await?;
    factory::event_participant::create_confirmed_participation(db, busy.id, confirmed.id, 10)
        .await?;
    factory::event_participant::ParticipationFactory::new(db, busy.id, cancelled.id)
        .cancelled()
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let counts = repo.participant_counts(&[busy.id, quiet.id]).await?;

    assert_eq!(counts.get(&busy.id), Some(&2));
    assert_eq!(counts.get(&quiet.id), None);
    assert_eq!(repo.participant_count(busy.id).await?, 2);
    assert_eq!(repo.participant_count(quiet.id).await?, 0);

    Ok(())
}
