use super::*;

/// Tests that one user cannot touch another user's notification.
///
/// Verifies that marking as read and deleting are scoped to the owner.
///
/// Expected: Ok(false) for the stranger, Ok(true) for the owner
#[tokio::test]
async fn mutations_are_owner_scoped() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let notification = repo.create(new_notification(owner.id, "hello")).await?;

    assert!(!repo.mark_read(notification.id, stranger.id).await?);
    assert!(!repo.delete(notification.id, stranger.id).await?);
    assert_eq!(repo.unread_count(owner.id).await?, 1);

    assert!(repo.mark_read(notification.id, owner.id).await?);
    assert!(repo.delete(notification.id, owner.id).await?);
    assert_eq!(repo.unread_count(owner.id).await?, 0);

    Ok(())
}

/// Tests marking every notification as read.
///
/// Expected: Ok(2) and no unread notifications left
#[tokio::test]
async fn marks_all_read() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    repo.create(new_notification(user.id, "a")).await?;
    repo.create(new_notification(user.id, "b")).await?;

    assert_eq!(repo.mark_all_read(user.id).await?, 2);
    assert_eq!(repo.mark_all_read(user.id).await?, 0);
    assert_eq!(repo.unread_count(user.id).await?, 0);

    Ok(())
}
