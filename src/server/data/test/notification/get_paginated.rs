use super::*;

/// Tests paging through a user's notifications.
///
/// Verifies that the newest notification comes first, that other users' notifications
/// are excluded and that the unread filter applies.
///
/// Expected: Ok with 3 notifications newest first, 2 unread
#[tokio::test]
async fn pages_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_event_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let first = repo.create(new_notification(user.id, "first")).await?;
    repo.create(new_notification(user.id, "second")).await?;
    repo.create(new_notification(user.id, "third")).await?;
    repo.create(new_notification(other.id, "not mine")).await?;
    repo.mark_read(first.id, user.id).await?;

    let (page, total) = repo
        .get_paginated(&NotificationQuery {
            user_id: user.id,
            unread_only: false,
            page: 0,
            per_page: 2,
        })
        .await?;
    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title, "third");

    let (unread, total) = repo
        .get_paginated(&NotificationQuery {
            user_id: user.id,
            unread_only: true,
            page: 0,
            per_page: 10,
        })
        .await?;
    assert_eq!(total, 2);
    assert!(unread.iter().all(|n| !n.is_read));
    assert_eq!(repo.unread_count(user.id).await?, 2);

    Ok(())
}
