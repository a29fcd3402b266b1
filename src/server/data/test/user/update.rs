use super::*;

/// Tests a partial user update.
///
/// Verifies that only the provided fields change and that a nested `Some(None)` clears an
/// optional field.
///
/// Expected: Ok with name changed, class cleared and login untouched
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .class(5, "A")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update(
            user.id,
            UpdateUserParam {
                name: Some("Renamed".to_string()),
                class_grade: Some(None),
                class_letter: Some(None),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.class_grade, None);
    assert_eq!(updated.class_letter, None);
    assert_eq!(updated.login, user.login);

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo.update(999, UpdateUserParam::default()).await?;

    assert!(result.is_none());

    Ok(())
}
