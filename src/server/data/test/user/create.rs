use super::*;

fn param(login: &str) -> CreateUserParam {
    CreateUserParam {
        login: login.to_string(),
        password_hash: "hash".to_string(),
        name: "Anna Petrova".to_string(),
        class_grade: Some(7),
        class_letter: Some("B".to_string()),
        role: Role::Student,
    }
}

/// Tests creating a new user.
///
/// Verifies that the repository stores every field and starts the point balance at zero.
///
/// Expected: Ok with user retrievable by login
#[tokio::test]
async fn creates_user_with_zero_points() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(param("anna")).await?;

    assert_eq!(user.login, "anna");
    assert_eq!(user.points, 0);
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.class_grade, Some(7));
    assert!(user.last_login_at.is_none());

    let found = repo.find_by_login("anna").await?.unwrap();
    assert_eq!(found.id, user.id);

    Ok(())
}

/// Tests creating a user with a login that is already taken.
///
/// Verifies that the unique constraint on login surfaces as a unique violation so callers
/// can report a conflict.
///
/// Expected: Err with UniqueConstraintViolation
#[tokio::test]
async fn rejects_duplicate_login() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(param("anna")).await?;

    let result = repo.create(param("anna")).await;

    assert!(matches!(
        result.unwrap_err().sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
