use super::*;

/// Tests admin user successfully passes admin permission check.
///
/// Verifies that the AuthGuard grants access when the token is valid, the user exists in the
/// database, and has the admin role.
///
/// Expected: Ok(User) with the admin role
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let admin = factory::user::UserFactory::new(db)
        .login("headteacher")
        .admin()
        .build()
        .await?;
    let headers = headers_for(&tokens, admin.clone());

    let user = require(db, &tokens, &headers, &[Permission::Admin]).await?;

    assert_eq!(user.id, admin.id);
    assert_eq!(user.login, "headteacher");
    assert!(user.role.is_admin());

    Ok(())
}

/// Tests student is denied admin permission.
///
/// Verifies that a valid token for a student is rejected when the admin permission is
/// required, and that the denial names the student.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_student() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let student = factory::user::create_user(db).await?;
    let headers = headers_for(&tokens, student.clone());

    let result = require(db, &tokens, &headers, &[Permission::Admin]).await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, student.id);
            assert!(message.contains("admin"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

/// Tests empty permission list grants access.
///
/// Verifies that when no permissions are required, any user with a valid token and a
/// database record is granted access.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let student = factory::user::create_user(db).await?;
    let headers = headers_for(&tokens, student.clone());

    let user = require(db, &tokens, &headers, &[]).await?;

    assert_eq!(user.id, student.id);

    Ok(())
}

/// Tests request without an Authorization header is rejected.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = require(db, &tokens(), &HeaderMap::new(), &[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests Authorization header with a scheme other than Bearer is rejected.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = require(db, &tokens(), &bearer("Basic dXNlcjpwYXNz"), &[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests token signed with another secret is rejected.
///
/// Verifies that a token issued by a different key fails signature validation even though
/// the user it names exists.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_token_signed_with_other_secret() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let headers = headers_for(&TokenService::new("another-secret", 1), student);

    let result = require(db, &tokens(), &headers, &[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests token for a deleted user is rejected.
///
/// Verifies that a still-valid token stops working once the user it names is removed.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let student = factory::user::create_user(db).await?;
    let student_id = student.id;
    let headers = headers_for(&tokens, student);

    entity::prelude::User::delete_by_id(student_id)
        .exec(db)
        .await?;

    let result = require(db, &tokens, &headers, &[]).await;

    match result {
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(user_id))) => {
            assert_eq!(user_id, student_id)
        }
        other => panic!("Expected UserNotInDatabase error, got: {:?}", other),
    }

    Ok(())
}
