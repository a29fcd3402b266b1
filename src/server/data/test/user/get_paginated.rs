use super::*;

fn query(search: Option<&str>, role: Option<Role>, page: u64, per_page: u64) -> UserQuery {
    UserQuery {
        search: search.map(str::to_string),
        role,
        page,
        per_page,
    }
}

/// Tests paginating through users.
///
/// Verifies that pages are zero-indexed, ordered by name and that the total counts every
/// matching user rather than only the current page.
///
/// Expected: Ok with 2 users on page 0, 1 on page 1 and total 3
#[tokio::test]
async fn paginates_in_name_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Charlie", "Alice", "Bob"] {
        factory::user::UserFactory::new(db).name(name).build().await?;
    }

    let repo = UserRepository::new(db);

    let (first, total) = repo.get_paginated(&query(None, None, 0, 2)).await?;
    assert_eq!(total, 3);
    assert_eq!(
        first.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Alice", "Bob"]
    );

    let (second, _) = repo.get_paginated(&query(None, None, 1, 2)).await?;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, "Charlie");

    Ok(())
}

/// Tests searching users by login or name.
///
/// Verifies that the search term matches a substring of either field.
///
/// Expected: Ok with the two matching users
#[tokio::test]
async fn searches_login_and_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .login("ivanov")
        .name("Petr")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .login("maria")
        .name("Maria Ivanova")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .login("oleg")
        .name("Oleg")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(&query(Some("van"), None, 0, 10))
        .await?;

    assert_eq!(total, 2);
    assert!(users.iter().all(|u| u.login != "oleg"));

    Ok(())
}

/// Tests filtering users by role.
///
/// Expected: Ok with only the admin account
#[tokio::test]
async fn filters_by_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user(db).await?;
    let admin = factory::user::create_admin(db).await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(&query(None, Some(Role::Admin), 0, 10))
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].id, admin.id);

    Ok(())
}
