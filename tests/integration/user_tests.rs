//! User management integration tests.
//!
//! Covers the user CRUD surface and the per-user role mapping flows
//! against a live realm.

use keycloak_admin::{ErrorKind, NewUser, UserQuery};

use crate::common::{account_client, create_admin, unique_name, TestUser};

/// Test create, find, update, delete as one flow
#[tokio::test]
async fn test_user_lifecycle() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let user = TestUser::create(&admin).await.expect("create");
    assert!(!user.id.is_empty(), "Created id should not be empty");

    // Find by id
    let mut found = admin
        .users()
        .find(&user.id)
        .await
        .expect("find should succeed")
        .expect("created user should be found");
    assert_eq!(found.username.as_deref(), Some(user.username.as_str()));
    assert_eq!(found.email.as_deref(), Some(user.email.as_str()));
    assert!(found.enabled);

    // Update the email and read it back
    let new_email = format!("updated-{}", user.email);
    found.email = Some(new_email.clone());
    admin.users().update(&found).await.expect("update");

    let after = admin
        .users()
        .find(&user.id)
        .await
        .expect("find after update")
        .expect("user should still exist");
    assert_eq!(after.email.as_deref(), Some(new_email.as_str()));

    // Delete and verify absence
    let user_id = user.id.clone();
    user.cleanup().await.expect("cleanup");
    let gone = admin
        .users()
        .find(&user_id)
        .await
        .expect("find after delete should not error");
    assert!(gone.is_none(), "Deleted user should come back as None");
}

/// Test that an unknown id is absence, not an error
#[tokio::test]
async fn test_find_unknown_user_is_none() {
    let admin = create_admin().await.expect("Failed to build admin client");

    let found = admin
        .users()
        .find("00000000-0000-0000-0000-000000000000")
        .await
        .expect("Lookup of an unknown id should not error");
    assert!(found.is_none());
}

/// Test the count endpoint against a creation
#[tokio::test]
async fn test_count_reflects_users() {
    let admin = create_admin().await.expect("Failed to build admin client");

    let before = admin.users().count().await.expect("count");
    let user = TestUser::create(&admin).await.expect("create");
    let after = admin.users().count().await.expect("count after create");

    assert!(after >= 1, "Realm with a created user counts at least one");
    assert!(after > before, "Count should grow after a creation");

    user.cleanup().await.expect("cleanup");
}

/// Test filtered listing finds exactly the created user
#[tokio::test]
async fn test_find_all_with_query() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let user = TestUser::create(&admin).await.expect("create");

    let query = UserQuery::new().username(&user.username);
    let matches = admin
        .users()
        .find_all(Some(&query))
        .await
        .expect("filtered listing");
    assert!(
        matches
            .iter()
            .any(|u| u.username.as_deref() == Some(user.username.as_str())),
        "Filtered listing should contain the created user"
    );

    // A filter that matches nothing is an empty list, not an error
    let none = admin
        .users()
        .find_all(Some(&UserQuery::new().username(unique_name("absent"))))
        .await
        .expect("empty filtered listing");
    assert!(none.is_empty());

    user.cleanup().await.expect("cleanup");
}

/// Test that a duplicate username surfaces the server's conflict message
#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let user = TestUser::create(&admin).await.expect("create");

    let duplicate = NewUser::new(&user.username, "Other", "Person", format!("x-{}", user.email));
    let err = admin
        .users()
        .create(&duplicate)
        .await
        .expect_err("Duplicate username should be rejected");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.status(), Some(409));

    // The first user is untouched by the failed attempt
    let still_there = admin
        .users()
        .find(&user.id)
        .await
        .expect("find")
        .expect("original user should survive the duplicate attempt");
    assert_eq!(
        still_there.username.as_deref(),
        Some(user.username.as_str())
    );

    user.cleanup().await.expect("cleanup");
}

/// Test granting and revoking client roles on a user
#[tokio::test]
async fn test_role_grant_flow() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let user = TestUser::create(&admin).await.expect("create");
    let client = account_client(&admin).await.expect("account client");

    // A fresh user has the account client's roles on offer
    let available = admin
        .users()
        .roles(&user.id)
        .available_for_client(&client.id)
        .await
        .expect("available roles");
    assert!(
        !available.is_empty(),
        "The account client should offer roles to a fresh user"
    );

    // Grant them all
    admin
        .users()
        .roles(&user.id)
        .add_for_client(&client.id, &available)
        .await
        .expect("grant roles");

    // The client-scoped listing reflects the grant, owner stamped
    let granted = admin
        .users()
        .roles(&user.id)
        .for_client(&client.id)
        .await
        .expect("granted roles");
    for role in &available {
        assert!(
            granted.iter().any(|g| g.name == role.name),
            "Granted role {:?} should be listed",
            role.name
        );
    }
    assert!(granted
        .iter()
        .all(|role| role.owner_client_id.as_deref() == Some(client.id.as_str())));

    // The flattened listing carries them too
    let all = admin.users().roles(&user.id).all().await.expect("all roles");
    for role in &available {
        assert!(
            all.iter().any(|g| g.name == role.name),
            "Flattened listing should contain {:?}",
            role.name
        );
    }

    // Revoke and verify
    admin
        .users()
        .roles(&user.id)
        .remove_for_client(&client.id, &available)
        .await
        .expect("revoke roles");
    let after = admin
        .users()
        .roles(&user.id)
        .for_client(&client.id)
        .await
        .expect("roles after revocation");
    for role in &available {
        assert!(
            !after.iter().any(|g| g.name == role.name),
            "Revoked role {:?} should be gone",
            role.name
        );
    }

    user.cleanup().await.expect("cleanup");
}
