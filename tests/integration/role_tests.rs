//! Client role integration tests.
//!
//! Covers creation, renaming, composites, and deletion of roles under the
//! realm's built-in `account` client.

use keycloak_admin::{ErrorKind, Role};

use crate::common::{account_client, create_admin, unique_name};

/// Test create, find, rename, delete as one flow
#[tokio::test]
async fn test_role_lifecycle() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let client = account_client(&admin).await.expect("account client");
    let roles = admin.clients().roles(&client.id);

    let name = unique_name("it-role");
    let role_id = roles
        .create(&Role::new(&name).with_description("integration test role"))
        .await
        .expect("create role");
    assert!(!role_id.is_empty(), "Created role id should not be empty");

    // The round trip yields a client role owned by the queried client
    let found = roles
        .try_find(&name)
        .await
        .expect("try_find")
        .expect("created role should be found");
    assert_eq!(found.name, name);
    assert!(found.client_role);
    assert_eq!(found.owner_client_id.as_deref(), Some(client.id.as_str()));
    assert_eq!(
        found.description.as_deref(),
        Some("integration test role")
    );

    // Rename; the old name stops resolving, the new one starts
    let renamed_name = format!("{}-renamed", name);
    let renamed = roles.rename(&found, &renamed_name).await.expect("rename");
    assert_eq!(renamed.name, renamed_name);

    let old = roles.try_find(&name).await.expect("try_find old name");
    assert!(old.is_none(), "Old name should no longer resolve");
    let new = roles
        .try_find(&renamed_name)
        .await
        .expect("try_find new name")
        .expect("new name should resolve");
    assert_eq!(new.id, found.id, "Rename keeps the role's id");

    // Delete and verify absence
    roles.delete(&renamed_name).await.expect("delete");
    let gone = roles
        .try_find(&renamed_name)
        .await
        .expect("try_find after delete");
    assert!(gone.is_none());
}

/// Test that an unknown role name is absence, not an error
#[tokio::test]
async fn test_find_unknown_role_is_none() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let client = account_client(&admin).await.expect("account client");

    let found = admin
        .clients()
        .roles(&client.id)
        .try_find(&unique_name("absent"))
        .await
        .expect("Lookup of an unknown role should not error");
    assert!(found.is_none());
}

/// Test that a duplicate role name surfaces the server's conflict message
#[tokio::test]
async fn test_duplicate_role_is_conflict() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let client = account_client(&admin).await.expect("account client");
    let roles = admin.clients().roles(&client.id);

    let name = unique_name("it-role");
    roles.create(&Role::new(&name)).await.expect("create role");

    let err = roles
        .create(&Role::new(&name))
        .await
        .expect_err("Duplicate role name should be rejected");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.status(), Some(409));

    roles.delete(&name).await.expect("cleanup");
}

/// Test every role from the listing is stamped with the owning client
#[tokio::test]
async fn test_all_roles_carry_owner() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let client = account_client(&admin).await.expect("account client");

    let roles = admin
        .clients()
        .roles(&client.id)
        .all()
        .await
        .expect("role listing");
    assert!(
        !roles.is_empty(),
        "The account client ships with default roles"
    );
    assert!(roles
        .iter()
        .all(|role| role.owner_client_id.as_deref() == Some(client.id.as_str())));
}

/// Test composite role assembly and constituent resolution
#[tokio::test]
async fn test_composite_roles() {
    let admin = create_admin().await.expect("Failed to build admin client");
    let client = account_client(&admin).await.expect("account client");
    let roles = admin.clients().roles(&client.id);

    // One umbrella role plus two permissions to hang under it
    let umbrella = unique_name("it-umbrella");
    let perm_one = unique_name("it-perm");
    let perm_two = unique_name("it-perm");
    roles.create(&Role::new(&umbrella)).await.expect("umbrella");
    roles.create(&Role::new(&perm_one)).await.expect("perm one");
    roles.create(&Role::new(&perm_two)).await.expect("perm two");

    let constituents = vec![
        roles
            .try_find(&perm_one)
            .await
            .expect("find perm one")
            .expect("perm one exists"),
        roles
            .try_find(&perm_two)
            .await
            .expect("find perm two")
            .expect("perm two exists"),
    ];
    roles
        .add_permissions(&umbrella, &constituents)
        .await
        .expect("add permissions");

    // The umbrella is now reported composite
    let composites = roles.composites().await.expect("composites");
    assert!(
        composites.iter().any(|role| role.name == umbrella),
        "Umbrella should appear in the composite listing"
    );

    // Its constituents resolve by name
    let resolved = roles.composites_of(&umbrella).await.expect("composites_of");
    assert!(resolved.iter().any(|role| role.name == perm_one));
    assert!(resolved.iter().any(|role| role.name == perm_two));

    // The permission-resolving listing carries them as well
    let with_permissions = roles
        .composites_with_permissions()
        .await
        .expect("composites_with_permissions");
    let entry = with_permissions
        .iter()
        .find(|composite| composite.role.name == umbrella)
        .expect("umbrella should be resolved");
    let permissions = entry
        .permissions
        .as_ref()
        .expect("permissions should be fetched");
    assert!(permissions.iter().any(|role| role.name == perm_one));
    assert!(permissions.iter().any(|role| role.name == perm_two));

    // Cleanup
    for name in [&umbrella, &perm_one, &perm_two] {
        roles.delete(name).await.expect("cleanup");
    }
}
