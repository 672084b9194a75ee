//! Client lookup integration tests.
//!
//! These tests verify connectivity and the read side of the clients API
//! against a live realm.

use crate::common::{account_client, create_admin, validate_environment};

/// The server is reachable and the realm exists
#[tokio::test]
async fn test_environment_health() {
    validate_environment()
        .await
        .expect("Server should be running and the realm should exist");
}

/// The credentials from the environment can authenticate
#[tokio::test]
async fn test_admin_client_creation() {
    let admin = create_admin().await.expect("Failed to build admin client");

    // Any authenticated call proves the token exchange worked
    let count = admin.users().count().await;
    assert!(
        count.is_ok(),
        "Authenticated request should succeed: {:?}",
        count.err()
    );
}

/// Listing the realm's clients returns the built-ins
#[tokio::test]
async fn test_find_all_clients() {
    let admin = create_admin().await.expect("Failed to build admin client");

    let clients = admin
        .clients()
        .find_all()
        .await
        .expect("Listing clients should succeed");
    assert!(!clients.is_empty(), "Every realm has built-in clients");

    for client in &clients {
        assert!(!client.id.is_empty(), "Server-assigned id should be set");
        assert!(!client.client_id.is_empty(), "Client id should be set");
    }
}

/// The two lookup paths agree on the same client
#[tokio::test]
async fn test_find_by_client_id_and_find_agree() {
    let admin = create_admin().await.expect("Failed to build admin client");

    let by_name = account_client(&admin).await.expect("account client");
    let by_id = admin
        .clients()
        .find(&by_name.id)
        .await
        .expect("Lookup by id should succeed")
        .expect("Client found by name should also be found by id");

    assert_eq!(by_id.id, by_name.id);
    assert_eq!(by_id.client_id, "account");
}

/// An unknown id comes back as None, not an error
#[tokio::test]
async fn test_find_unknown_client_is_none() {
    let admin = create_admin().await.expect("Failed to build admin client");

    let found = admin
        .clients()
        .find("00000000-0000-0000-0000-000000000000")
        .await
        .expect("Lookup of an unknown id should not error");
    assert!(found.is_none());

    let found = admin
        .clients()
        .find_by_client_id("no-such-client-blipblop")
        .await
        .expect("Lookup of an unknown client id should not error");
    assert!(found.is_none());
}

/// Built-in clients expose their protocol mappers
#[tokio::test]
async fn test_protocol_mappers_decoded() {
    let admin = create_admin().await.expect("Failed to build admin client");

    let clients = admin
        .clients()
        .find_all()
        .await
        .expect("Listing clients should succeed");

    // At least one built-in client ships with mappers (e.g. the broker's
    // "read token" mapper); assert they decode when present.
    let with_mappers: Vec<_> = clients
        .iter()
        .filter(|client| !client.protocol_mappers.is_empty())
        .collect();

    for client in with_mappers {
        for mapper in &client.protocol_mappers {
            assert!(!mapper.name.is_empty(), "Mapper name should be set");
            assert!(!mapper.protocol.is_empty(), "Mapper protocol should be set");
        }
    }
}
