//! Role mapping types and the realm/client aggregation logic.

use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess};

use super::Role;

/// The full set of roles mapped to one user, as the server groups them.
///
/// The wire shape has two independent groupings: `realmMappings` is a flat
/// role list, `clientMappings` is a JSON object keyed by client identifier.
/// Decoding collects the object's values in document order and drops the
/// keys, since each value already names its client. Either grouping may be
/// missing or `null`, which decodes as empty.
///
/// [`flatten`](RoleMappings::flatten) turns the grouped shape into the flat
/// role list most callers want.
///
/// ```rust
/// use keycloak_admin::RoleMappings;
///
/// let mappings: RoleMappings = serde_json::from_str(r#"{
///     "realmMappings": [{"id": "r1", "name": "offline_access"}],
///     "clientMappings": {
///         "account": {
///             "id": "07e9ea75",
///             "client": "account",
///             "mappings": [{"id": "c1", "name": "view-profile", "clientRole": true}]
///         }
///     }
/// }"#).unwrap();
///
/// let roles = mappings.flatten();
/// assert_eq!(roles.len(), 2);
/// assert!(roles[0].owner_client_id.is_none());
/// assert_eq!(roles[1].owner_client_id.as_deref(), Some("07e9ea75"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMappings {
    /// Realm-scoped roles mapped to the user.
    #[serde(default, deserialize_with = "nullable_roles")]
    pub realm_mappings: Vec<Role>,

    /// Per-client role groups, in the order the server listed them.
    #[serde(default, deserialize_with = "client_mapping_values")]
    pub client_mappings: Vec<ClientRoleMappings>,
}

impl RoleMappings {
    /// Flattens the grouped mappings into a single ordered role list.
    ///
    /// Realm roles come first with no owner, then each client group's roles
    /// tagged with that group's client id. Within-group order and the
    /// server's group order are both preserved.
    pub fn flatten(self) -> Vec<Role> {
        let mut roles = self.realm_mappings;
        for group in self.client_mappings {
            let ClientRoleMappings { id, mappings, .. } = group;
            roles.extend(mappings.into_iter().map(|role| role.with_owner(&id)));
        }
        roles
    }

    /// Returns `true` when the user has no role mappings at all.
    pub fn is_empty(&self) -> bool {
        self.realm_mappings.is_empty() && self.client_mappings.is_empty()
    }
}

/// One client's group of mapped roles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRoleMappings {
    /// Server-assigned id of the client owning these roles.
    pub id: String,

    /// The client's human-chosen identifier.
    #[serde(default)]
    pub client: Option<String>,

    /// The roles mapped through this client.
    #[serde(default)]
    pub mappings: Vec<Role>,
}

fn nullable_roles<'de, D>(deserializer: D) -> Result<Vec<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let roles = Option::<Vec<Role>>::deserialize(deserializer)?;
    Ok(roles.unwrap_or_default())
}

/// Collects the values of the `clientMappings` object in document order.
///
/// The object keys repeat information the values carry, so they are ignored.
/// Going through the map stream directly keeps the server's ordering without
/// buffering into an intermediate map.
fn client_mapping_values<'de, D>(deserializer: D) -> Result<Vec<ClientRoleMappings>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ValuesInOrder;

    impl<'de> de::Visitor<'de> for ValuesInOrder {
        type Value = Vec<ClientRoleMappings>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of client identifiers to role mappings, or null")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((_, group)) = access.next_entry::<IgnoredAny, ClientRoleMappings>()? {
                groups.push(group);
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_any(ValuesInOrder)
}
