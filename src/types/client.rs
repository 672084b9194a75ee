//! Client (registered application) types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An application or service registered in the realm.
///
/// Only the fields the admin operations rely on are modeled; the server's
/// representation is far larger and the rest is ignored on decode. Clients
/// are created and configured server-side, this library reads them and
/// manages their role sub-resources.
///
/// ## Naming Hazard
///
/// `id` is the server-assigned opaque id used in URLs and in
/// [`Role::owner_client_id`](crate::Role::owner_client_id). `client_id` is
/// the human-chosen identifier shown in the admin console (wire name
/// `clientId`). The two are easy to confuse and never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Server-assigned opaque id, immutable once created.
    pub id: String,

    /// Human-chosen identifier, unique per realm.
    pub client_id: String,

    /// Whether the client is enabled.
    pub enabled: bool,

    /// Protocol mappers configured on this client.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protocol_mappers: Vec<ProtocolMapper>,
}

/// A protocol mapper attached to a client.
///
/// Mappers shape the tokens the client receives. They are read here for
/// inspection only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMapper {
    /// Server-assigned id.
    pub id: String,

    /// Display name of the mapper.
    pub name: String,

    /// The protocol this mapper applies to, e.g. `openid-connect`.
    pub protocol: String,

    /// The mapper implementation, e.g. `oidc-usermodel-property-mapper`.
    pub protocol_mapper: String,

    /// Whether user consent is required for the mapped claim.
    #[serde(default)]
    pub consent_required: bool,

    /// Mapper-specific configuration, kept as raw string pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}
