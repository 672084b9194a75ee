//! Internal client implementation.
//!
//! Every admin operation funnels through the request helpers here. This is
//! where HTTP statuses are turned into the crate's error semantics: 404
//! becomes absence on lookup paths, 201 yields the created resource's id
//! from the `Location` header, 409 carries the server's message, and
//! everything else becomes a typed error holding the original status.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::transport::{AdminRequest, AdminResponse, AdminTransport};

/// How a list read treats a success response whose body does not decode.
///
/// Most reads are [`Strict`](DecodePolicy::Strict). The composite-role
/// listings deliberately treat an undecodable body as "no roles", and that
/// leniency is part of their contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodePolicy {
    /// A body that fails to decode is an invalid-response error.
    Strict,
    /// A body that fails to decode yields an empty list.
    EmptyOnInvalid,
}

pub(crate) struct ClientInner {
    /// Transport executing admin requests.
    pub transport: Arc<dyn AdminTransport>,
}

impl ClientInner {
    pub(crate) fn new(transport: Arc<dyn AdminTransport>) -> Self {
        Self { transport }
    }

    /// GET expecting a decodable body.
    pub(crate) async fn get_json<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.transport.execute(AdminRequest::get(path)).await?;
        if !response.is_success() {
            return Err(self.error_from_response(&response));
        }
        decode_body(&response)
    }

    /// GET where 404 means the resource does not exist.
    pub(crate) async fn get_optional<R>(&self, path: &str) -> Result<Option<R>, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.transport.execute(AdminRequest::get(path)).await?;
        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(self.error_from_response(&response));
        }
        decode_body(&response).map(Some)
    }

    /// GET returning a list, with an explicit policy for undecodable bodies.
    pub(crate) async fn get_list<R>(
        &self,
        path: &str,
        policy: DecodePolicy,
    ) -> Result<Vec<R>, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.transport.execute(AdminRequest::get(path)).await?;
        if !response.is_success() {
            return Err(self.error_from_response(&response));
        }
        match serde_json::from_slice(&response.body) {
            Ok(list) => Ok(list),
            Err(_) if policy == DecodePolicy::EmptyOnInvalid => Ok(Vec::new()),
            Err(e) => Err(Error::invalid_response(format!(
                "Failed to parse response: {}",
                e
            ))),
        }
    }

    /// GET returning the raw body as text.
    pub(crate) async fn get_text(&self, path: &str) -> Result<String, Error> {
        let response = self.transport.execute(AdminRequest::get(path)).await?;
        if !response.is_success() {
            return Err(self.error_from_response(&response));
        }
        String::from_utf8(response.body.to_vec())
            .map_err(|e| Error::invalid_response(format!("Response is not UTF-8: {}", e)))
    }

    /// POST creating a resource, returning the new resource's id.
    ///
    /// Creation success is status 201 and nothing else. The id is never in
    /// the body; it is recovered from the `Location` header. A 201 without
    /// that header is the distinct missing-location error, because the
    /// resource *was* created and callers may want to clean up.
    pub(crate) async fn post_create<T>(&self, path: &str, body: &T) -> Result<String, Error>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .transport
            .execute(AdminRequest::post(path, serde_json::to_vec(body)?))
            .await?;
        match response.status {
            201 => extract_created_id(&response),
            409 => {
                let error = decode_error_body(&response.body);
                match error.error_message {
                    Some(message) => Err(Error::conflict(message).with_status(409)),
                    None => Err(self.error_from_response(&response)),
                }
            }
            status if (200..300).contains(&status) => Err(Error::protocol(format!(
                "creation returned status {} without a resource id",
                status
            ))
            .with_status(status)),
            _ => Err(self.error_from_response(&response)),
        }
    }

    /// POST with a JSON body, expecting a bodyless success.
    pub(crate) async fn post_json<T>(&self, path: &str, body: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .transport
            .execute(AdminRequest::post(path, serde_json::to_vec(body)?))
            .await?;
        self.expect_success(&response)
    }

    /// PUT with a JSON body, expecting a bodyless success.
    pub(crate) async fn put_json<T>(&self, path: &str, body: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .transport
            .execute(AdminRequest::put(path, serde_json::to_vec(body)?))
            .await?;
        self.expect_success(&response)
    }

    /// DELETE without a body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let response = self.transport.execute(AdminRequest::delete(path)).await?;
        self.expect_success(&response)
    }

    /// DELETE carrying a JSON body, used by the role-mapping removal paths.
    pub(crate) async fn delete_json<T>(&self, path: &str, body: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .transport
            .execute(AdminRequest::delete_with_body(
                path,
                serde_json::to_vec(body)?,
            ))
            .await?;
        self.expect_success(&response)
    }

    fn expect_success(&self, response: &AdminResponse) -> Result<(), Error> {
        if response.is_success() {
            Ok(())
        } else {
            Err(self.error_from_response(response))
        }
    }

    /// Builds the typed error for a non-success response.
    ///
    /// The server's `errorMessage` (or `error`) field becomes the error
    /// message when it decodes; otherwise the error carries its kind's
    /// default text. The original status is always attached so callers can
    /// branch on it.
    fn error_from_response(&self, response: &AdminResponse) -> Error {
        let body = decode_error_body(&response.body);
        let error = match body.error_message.or(body.error) {
            Some(message) => Error::from_status(response.status, message),
            None => {
                Error::from_kind(ErrorKind::from_http_status(response.status))
                    .with_status(response.status)
            }
        };
        if response.status == 429 {
            if let Some(seconds) = response
                .header("retry-after")
                .and_then(|value| value.parse::<u64>().ok())
            {
                return error.with_retry_after(Duration::from_secs(seconds));
            }
        }
        error
    }
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner").finish_non_exhaustive()
    }
}

/// Recovers a created resource's id from the `Location` header.
///
/// The header's value is split on `/` and the final segment is taken as the
/// id, with no validation of its shape. Absence of the header is the
/// missing-location error, never silently empty.
fn extract_created_id(response: &AdminResponse) -> Result<String, Error> {
    let location = response
        .header("location")
        .ok_or_else(|| Error::from_kind(ErrorKind::MissingLocation))?;
    let id = location.rsplit('/').next().unwrap_or(location);
    Ok(id.to_owned())
}

fn decode_body<R>(response: &AdminResponse) -> Result<R, Error>
where
    R: DeserializeOwned,
{
    serde_json::from_slice(&response.body)
        .map_err(|e| Error::invalid_response(format!("Failed to parse response: {}", e)))
}

/// The server's error body convention. An undecodable or empty body decodes
/// as no message at all, never as a failure.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn decode_error_body(body: &[u8]) -> ErrorBody {
    let decoded: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    ErrorBody {
        error_message: decoded.error_message.filter(|m| !m.is_empty()),
        error: decoded.error.filter(|m| !m.is_empty()),
    }
}
