//! In-memory transport for unit tests.
//!
//! Serves canned responses in FIFO order and records every request, so a
//! test can assert on paths, methods, and bodies without a server.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use parking_lot::RwLock;

use super::traits::{AdminRequest, AdminResponse, AdminTransport};
use crate::Error;

/// A scripted transport.
///
/// Queue responses up front with the `enqueue_*` methods, run the code under
/// test, then inspect what it sent via [`requests`](Self::requests) or
/// [`last_request`](Self::last_request).
pub struct MockTransport {
    responses: RwLock<VecDeque<AdminResponse>>,
    requests: RwLock<Vec<AdminRequest>>,
    request_count: AtomicU64,
    simulate_failure: RwLock<Option<Error>>,
}

impl MockTransport {
    /// Creates a transport with nothing queued.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(VecDeque::new()),
            requests: RwLock::new(Vec::new()),
            request_count: AtomicU64::new(0),
            simulate_failure: RwLock::new(None),
        }
    }

    /// Queues a canned response.
    pub fn enqueue(&self, response: AdminResponse) {
        self.responses.write().push_back(response);
    }

    /// Queues a bodyless response with the given status.
    pub fn enqueue_status(&self, status: u16) {
        self.enqueue(AdminResponse {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        });
    }

    /// Queues a JSON response with the given status.
    pub fn enqueue_json(&self, status: u16, body: serde_json::Value) {
        let body = serde_json::to_vec(&body).unwrap_or_default();
        self.enqueue(AdminResponse {
            status,
            headers: Vec::new(),
            body: body.into(),
        });
    }

    /// Queues a plain-text response with the given status.
    pub fn enqueue_text(&self, status: u16, body: &str) {
        self.enqueue(AdminResponse {
            status,
            headers: Vec::new(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        });
    }

    /// Queues a 201 Created response carrying a `Location` header.
    pub fn enqueue_created(&self, location: &str) {
        self.enqueue(AdminResponse {
            status: 201,
            headers: vec![("Location".to_string(), location.to_string())],
            body: Bytes::new(),
        });
    }

    /// Makes the next request fail with this error instead of a response.
    pub fn set_failure(&self, error: Error) {
        *self.simulate_failure.write() = Some(error);
    }

    /// Removes a pending simulated failure.
    pub fn clear_failure(&self) {
        *self.simulate_failure.write() = None;
    }

    /// Number of requests executed so far.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Every request executed so far, in arrival order.
    pub fn requests(&self) -> Vec<AdminRequest> {
        self.requests.read().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<AdminRequest> {
        self.requests.read().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AdminTransport for MockTransport {
    async fn execute(&self, request: AdminRequest) -> Result<AdminResponse, Error> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(request);

        // A simulated failure fires once and is consumed.
        if let Some(error) = self.simulate_failure.write().take() {
            return Err(error);
        }

        self.responses
            .write()
            .pop_front()
            .ok_or_else(|| Error::internal("no canned response left in the mock queue"))
    }
}
