//! Scripted in-memory transport for tests.

use crate::error::ClientError;
use crate::request::{ApiRequest, Method, RawResponse};
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type Scripted = Result<RawResponse, String>;

#[derive(Default)]
struct Route {
    queue: VecDeque<Scripted>,
    front_served: bool,
}

impl Route {
    /// Serve the next response. A served front entry is dropped once something
    /// is queued behind it; otherwise it repeats.
    fn next(&mut self) -> Option<Scripted> {
        if self.front_served && self.queue.len() > 1 {
            self.queue.pop_front();
        }
        let scripted = self.queue.front().cloned();
        self.front_served = scripted.is_some();
        scripted
    }
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(Method, String), Route>,
    requests: Vec<ApiRequest>,
}

/// Transport answering from a script and recording every request.
///
/// Responses queued for one route are served in order; the last one repeats
/// until another is queued behind it.
/// Unscripted routes answer `404` with a JSON error body.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .queue
            .push_back(scripted);
    }

    pub fn respond(&self, method: Method, path: &str, response: RawResponse) {
        self.push(method, path, Ok(response));
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond(method, path, RawResponse::json(status, &body));
    }

    /// Fail the route at the transport level (no response at all).
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Err(message.to_string()));
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .requests
            .clone()
    }

    /// Number of requests sent to one route.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let key = (request.method, request.path.clone());
        state.requests.push(request);

        let scripted = state.routes.get_mut(&key).and_then(Route::next);

        match scripted {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ClientError::Transport(message)),
            None => Ok(RawResponse::json(
                404,
                &serde_json::json!({"error": "Not Found", "status": 404}),
            )),
        }
    }
}
