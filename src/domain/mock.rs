//! domain::mock
//!
//! Mock backend for deterministic testing.
//!
//! # Design
//!
//! Responses are scripted per command path; commands without a script get
//! `{"ok": true}`. Failures can be injected for one command or for all of
//! them, and every request is recorded.
//!
//! # Example
//!
//! ```
//! use eeroctl::domain::mock::{FailOn, MockBackend};
//! use eeroctl::domain::DomainError;
//! use serde_json::json;
//!
//! let backend = MockBackend::new()
//!     .respond("network.list", json!([{"id": "n1"}]))
//!     .fail_on(FailOn::Command("eero.reboot".into(), DomainError::RateLimited));
//! assert!(backend.calls().is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::traits::{ActionOutput, ActionRequest, Backend, DomainError};

/// Mock backend for testing.
///
/// Clones share state, so a test can keep a handle while the engine owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<MockBackendInner>>,
}

#[derive(Debug, Default)]
struct MockBackendInner {
    responses: HashMap<String, ActionOutput>,
    fail_on: Option<FailOn>,
    calls: Vec<ActionRequest>,
}

/// Configuration for which invocation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail the given command path with the given error.
    Command(String, DomainError),
    /// Fail every command.
    Any(DomainError),
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the payload returned for `command`.
    pub fn respond(self, command: &str, payload: Value) -> Self {
        self.lock()
            .responses
            .insert(command.to_string(), ActionOutput::new(payload));
        self
    }

    /// Script a partial-success payload for `command`.
    pub fn respond_partial(self, command: &str, payload: Value) -> Self {
        self.lock()
            .responses
            .insert(command.to_string(), ActionOutput::partial(payload));
        self
    }

    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<ActionRequest> {
        self.lock().calls.clone()
    }

    /// Command paths received so far.
    pub fn commands(&self) -> Vec<String> {
        self.lock().calls.iter().map(|c| c.command.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockBackendInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn invoke(&self, request: &ActionRequest) -> Result<ActionOutput, DomainError> {
        let mut inner = self.lock();
        inner.calls.push(request.clone());

        match &inner.fail_on {
            Some(FailOn::Any(e)) => return Err(e.clone()),
            Some(FailOn::Command(command, e)) if *command == request.command => {
                return Err(e.clone())
            }
            _ => {}
        }

        Ok(inner
            .responses
            .get(&request.command)
            .cloned()
            .unwrap_or_else(|| ActionOutput::new(json!({"ok": true}))))
    }
}
