//! Mock inference backend for deterministic testing.
//!
//! Records every content-part sequence it receives so tests can assert on
//! the exact outbound payloads and on how many times the backend was called.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dashlight_core::{Error, Result};

use crate::backend::{ContentPart, InferenceBackend};

#[derive(Debug, Clone)]
enum MockOutcome {
    Respond(String),
    Fail(String),
    Empty,
}

/// Mock inference backend with a call log.
#[derive(Clone)]
pub struct MockBackend {
    outcome: Arc<MockOutcome>,
    calls: Arc<Mutex<Vec<Vec<ContentPart>>>>,
}

impl MockBackend {
    /// Create a mock that answers every call with a canned response.
    pub fn new() -> Self {
        Self {
            outcome: Arc::new(MockOutcome::Respond("Mock response".to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the canned response text.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.outcome = Arc::new(MockOutcome::Respond(response.into()));
        self
    }

    /// Make every call fail with a backend error carrying `message`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.outcome = Arc::new(MockOutcome::Fail(message.into()));
        self
    }

    /// Make every call succeed at the transport level but yield no text.
    pub fn with_empty_response(mut self) -> Self {
        self.outcome = Arc::new(MockOutcome::Empty);
        self
    }

    /// Snapshot of all recorded content-part sequences, in call order.
    pub fn calls(&self) -> Vec<Vec<ContentPart>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn generate(&self, parts: &[ContentPart]) -> Result<String> {
        self.calls.lock().unwrap().push(parts.to_vec());
        match self.outcome.as_ref() {
            MockOutcome::Respond(text) => Ok(text.clone()),
            MockOutcome::Fail(message) => Err(Error::Backend(message.clone())),
            MockOutcome::Empty => Err(Error::EmptyModelResponse),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockBackend::new().with_response("ok");
        let parts = vec![ContentPart::text("hello")];
        assert_eq!(mock.generate(&parts).await.unwrap(), "ok");
        assert_eq!(mock.calls(), vec![parts]);
    }

    #[tokio::test]
    async fn test_mock_failure_mode() {
        let mock = MockBackend::new().with_failure("boom");
        let err = mock.generate(&[ContentPart::text("x")]).await.unwrap_err();
        assert!(matches!(err, Error::Backend(msg) if msg == "boom"));
        assert_eq!(mock.calls().len(), 1);
    }
}
