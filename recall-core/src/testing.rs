//! Testing utilities for the recall dialogue.
//!
//! This module provides tools for integration testing:
//! - `MockModel` for deterministic testing without API calls
//! - `TestHarness` for scripted recall scenarios
//! - Assertion helpers for verifying session state

use crate::gateway::{Completion, GatewayError, Model};
use crate::session::{Phase, RecallSession, SessionError, Turn};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A mock model that returns scripted replies in order.
///
/// Use this for deterministic tests without API calls. Clones share
/// the reply queue, so a harness can keep a handle while the session
/// owns the boxed backend. Token counts are deterministic: whitespace
/// words in, whitespace words out.
#[derive(Clone, Default)]
pub struct MockModel {
    replies: Arc<Mutex<VecDeque<String>>>,
}

impl MockModel {
    /// Create a mock with scripted replies.
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
        }
    }

    /// Add a reply to the back of the script.
    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(reply.into());
    }

    /// Number of scripted replies not yet consumed.
    pub fn pending(&self) -> usize {
        self.replies.lock().expect("mock reply queue poisoned").len()
    }
}

#[async_trait]
impl Model for MockModel {
    async fn invoke(&self, prompt: &str) -> Result<Completion, GatewayError> {
        let reply = self
            .replies
            .lock()
            .expect("mock reply queue poisoned")
            .pop_front()
            .unwrap_or_else(|| "The mock model has no more scripted replies.".to_string());

        Ok(Completion {
            prompt_tokens: prompt.split_whitespace().count(),
            completion_tokens: reply.split_whitespace().count(),
            text: reply,
        })
    }
}

/// Test harness for running scripted recall scenarios.
pub struct TestHarness {
    /// Handle to the scripted model; shares its queue with the session.
    pub model: MockModel,
    /// The session under test.
    pub session: RecallSession,
}

impl TestHarness {
    /// Create a new harness over an empty script.
    pub fn new() -> Self {
        let model = MockModel::default();
        let session = RecallSession::with_model(Box::new(model.clone()));
        Self { model, session }
    }

    /// Queue the next scripted model reply.
    pub fn expect_reply(&mut self, reply: impl Into<String>) -> &mut Self {
        self.model.queue_reply(reply);
        self
    }

    /// Start the dialogue.
    pub async fn begin(
        &mut self,
        narrative: &str,
        fragment_text: &str,
    ) -> Result<String, SessionError> {
        self.session.begin(narrative, fragment_text).await
    }

    /// Send one user answer.
    pub async fn answer(&mut self, input: &str) -> Result<Turn, SessionError> {
        self.session.answer(input).await
    }

    /// Current recall progress as (recalled, total).
    pub fn progress(&self) -> (usize, usize) {
        self.session.progress()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the session is in the expected phase.
#[track_caller]
pub fn assert_phase(harness: &TestHarness, phase: Phase) {
    assert_eq!(
        harness.session.phase(),
        phase,
        "Expected session phase {:?}, got {:?}",
        phase,
        harness.session.phase()
    );
}

/// Assert the recalled sequence matches exactly, in order.
#[track_caller]
pub fn assert_recalled(harness: &TestHarness, expected: &[&str]) {
    let recalled: Vec<&str> = harness
        .session
        .recalled()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        recalled, expected,
        "Expected recalled fragments {expected:?}, got {recalled:?}"
    );
}

/// Assert the active target fragment.
#[track_caller]
pub fn assert_outstanding_head(harness: &TestHarness, expected: &str) {
    let outstanding = harness.session.outstanding();
    assert_eq!(
        outstanding.first().map(String::as_str),
        Some(expected),
        "Expected next outstanding fragment {expected:?}, got {outstanding:?}"
    );
}
