//! RecallSession - the primary public API for recall dialogues.
//!
//! This module provides the conversation controller: a small state
//! machine that sequences setup, the recall loop, and completion. It
//! wraps the guide, the fragment queue, and the transcript into a
//! single API driven once per user input.

use crate::gateway::{ClaudeModel, GatewayError, Model, TokenUsage};
use crate::guide::Guide;
use crate::queue::{split_fragments, FragmentQueue};
use claude::Claude;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Consecutive misses on one target before its answer is revealed.
pub const REVEAL_AFTER_MISSES: u8 = 2;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a story and at least one memory fragment are required")]
    MissingInput,

    #[error("no usable memory fragments after splitting the input")]
    EmptyFragmentSet,

    #[error("model gateway failure: {0}")]
    Gateway(#[from] GatewayError),

    #[error("the session does not accept input in the {0:?} phase")]
    WrongPhase(Phase),

    #[error("No API key configured - set ANTHROPIC_API_KEY environment variable")]
    NoApiKey,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Conversation phase.
///
/// Transitions are monotonic; the only way back is a full reset.
/// `Init` and `Completed` are transient and collapse within a single
/// `begin` or `answer` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Init,
    Recalling,
    Completed,
    Done,
}

/// Configuration for creating a new recall session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model to use for question generation and answer analysis.
    pub model: Option<String>,

    /// Maximum tokens per model response.
    pub max_tokens: usize,

    /// Temperature for generation.
    pub temperature: Option<f32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 1024,
            temperature: Some(0.7),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens for responses.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set temperature for generation.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One line of the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub role: Speaker,
    pub text: String,
}

/// The outcome of one processed user turn.
#[derive(Debug, Clone)]
pub struct Turn {
    /// Assistant messages appended this turn, in order. One per
    /// processing step; a reveal that empties the queue is followed by
    /// the completion summary as its own step.
    pub messages: Vec<String>,

    /// Fragments newly recalled this turn, target first.
    pub newly_recalled: Vec<String>,

    /// The target fragment, when this turn revealed it.
    pub revealed: Option<String>,

    /// True once the final summary has been delivered.
    pub done: bool,
}

/// A guided memory-recall session.
///
/// Owns the fragment queue, the transcript, and the model-facing
/// guide. One instance drives exactly one conversation; a reset tears
/// everything down in place.
pub struct RecallSession {
    guide: Guide,
    queue: FragmentQueue,
    phase: Phase,
    narrative: String,
    transcript: Vec<TranscriptEntry>,
}

impl RecallSession {
    /// Create a new session with the given configuration.
    ///
    /// Requires `ANTHROPIC_API_KEY` environment variable to be set.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let mut client = Claude::from_env().map_err(|_| SessionError::NoApiKey)?;
        if let Some(ref model) = config.model {
            client = client.with_model(model.clone());
        }

        let mut backend = ClaudeModel::new(client).with_max_tokens(config.max_tokens);
        if let Some(temperature) = config.temperature {
            backend = backend.with_temperature(temperature);
        }

        Ok(Self::with_model(Box::new(backend)))
    }

    /// Create a session over an explicit model backend.
    ///
    /// This is the seam used by tests and by callers that bring their
    /// own gateway.
    pub fn with_model(model: Box<dyn Model>) -> Self {
        Self {
            guide: Guide::new(model),
            queue: FragmentQueue::new(),
            phase: Phase::Start,
            narrative: String::new(),
            transcript: Vec::new(),
        }
    }

    /// Start the recall dialogue from the narrative and the raw
    /// comma-delimited fragment text. Returns the first question.
    pub async fn begin(
        &mut self,
        narrative: &str,
        fragment_text: &str,
    ) -> Result<String, SessionError> {
        if self.phase != Phase::Start {
            return Err(SessionError::WrongPhase(self.phase));
        }
        if narrative.trim().is_empty() || fragment_text.trim().is_empty() {
            return Err(SessionError::MissingInput);
        }

        self.phase = Phase::Init;
        let fragments = split_fragments(fragment_text);
        if self.queue.initialize(fragments).is_err() {
            self.phase = Phase::Start;
            return Err(SessionError::EmptyFragmentSet);
        }
        self.narrative = narrative.to_string();

        let Some(target) = self.queue.current().map(str::to_string) else {
            self.phase = Phase::Start;
            return Err(SessionError::EmptyFragmentSet);
        };

        let question = self.ask_question(&target).await?;
        self.push_assistant(&question);
        self.phase = Phase::Recalling;
        Ok(question)
    }

    /// Process one user answer and decide the next move: record
    /// progress, then question, hint, reveal, or complete.
    pub async fn answer(&mut self, input: &str) -> Result<Turn, SessionError> {
        if self.phase != Phase::Recalling {
            return Err(SessionError::WrongPhase(self.phase));
        }
        self.push_user(input);

        let matches = self.guide.analyze(self.queue.all_fragments(), input).await?;
        let newly_recalled = self.queue.register_matches(&matches);

        // Completion check runs before hint/question dispatch.
        if self.queue.is_complete() {
            return Ok(self.complete_turn(newly_recalled, Vec::new(), None));
        }

        let misses = self.queue.misses();

        if misses >= REVEAL_AFTER_MISSES {
            let Some(target) = self.queue.current().map(str::to_string) else {
                return Ok(self.complete_turn(newly_recalled, Vec::new(), None));
            };
            let reveal = reveal_message(&target);
            self.queue.record_recalled(&target);
            self.push_assistant(&reveal);

            return if self.queue.advance().is_ok() {
                Ok(Turn {
                    messages: vec![reveal],
                    newly_recalled,
                    revealed: Some(target),
                    done: false,
                })
            } else {
                Ok(self.complete_turn(newly_recalled, vec![reveal], Some(target)))
            };
        }

        if misses == 1 {
            let Some(target) = self.queue.current().map(str::to_string) else {
                return Ok(self.complete_turn(newly_recalled, Vec::new(), None));
            };
            let hint = self.guide.hint(&self.narrative, &target).await?;
            self.push_assistant(&hint);
            return Ok(Turn {
                messages: vec![hint],
                newly_recalled,
                revealed: None,
                done: false,
            });
        }

        // Fresh target. After this turn's progress the active slot can
        // hold an already-recalled fragment; rotate past it before
        // asking.
        if self.queue.current_is_recalled() && self.queue.advance().is_err() {
            return Ok(self.complete_turn(newly_recalled, Vec::new(), None));
        }

        let Some(target) = self.queue.current().map(str::to_string) else {
            return Ok(self.complete_turn(newly_recalled, Vec::new(), None));
        };
        let question = self.ask_question(&target).await?;
        self.push_assistant(&question);
        Ok(Turn {
            messages: vec![question],
            newly_recalled,
            revealed: None,
            done: false,
        })
    }

    /// Tear the session down in place: fresh queue, empty transcript,
    /// zeroed counters, back to the start phase.
    pub fn reset(&mut self) {
        self.queue = FragmentQueue::new();
        self.phase = Phase::Start;
        self.narrative.clear();
        self.transcript.clear();
        self.guide.reset_usage();
    }

    /// Write a one-way JSON report of the conversation. Never read
    /// back; sessions are ephemeral.
    pub async fn export_transcript(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let report = TranscriptReport {
            narrative: &self.narrative,
            fragments: self.queue.all_fragments(),
            recalled: self.queue.recalled(),
            token_usage: self.token_usage(),
            transcript: &self.transcript,
        };

        let content = serde_json::to_string_pretty(&report)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn all_fragments(&self) -> &[String] {
        self.queue.all_fragments()
    }

    pub fn recalled(&self) -> &[String] {
        self.queue.recalled()
    }

    /// Fragments not yet recalled, active target first.
    pub fn outstanding(&self) -> Vec<String> {
        self.queue.outstanding()
    }

    /// Recall progress as (recalled, total).
    pub fn progress(&self) -> (usize, usize) {
        (self.queue.recalled().len(), self.queue.all_fragments().len())
    }

    pub fn token_usage(&self) -> TokenUsage {
        self.guide.token_usage()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    fn complete_turn(
        &mut self,
        newly_recalled: Vec<String>,
        mut messages: Vec<String>,
        revealed: Option<String>,
    ) -> Turn {
        self.phase = Phase::Completed;
        let summary = completion_message(self.queue.all_fragments(), &self.narrative);
        self.push_assistant(&summary);
        messages.push(summary);
        self.phase = Phase::Done;

        Turn {
            messages,
            newly_recalled,
            revealed,
            done: true,
        }
    }

    async fn ask_question(&mut self, target: &str) -> Result<String, GatewayError> {
        let forbidden = self.queue.forbidden_words();
        self.guide
            .question(&self.narrative, target, self.queue.recalled(), &forbidden)
            .await
    }

    fn push_user(&mut self, text: &str) {
        self.transcript.push(TranscriptEntry {
            role: Speaker::User,
            text: text.to_string(),
        });
    }

    fn push_assistant(&mut self, text: &str) {
        self.transcript.push(TranscriptEntry {
            role: Speaker::Assistant,
            text: text.to_string(),
        });
    }
}

fn reveal_message(target: &str) -> String {
    format!("That's all right. The answer was \"{target}\". Shall we move on to the next memory?")
}

fn completion_message(all_fragments: &[String], narrative: &str) -> String {
    format!(
        "Wonderful work! You brought back every piece of your story ({fragments}).\n\n\
         ---\n\n\
         Your story, read once more:\n\
         > {narrative}\n\n\
         ---\n\n\
         May these memories stay bright for a long time. Whenever you want to \
         share another story, I'm here to listen.",
        fragments = all_fragments.join(", "),
        narrative = narrative,
    )
}

/// Serializable transcript report for `export_transcript`.
#[derive(Debug, Serialize)]
struct TranscriptReport<'a> {
    narrative: &'a str,
    fragments: &'a [String],
    recalled: &'a [String],
    token_usage: TokenUsage,
    transcript: &'a [TranscriptEntry],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;

    #[test]
    fn test_session_config() {
        let config = SessionConfig::new()
            .with_model("claude-3-opus")
            .with_max_tokens(2048)
            .with_temperature(0.5);

        assert_eq!(config.model.as_deref(), Some("claude-3-opus"));
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.temperature, Some(0.5));
    }

    #[test]
    fn test_reveal_message_states_target() {
        let message = reveal_message("graduation");
        assert!(message.contains("\"graduation\""));
    }

    #[test]
    fn test_completion_message_embeds_fragments_and_narrative() {
        let fragments = vec!["graduation".to_string(), "rain".to_string()];
        let message = completion_message(&fragments, "We walked in the rain.");

        assert!(message.contains("graduation, rain"));
        assert!(message.contains("> We walked in the rain."));
    }

    #[tokio::test]
    async fn test_begin_requires_both_inputs() {
        let mut session = RecallSession::with_model(Box::new(MockModel::default()));

        let err = session.begin("", "graduation").await.unwrap_err();
        assert!(matches!(err, SessionError::MissingInput));

        let err = session.begin("a story", "   ").await.unwrap_err();
        assert!(matches!(err, SessionError::MissingInput));

        // No state was touched; the session still accepts a start.
        assert_eq!(session.phase(), Phase::Start);
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_begin_rejects_unusable_fragments() {
        let mut session = RecallSession::with_model(Box::new(MockModel::default()));

        let err = session.begin("a story", " , , ").await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyFragmentSet));
        assert_eq!(session.phase(), Phase::Start);
    }

    #[tokio::test]
    async fn test_answer_outside_recalling_is_rejected() {
        let mut session = RecallSession::with_model(Box::new(MockModel::default()));

        let err = session.answer("hello").await.unwrap_err();
        assert!(matches!(err, SessionError::WrongPhase(Phase::Start)));
    }
}
