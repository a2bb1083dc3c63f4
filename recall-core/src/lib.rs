//! Guided memory-recall dialogue engine.
//!
//! This crate drives a multi-turn dialogue that helps a person recall
//! keyword "memory fragments" from a personal narrative:
//! - A fragment queue tracks what has been recalled and what is waiting
//! - A guide turns session state into model prompts (question, hint,
//!   answer analysis) through a single gateway with usage accounting
//! - A session controller sequences setup, the recall loop, hints,
//!   reveals, and completion
//!
//! # Quick Start
//!
//! ```ignore
//! use recall_core::{RecallSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = RecallSession::new(SessionConfig::new())?;
//!
//!     let question = session
//!         .begin(
//!             "On graduation day it rained, and the ceremony moved into the hall.",
//!             "graduation, rain, hall",
//!         )
//!         .await?;
//!     println!("{question}");
//!
//!     let turn = session.answer("I remember the rain.").await?;
//!     for message in &turn.messages {
//!         println!("{message}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod gateway;
pub mod guide;
pub mod prompts;
pub mod queue;
pub mod session;
pub mod testing;

// Primary public API
pub use gateway::{ClaudeModel, Completion, GatewayError, Model, TokenUsage};
pub use guide::Guide;
pub use queue::{split_fragments, FragmentQueue, QueueError};
pub use session::{
    Phase, RecallSession, SessionConfig, SessionError, Speaker, TranscriptEntry, Turn,
    REVEAL_AFTER_MISSES,
};
pub use testing::{MockModel, TestHarness};
