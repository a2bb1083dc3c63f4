//! Model gateway.
//!
//! Single choke-point between the dialogue engine and the language
//! model. Every prompt goes through [`Gateway::invoke`], which
//! delegates to a [`Model`] backend and accumulates token usage for
//! the session.

use async_trait::async_trait;
use claude::{Claude, Message, Request};
use serde::Serialize;
use thiserror::Error;

/// Errors from the model gateway.
///
/// A gateway failure is fatal for the session: there is no retry or
/// backoff, and the presentation boundary halts further interaction.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Claude API error: {0}")]
    Api(#[from] claude::Error),
}

/// One completed model invocation.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
}

/// Cumulative token counters for a session.
///
/// Counters only grow; they reset on full session reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub prompt: usize,
    pub completion: usize,
    pub total: usize,
}

impl TokenUsage {
    fn absorb(&mut self, completion: &Completion) {
        self.prompt += completion.prompt_tokens;
        self.completion += completion.completion_tokens;
        self.total += completion.prompt_tokens + completion.completion_tokens;
    }
}

/// A language-model backend: one prompt in, one text completion out.
#[async_trait]
pub trait Model: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<Completion, GatewayError>;
}

/// Live backend over the Claude Messages API.
pub struct ClaudeModel {
    client: Claude,
    max_tokens: usize,
    temperature: Option<f32>,
}

impl ClaudeModel {
    pub fn new(client: Claude) -> Self {
        Self {
            client,
            max_tokens: 1024,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
impl Model for ClaudeModel {
    async fn invoke(&self, prompt: &str) -> Result<Completion, GatewayError> {
        let mut request =
            Request::new(vec![Message::user(prompt)]).with_max_tokens(self.max_tokens);

        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.client.complete(request).await?;

        Ok(Completion {
            text: response.text,
            prompt_tokens: response.usage.input_tokens,
            completion_tokens: response.usage.output_tokens,
        })
    }
}

/// Gateway owning a model backend and the session's usage counters.
pub struct Gateway {
    model: Box<dyn Model>,
    usage: TokenUsage,
}

impl Gateway {
    pub fn new(model: Box<dyn Model>) -> Self {
        Self {
            model,
            usage: TokenUsage::default(),
        }
    }

    /// Execute a prompt and return the completion text, folding the
    /// call's token counts into the session totals.
    pub async fn invoke(&mut self, prompt: &str) -> Result<String, GatewayError> {
        let completion = self.model.invoke(prompt).await?;
        self.usage.absorb(&completion);
        Ok(completion.text)
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    /// Zero the usage counters. Only meaningful on full session reset.
    pub fn reset_usage(&mut self) {
        self.usage = TokenUsage::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;

    #[tokio::test]
    async fn test_gateway_accumulates_usage() {
        let model = MockModel::new(vec!["first reply".to_string(), "second".to_string()]);
        let mut gateway = Gateway::new(Box::new(model));

        let text = gateway.invoke("one two three").await.unwrap();
        assert_eq!(text, "first reply");

        let usage = gateway.usage();
        assert_eq!(usage.prompt, 3);
        assert_eq!(usage.completion, 2);
        assert_eq!(usage.total, 5);

        gateway.invoke("four").await.unwrap();
        let usage = gateway.usage();
        assert_eq!(usage.prompt, 4);
        assert_eq!(usage.completion, 3);
        assert_eq!(usage.total, 7);
    }

    #[tokio::test]
    async fn test_reset_usage() {
        let model = MockModel::new(vec!["reply".to_string()]);
        let mut gateway = Gateway::new(Box::new(model));

        gateway.invoke("prompt").await.unwrap();
        assert_ne!(gateway.usage(), TokenUsage::default());

        gateway.reset_usage();
        assert_eq!(gateway.usage(), TokenUsage::default());
    }
}
