//! The recall guide.
//!
//! The model-facing half of the controller: owns the gateway and turns
//! session state into prompts. Generates guiding questions and hints,
//! and analyzes user answers against the fragment vocabulary.

use crate::analyzer;
use crate::gateway::{Gateway, GatewayError, Model, TokenUsage};
use crate::prompts;

/// The language-model-facing agent for one recall session.
pub struct Guide {
    gateway: Gateway,
}

impl Guide {
    pub fn new(model: Box<dyn Model>) -> Self {
        Self {
            gateway: Gateway::new(model),
        }
    }

    /// Generate a targeted open-ended question for the active fragment.
    pub async fn question(
        &mut self,
        narrative: &str,
        target: &str,
        recalled: &[String],
        forbidden: &[String],
    ) -> Result<String, GatewayError> {
        let prompt = prompts::question_prompt(narrative, target, recalled, forbidden);
        self.gateway.invoke(&prompt).await
    }

    /// Generate an easier hint question for the active fragment.
    pub async fn hint(&mut self, narrative: &str, target: &str) -> Result<String, GatewayError> {
        let prompt = prompts::hint_prompt(narrative, target);
        self.gateway.invoke(&prompt).await
    }

    /// Ask the model which fragments appear in the answer, parsed into
    /// matched fragment names.
    pub async fn analyze(
        &mut self,
        all_fragments: &[String],
        answer: &str,
    ) -> Result<Vec<String>, GatewayError> {
        let prompt = prompts::analysis_prompt(all_fragments, answer);
        let text = self.gateway.invoke(&prompt).await?;
        Ok(analyzer::parse_matches(&text))
    }

    pub fn token_usage(&self) -> TokenUsage {
        self.gateway.usage()
    }

    pub fn reset_usage(&mut self) {
        self.gateway.reset_usage();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_analyze_parses_reply() {
        let model = MockModel::new(vec!["rain, hall".to_string()]);
        let mut guide = Guide::new(Box::new(model));

        let matches = guide
            .analyze(&list(&["graduation", "rain", "hall"]), "it rained in the hall")
            .await
            .unwrap();
        assert_eq!(matches, list(&["rain", "hall"]));
    }

    #[tokio::test]
    async fn test_analyze_sentinel() {
        let model = MockModel::new(vec!["NONE".to_string()]);
        let mut guide = Guide::new(Box::new(model));

        let matches = guide
            .analyze(&list(&["graduation"]), "I don't remember")
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_question_tracks_usage() {
        let model = MockModel::new(vec!["What was the weather like?".to_string()]);
        let mut guide = Guide::new(Box::new(model));

        let question = guide
            .question("story", "rain", &[], &list(&["rain"]))
            .await
            .unwrap();
        assert_eq!(question, "What was the weather like?");
        assert!(guide.token_usage().total > 0);
    }
}
