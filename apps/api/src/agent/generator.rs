//! Screenplay generation: pluggable, trait-based backend that turns a story idea into raw text.
//!
//! Default: `LlmGenerator` (Chat Completions via `llm_client`).
//! Fallback: `MockGenerator`, installed when no provider can be configured.
//!
//! Whatever a generator returns is untrusted: the agent always runs it through the
//! format enforcer.

use async_trait::async_trait;

use crate::llm_client::prompts::{build_task_prompt, SCREENWRITER_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

/// Text returned by the mock backend.
pub const MOCK_RESPONSE: &str = "Mock response for testing";

/// Implement this to swap generation backends without touching the agent or handlers.
///
/// Carried by `ScreenplayAgent` as `Arc<dyn ScreenplayGenerator>`.
#[async_trait]
pub trait ScreenplayGenerator: Send + Sync {
    async fn generate(&self, story_idea: &str) -> Result<String, LlmError>;

    /// Short backend label used in logs.
    fn backend(&self) -> &str;
}

pub struct LlmGenerator(pub LlmClient);

#[async_trait]
impl ScreenplayGenerator for LlmGenerator {
    async fn generate(&self, story_idea: &str) -> Result<String, LlmError> {
        self.0
            .call(&build_task_prompt(story_idea), SCREENWRITER_SYSTEM)
            .await
    }

    fn backend(&self) -> &str {
        &self.0.settings().model
    }
}

/// Offline backend. Returns a fixed string for every idea.
pub struct MockGenerator;

#[async_trait]
impl ScreenplayGenerator for MockGenerator {
    async fn generate(&self, _story_idea: &str) -> Result<String, LlmError> {
        Ok(MOCK_RESPONSE.to_string())
    }

    fn backend(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generator_is_constant() {
        let generator = MockGenerator;
        assert_eq!(generator.generate("anything").await.unwrap(), MOCK_RESPONSE);
        assert_eq!(generator.backend(), "mock");
    }
}
