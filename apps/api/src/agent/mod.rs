// Screenplay agent: message list in, screenplay text out.
// Generation backend is built lazily on the first request, exactly once, even when
// several first requests arrive together. Every response is screenplay-shaped.

pub mod generator;
pub mod handlers;
pub mod messages;

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::agent::generator::{LlmGenerator, MockGenerator, ScreenplayGenerator};
use crate::agent::messages::{extract_user_input, ChatMessage};
use crate::llm_client::{LlmClient, LlmSettings};
use crate::screenplay::{enforce, fallback};

type Initializer = Box<dyn Fn() -> Arc<dyn ScreenplayGenerator> + Send + Sync>;

/// API keys and model name the generation backend is built from.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub model_name: String,
}

pub struct ScreenplayAgent {
    generator: OnceCell<Arc<dyn ScreenplayGenerator>>,
    init: Initializer,
}

impl ScreenplayAgent {
    /// Agent whose backend is resolved from `credentials` on first use.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_initializer(move || build_generator(&credentials))
    }

    pub fn with_initializer<F>(init: F) -> Self
    where
        F: Fn() -> Arc<dyn ScreenplayGenerator> + Send + Sync + 'static,
    {
        Self {
            generator: OnceCell::new(),
            init: Box::new(init),
        }
    }

    /// Agent with an already-initialized backend.
    pub fn with_generator(generator: Arc<dyn ScreenplayGenerator>) -> Self {
        Self {
            generator: OnceCell::new_with(Some(generator.clone())),
            init: Box::new(move || generator.clone()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.generator.initialized()
    }

    async fn generator(&self) -> &Arc<dyn ScreenplayGenerator> {
        self.generator
            .get_or_init(|| async {
                info!("Initializing screenplay generator...");
                let generator = (self.init)();
                info!("Screenplay generator initialized (backend: {})", generator.backend());
                generator
            })
            .await
    }

    /// Handles one conversation and returns a formatted screenplay. Never fails.
    pub async fn handle(&self, messages: &[ChatMessage]) -> String {
        let generator = self.generator().await;

        let Some(story_idea) = extract_user_input(messages) else {
            return fallback::missing_prompt();
        };

        info!("Processing story idea: {story_idea}");

        let raw = match generator.generate(&story_idea).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Screenplay generation failed: {e}");
                return fallback::generation_failed();
            }
        };
        debug!("Raw output: {} chars", raw.len());

        if raw.trim().is_empty() {
            warn!("Generator returned no text");
            return fallback::nothing_generated();
        }

        let screenplay = enforce(&raw);
        debug!("Formatted: {} chars", screenplay.len());
        screenplay
    }

    /// Logs shutdown. The backend holds no resources beyond its HTTP client, which is
    /// released when the last `Arc` to the agent drops.
    pub fn cleanup(&self) {
        if self.is_initialized() {
            info!("Cleaning up screenplay agent");
        } else {
            info!("Screenplay agent was never initialized; nothing to clean up");
        }
    }
}

/// Builds the LLM-backed generator, or the mock backend if no provider is usable.
fn build_generator(credentials: &Credentials) -> Arc<dyn ScreenplayGenerator> {
    let client = LlmSettings::resolve(
        credentials.openai_api_key.as_deref(),
        credentials.openrouter_api_key.as_deref(),
        &credentials.model_name,
    )
    .and_then(LlmClient::new);

    match client {
        Ok(client) => {
            info!(
                "Using {:?} with model {}",
                client.settings().provider,
                client.settings().model
            );
            Arc::new(LlmGenerator(client))
        }
        Err(e) => {
            warn!("LLM initialization failed: {e}");
            warn!("Falling back to mock generator; responses are for testing only");
            Arc::new(MockGenerator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::agent::generator::MOCK_RESPONSE;
    use crate::llm_client::LlmError;

    struct Canned(&'static str);

    #[async_trait]
    impl ScreenplayGenerator for Canned {
        async fn generate(&self, _story_idea: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }

        fn backend(&self) -> &str {
            "canned"
        }
    }

    struct Failing;

    #[async_trait]
    impl ScreenplayGenerator for Failing {
        async fn generate(&self, _story_idea: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }

        fn backend(&self) -> &str {
            "failing"
        }
    }

    /// Echoes the idea back as an action line.
    struct Echo;

    #[async_trait]
    impl ScreenplayGenerator for Echo {
        async fn generate(&self, story_idea: &str) -> Result<String, LlmError> {
            Ok(format!("INT. ROOM - DAY\n\n{story_idea}"))
        }

        fn backend(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_handle_formats_generated_text() {
        let agent = ScreenplayAgent::with_generator(Arc::new(Canned(
            "INT. LAB - DAY\n\nDR. ALEX works on an AI terminal...",
        )));

        let out = agent.handle(&[ChatMessage::user("AI ethics")]).await;

        assert!(out.starts_with("FADE IN:\n\nINT. LAB - DAY\n"));
        assert!(out.ends_with("FADE OUT."));
    }

    #[tokio::test]
    async fn test_handle_passes_trimmed_user_input() {
        let agent = ScreenplayAgent::with_generator(Arc::new(Echo));

        let out = agent
            .handle(&[ChatMessage::user("  Two strangers meet in a park  ")])
            .await;

        assert!(out.contains("\nTwo strangers meet in a park\n"));
    }

    #[tokio::test]
    async fn test_handle_without_user_message() {
        let agent = ScreenplayAgent::with_generator(Arc::new(Echo));
        let messages = [ChatMessage {
            role: "system".to_string(),
            content: "You are a screenplay writer".to_string(),
        }];

        let out = agent.handle(&messages).await;

        assert!(out.contains("Please provide a story idea."));
    }

    #[tokio::test]
    async fn test_handle_generation_failure() {
        let agent = ScreenplayAgent::with_generator(Arc::new(Failing));

        let out = agent.handle(&[ChatMessage::user("a heist")]).await;

        assert_eq!(out, fallback::generation_failed());
    }

    #[tokio::test]
    async fn test_handle_empty_generation_is_still_a_screenplay() {
        let agent = ScreenplayAgent::with_generator(Arc::new(Canned("")));

        let out = agent.handle(&[ChatMessage::user("a heist")]).await;

        assert_eq!(out, fallback::nothing_generated());
    }

    #[tokio::test]
    async fn test_handle_whitespace_generation() {
        let agent = ScreenplayAgent::with_generator(Arc::new(Canned(" \n\t\n ")));

        let out = agent.handle(&[ChatMessage::user("a heist")]).await;

        assert_eq!(out, fallback::nothing_generated());
    }

    #[tokio::test]
    async fn test_lazy_initialization_on_first_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let agent = ScreenplayAgent::with_initializer(move || -> Arc<dyn ScreenplayGenerator> {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(Canned("Character speaks."))
        });

        assert!(!agent.is_initialized());
        agent.handle(&[ChatMessage::user("a short scene")]).await;
        agent.handle(&[ChatMessage::user("another scene")]).await;

        assert!(agent.is_initialized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_requests_initialize_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let agent = Arc::new(ScreenplayAgent::with_initializer(move || -> Arc<dyn ScreenplayGenerator> {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(Canned("Test screenplay content"))
        }));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let agent = agent.clone();
                tokio::spawn(async move {
                    agent
                        .handle(&[ChatMessage::user(format!("scene {i}"))])
                        .await
                })
            })
            .collect();

        for handle in handles {
            let out = handle.await.unwrap();
            assert!(out.contains("Test screenplay content"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_keys_fall_back_to_mock() {
        let agent = ScreenplayAgent::new(Credentials {
            openai_api_key: None,
            openrouter_api_key: None,
            model_name: "openai/gpt-4o".to_string(),
        });

        let out = agent.handle(&[ChatMessage::user("a heist")]).await;

        assert!(out.contains(MOCK_RESPONSE));
        assert!(out.contains("EXT. LOCATION - NIGHT"));
    }
}
