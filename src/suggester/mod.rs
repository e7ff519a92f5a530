pub mod gemini;
pub mod prompt;

use crate::config::AssistantConfig;
use crate::model::SuggestError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

pub use gemini::GeminiSuggester;

/// Substituted whenever the assistant fails or is unavailable.
pub const FALLBACK_REPLY: &str =
    "⚠️ I couldn't reach the assistant right now. Try different filters or ask again in a moment.";

/// Text-in/text-out boundary to the generative model.
#[async_trait]
pub trait Suggester: Send + Sync {
    async fn suggest(&self, prompt: &str) -> Result<String, SuggestError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Stand-in used when no API key is configured.
pub struct DisabledSuggester;

#[async_trait]
impl Suggester for DisabledSuggester {
    async fn suggest(&self, _prompt: &str) -> Result<String, SuggestError> {
        Err(SuggestError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

pub fn build_suggester(config: &AssistantConfig) -> Arc<dyn Suggester> {
    if !config.is_configured() {
        warn!("No assistant API key configured, AI replies are disabled");
        return Arc::new(DisabledSuggester);
    }
    match GeminiSuggester::from_config(config) {
        Ok(gemini) => Arc::new(gemini),
        Err(e) => {
            warn!("Failed to create assistant client: {}", e);
            Arc::new(DisabledSuggester)
        }
    }
}
