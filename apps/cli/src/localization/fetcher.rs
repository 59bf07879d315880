//! Poem fetch — pluggable, trait-based source for localized poem packs.
//!
//! Default: `LlmPoemSource` (one chat-completions call returns all six versions).
//! Tests substitute stub implementations.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::localization::prompts::{build_localize_prompt, LOCALIZE_SYSTEM};
use crate::localization::PoemPack;

/// The poem source trait. Implement this to swap fetch backends without touching
/// the workflow code.
///
/// Carried by the collect step as `Arc<dyn PoemSource>`.
#[async_trait]
pub trait PoemSource: Send + Sync {
    async fn fetch(&self, title: &str, author: &str) -> Result<PoemPack, AppError>;
}

/// Production source: delegates to the shared LLM client.
pub struct LlmPoemSource {
    llm: LlmClient,
}

impl LlmPoemSource {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PoemSource for LlmPoemSource {
    async fn fetch(&self, title: &str, author: &str) -> Result<PoemPack, AppError> {
        let prompt = build_localize_prompt(title, author);
        let system = format!("{LOCALIZE_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");
        info!("Fetching localized versions for \"{title}\" ({author})");

        self.llm
            .call_json::<PoemPack>(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Poem fetch failed for '{title}': {e}")))
    }
}
