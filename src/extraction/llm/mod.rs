/*!
 * Language-model brand extraction.
 *
 * The alternative to the rule engine: sources are rendered into a single
 * prompt, sent to a chat-completion provider, and the reply is parsed into the
 * same `BrandHit` records.
 */

use log::debug;

use crate::errors::ProviderError;
use crate::extraction::model::{AnalyzeSource, BrandHit};
use crate::providers::CompletionProvider;

pub mod prompt;
pub mod response;

pub use prompt::{build_prompt, sources_to_input_block, DetectionMode, LlmConfig, SYSTEM_PROMPT};
pub use response::{extract_json_array, parse_reply, sanitize_item};

/// Extractor backed by a completion provider
#[derive(Debug)]
pub struct LlmExtractor<P: CompletionProvider> {
    // @field: Provider answering the prompts
    provider: P,
    // @field: Settings forwarded in the CONFIG block
    config: LlmConfig,
}

impl<P: CompletionProvider> LlmExtractor<P> {
    /// Create a new extractor
    pub fn new(provider: P, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    /// Provider in use
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Settings in use
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Extract hits from `sources` with one completion request.
    ///
    /// An unparseable reply yields no hits; provider failures are returned.
    pub async fn extract(&self, sources: &[AnalyzeSource]) -> Result<Vec<BrandHit>, ProviderError> {
        let prompt = build_prompt(&self.config, sources);
        debug!("Sending extraction prompt ({} chars) for {} source(s)", prompt.chars().count(), sources.len());

        let reply = self.provider.complete(SYSTEM_PROMPT, &prompt).await?;
        let hits = parse_reply(&reply);

        debug!("Language model returned {} usable hit(s)", hits.len());
        Ok(hits)
    }
}
