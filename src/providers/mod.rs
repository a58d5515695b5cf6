/*!
 * Chat-completion providers used by the language-model extraction path.
 *
 * - OpenAI: OpenAI-compatible chat completions API
 * - Mock: scripted responses for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all completion providers
///
/// Implementations take a system message and a user prompt and return the raw
/// text of the model's reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Complete a single system + user exchange
    ///
    /// # Arguments
    /// * `system` - System message guiding the model
    /// * `prompt` - User message
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The reply text or an error
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod mock;
pub mod openai;
