use async_trait::async_trait;

use crate::errors::ProviderError;

use super::types::ProviderResponse;

/// Uniform contract over the heterogeneous text-generation providers.
///
/// One attempt per call; retry policy is the caller's responsibility.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Free-form text generation for an analysis prompt.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Provider name for logging and result attribution.
    fn provider_name(&self) -> &str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}
