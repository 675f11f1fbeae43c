use crate::errors::SitescopeError;
use crate::models::AnalysisKind;

use super::anthropic::AnthropicProvider;
use super::gemini::GeminiProvider;
use super::openai::OpenAiProvider;
use super::provider::AiProvider;

pub fn create_provider(
    kind: AnalysisKind,
    api_key: &str,
    model: Option<&str>,
) -> Result<Box<dyn AiProvider>, SitescopeError> {
    match kind {
        AnalysisKind::Gemini => Ok(Box::new(GeminiProvider::new(api_key, model))),
        AnalysisKind::Claude => Ok(Box::new(AnthropicProvider::new(api_key, model))),
        AnalysisKind::Chatgpt => Ok(Box::new(OpenAiProvider::new(api_key, model))),
        other => Err(SitescopeError::Config(format!(
            "{} is not a text-generation provider",
            other
        ))),
    }
}
