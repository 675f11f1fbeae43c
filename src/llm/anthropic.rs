use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::ProviderError;

use super::provider::AiProvider;
use super::types::ProviderResponse;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("claude-sonnet-4-5-20250929").to_string(),
            base_url: "https://api.anthropic.com".to_string(),
        }
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let body = json!({
            "model": self.model,
            "max_tokens": 4096,
            "messages": [{"role": "user", "content": prompt}]
        });

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(format!("Anthropic request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Rejected(format!("Anthropic returned {}", status)));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("Anthropic parse error: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(ProviderError::Rejected(
                error["message"].as_str().unwrap_or("Unknown Anthropic error").to_string(),
            ));
        }

        let text = data["content"][0]["text"]
            .as_str()
            .ok_or_else(|| ProviderError::Malformed("No content in Anthropic response".into()))?
            .to_string();

        let input_tokens = data["usage"]["input_tokens"].as_u64();
        let output_tokens = data["usage"]["output_tokens"].as_u64();
        debug!(model = %self.model, input_tokens, output_tokens, "Anthropic completion");

        Ok(ProviderResponse {
            text,
            model: self.model.clone(),
            input_tokens,
            output_tokens,
        })
    }

    fn provider_name(&self) -> &str {
        "claude"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
