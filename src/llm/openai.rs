use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::ProviderError;

use super::provider::AiProvider;
use super::types::ProviderResponse;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gpt-4o").to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": 4096,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(format!("OpenAI request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Rejected(format!("OpenAI returned {}", status)));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("OpenAI parse error: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(ProviderError::Rejected(
                error["message"].as_str().unwrap_or("Unknown OpenAI error").to_string(),
            ));
        }

        let text = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ProviderError::Malformed("No content in OpenAI response".into()))?
            .to_string();

        Ok(ProviderResponse {
            text,
            model: self.model.clone(),
            input_tokens: data["usage"]["prompt_tokens"].as_u64(),
            output_tokens: data["usage"]["completion_tokens"].as_u64(),
        })
    }

    fn provider_name(&self) -> &str {
        "chatgpt"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
