use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::ProviderError;

use super::provider::AiProvider;
use super::types::ProviderResponse;

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gemini-2.5-flash").to_string(),
        }
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "maxOutputTokens": 8192,
            }
        });

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(format!("Gemini request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Rejected(format!("Gemini returned {}", status)));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("Gemini parse error: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(ProviderError::Rejected(
                error["message"].as_str().unwrap_or("Unknown Gemini error").to_string(),
            ));
        }

        let text = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ProviderError::Malformed("No content in Gemini response".into()))?
            .to_string();

        Ok(ProviderResponse {
            text,
            model: self.model.clone(),
            input_tokens: data["usageMetadata"]["promptTokenCount"].as_u64(),
            output_tokens: data["usageMetadata"]["candidatesTokenCount"].as_u64(),
        })
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
