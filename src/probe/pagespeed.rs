use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::ProviderError;

/// The fetch-metrics capability of the provider contract. The metrics
/// payload is opaque; callers must not assume a vendor schema.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn fetch_metrics(&self, url: &str) -> Result<Value, ProviderError>;

    fn provider_name(&self) -> &str;
}

pub struct PageSpeedClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl PageSpeedClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://www.googleapis.com/pagespeedonline/v5/runPagespeed".to_string(),
        }
    }
}

#[async_trait]
impl MetricsProvider for PageSpeedClient {
    async fn fetch_metrics(&self, url: &str) -> Result<Value, ProviderError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured("pagespeed".into()));
        };

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("url", url), ("key", key)])
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(format!("PageSpeed request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Rejected(format!("PageSpeed returned {}", status)));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("PageSpeed parse error: {}", e)))?;

        Ok(json!({ "metrics": data }))
    }

    fn provider_name(&self) -> &str {
        "pagespeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_short_circuits_without_network() {
        let client = PageSpeedClient::new(None);
        let err = client.fetch_metrics("https://example.com").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
