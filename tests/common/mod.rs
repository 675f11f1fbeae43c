#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use sitescope::errors::{ProviderError, SitescopeError};
use sitescope::llm::{AiProvider, ProviderRegistry, ProviderResponse};
use sitescope::models::AnalysisKind;
use sitescope::probe::{MetricsProvider, StructureProbe, StructureReport};
use sitescope::tasks::Analyzers;

pub struct StaticProvider {
    pub name: &'static str,
    pub text: &'static str,
}

#[async_trait]
impl AiProvider for StaticProvider {
    async fn generate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
        Ok(ProviderResponse {
            text: self.text.to_string(),
            model: "mock-model".to_string(),
            input_tokens: Some(10),
            output_tokens: Some(20),
        })
    }

    fn provider_name(&self) -> &str {
        self.name
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub struct FailingProvider {
    pub name: &'static str,
}

#[async_trait]
impl AiProvider for FailingProvider {
    async fn generate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::Rejected(format!("{} rejected the request", self.name)))
    }

    fn provider_name(&self) -> &str {
        self.name
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub struct StaticMetrics;

#[async_trait]
impl MetricsProvider for StaticMetrics {
    async fn fetch_metrics(&self, _url: &str) -> Result<Value, ProviderError> {
        Ok(json!({"metrics": {"performanceScore": 0.92}}))
    }

    fn provider_name(&self) -> &str {
        "pagespeed"
    }
}

pub struct FailingMetrics;

#[async_trait]
impl MetricsProvider for FailingMetrics {
    async fn fetch_metrics(&self, _url: &str) -> Result<Value, ProviderError> {
        Err(ProviderError::Unreachable("pagespeed timed out".into()))
    }

    fn provider_name(&self) -> &str {
        "pagespeed"
    }
}

pub struct StaticStructure;

#[async_trait]
impl StructureProbe for StaticStructure {
    async fn probe(&self, _url: &str) -> Result<StructureReport, SitescopeError> {
        Ok(StructureReport {
            title: "Example".to_string(),
            meta_description: Some("An example page".to_string()),
            has_h1: true,
            images_have_alt: true,
            has_robots_txt: true,
            has_sitemap: false,
            recommendations: vec![],
        })
    }
}

pub struct FailingStructure;

#[async_trait]
impl StructureProbe for FailingStructure {
    async fn probe(&self, _url: &str) -> Result<StructureReport, SitescopeError> {
        Err(SitescopeError::Fetch("page fetch failed: connection refused".into()))
    }
}

/// Analyzers where every AI provider, the metrics fetch, and the structure
/// probe succeed instantly.
pub fn analyzers_all_ok() -> Analyzers {
    let registry = ProviderRegistry::new()
        .with_provider(
            AnalysisKind::Gemini,
            Arc::new(StaticProvider { name: "gemini", text: "gemini analysis" }),
        )
        .with_provider(
            AnalysisKind::Claude,
            Arc::new(StaticProvider { name: "claude", text: "claude analysis" }),
        )
        .with_provider(
            AnalysisKind::Chatgpt,
            Arc::new(StaticProvider { name: "chatgpt", text: "chatgpt analysis" }),
        );
    Analyzers {
        ai: registry,
        pagespeed: Arc::new(StaticMetrics),
        structure: Arc::new(StaticStructure),
    }
}
