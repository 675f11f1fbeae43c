use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::config::{resolve_api_key, ProvidersConfig};
use crate::errors::SitescopeError;
use crate::models::AnalysisKind;

use super::provider::AiProvider;
use super::router::create_provider;

fn default_key_env(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Gemini => "GEMINI_API_KEY",
        AnalysisKind::Claude => "ANTHROPIC_API_KEY",
        AnalysisKind::Chatgpt => "OPENAI_API_KEY",
        _ => "",
    }
}

/// Holds one adapter per AI provider that has a resolvable credential.
/// A provider absent from the registry is not configured; its worker
/// records a skipped result without touching the network.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<AnalysisKind, Arc<dyn AiProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a configuration snapshot. Disabled entries
    /// and entries with no resolvable credential are left out.
    pub fn from_config(providers: Option<&ProvidersConfig>) -> Result<Self, SitescopeError> {
        let mut registry = Self::new();
        let default_cfg = ProvidersConfig::default();
        let cfg = providers.unwrap_or(&default_cfg);

        for kind in AnalysisKind::AI_PROVIDERS {
            let provider_cfg = cfg.get(kind);
            if provider_cfg.map(|p| !p.enabled).unwrap_or(false) {
                continue;
            }
            let configured_key = provider_cfg.and_then(|p| p.api_key.as_deref());
            let Some(api_key) = resolve_api_key(configured_key, default_key_env(kind)) else {
                continue;
            };
            let model = provider_cfg.and_then(|p| p.model.as_deref());
            let provider = create_provider(kind, &api_key, model)?;
            info!(provider = %kind, model = provider.model_name(), "Provider configured");
            registry.providers.insert(kind, Arc::from(provider));
        }

        Ok(registry)
    }

    /// Inject a provider, replacing any existing adapter for the kind.
    /// Used by tests to substitute mock providers.
    pub fn with_provider(mut self, kind: AnalysisKind, provider: Arc<dyn AiProvider>) -> Self {
        self.providers.insert(kind, provider);
        self
    }

    pub fn get(&self, kind: AnalysisKind) -> Option<Arc<dyn AiProvider>> {
        self.providers.get(&kind).cloned()
    }

    pub fn is_configured(&self, kind: AnalysisKind) -> bool {
        self.providers.contains_key(&kind)
    }
}
