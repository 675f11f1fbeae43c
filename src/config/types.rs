use serde::{Deserialize, Serialize};

use crate::models::AnalysisKind;

/// Top-level configuration. Loaded once and snapshotted per dispatch; the
/// running system never mutates a loaded config in place.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SitescopeConfig {
    pub server: Option<ServerConfig>,
    pub providers: Option<ProvidersConfig>,
    pub pagespeed: Option<PageSpeedConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub gemini: Option<ProviderConfig>,
    pub claude: Option<ProviderConfig>,
    pub chatgpt: Option<ProviderConfig>,
}

impl ProvidersConfig {
    pub fn get(&self, kind: AnalysisKind) -> Option<&ProviderConfig> {
        match kind {
            AnalysisKind::Gemini => self.gemini.as_ref(),
            AnalysisKind::Claude => self.claude.as_ref(),
            AnalysisKind::Chatgpt => self.chatgpt.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Credential value or `$ENV_VAR` reference.
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { enabled: true, api_key: None, model: None }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PageSpeedConfig {
    pub api_key: Option<String>,
}

fn default_enabled() -> bool {
    true
}
