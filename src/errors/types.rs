use thiserror::Error;

/// Error scoped to a single provider call. Recorded into the report's
/// partial results, never propagated across sub-analyses.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("provider '{0}' is not configured")]
    NotConfigured(String),

    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum SitescopeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
