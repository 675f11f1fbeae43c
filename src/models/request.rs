use serde::{Deserialize, Serialize};

/// Inbound analysis request. Everything but the URL is optional; the
/// dispatcher rejects a missing/empty URL before any report exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    pub website_url: Option<String>,
    pub email: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    /// AI provider ids to enable; absent means all supported providers.
    pub enabled_services: Option<Vec<String>>,
}
