use serde::{Deserialize, Serialize};

use super::report::AnalysisKind;

/// Payload for one queued sub-analysis. AI-provider tasks carry the business
/// metadata their prompt needs; pagespeed/structure tasks only need the URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMessage {
    pub report_id: String,
    pub analysis_type: AnalysisKind,
    pub website_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Payload for the PDF/email task enqueued once per completed report that
/// carried a contact email. Consumed by an out-of-scope delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTask {
    pub document_id: String,
    pub recipient_email: String,
}
