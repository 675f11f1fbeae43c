use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SitescopeError;

/// One independently dispatched unit of analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Gemini,
    Claude,
    Chatgpt,
    Pagespeed,
    Structure,
}

impl AnalysisKind {
    pub const AI_PROVIDERS: [AnalysisKind; 3] =
        [AnalysisKind::Gemini, AnalysisKind::Claude, AnalysisKind::Chatgpt];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Gemini => "gemini",
            AnalysisKind::Claude => "claude",
            AnalysisKind::Chatgpt => "chatgpt",
            AnalysisKind::Pagespeed => "pagespeed",
            AnalysisKind::Structure => "structure",
        }
    }

    pub fn is_ai_provider(&self) -> bool {
        matches!(self, AnalysisKind::Gemini | AnalysisKind::Claude | AnalysisKind::Chatgpt)
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = SitescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(AnalysisKind::Gemini),
            "claude" => Ok(AnalysisKind::Claude),
            "chatgpt" => Ok(AnalysisKind::Chatgpt),
            "pagespeed" => Ok(AnalysisKind::Pagespeed),
            "structure" => Ok(AnalysisKind::Structure),
            other => Err(SitescopeError::InvalidRequest(format!(
                "unknown analysis service: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Processing,
    Completed,
    Failed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Processing => "processing",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReportStatus::Processing)
    }
}

impl FromStr for ReportStatus {
    type Err = SitescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(ReportStatus::Processing),
            "completed" => Ok(ReportStatus::Completed),
            "failed" => Ok(ReportStatus::Failed),
            other => Err(SitescopeError::Store(format!("unknown report status: {}", other))),
        }
    }
}

/// The aggregate record for one end-to-end analysis request.
///
/// Created once by the dispatcher with status `processing`; mutated only by
/// the completion detector (finalization) or the failed-dispatch path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub website_url: String,
    pub email: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub expected: Vec<AnalysisKind>,
    pub status: ReportStatus,
    pub final_report: Option<Value>,
    pub error: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

/// Outcome of one sub-analysis, merged into the report's partial result set
/// under that sub-analysis's key. Every variant is a terminal state: a
/// worker never leaves its key absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubResult {
    Completed {
        payload: Value,
        provider: String,
        timestamp: String,
    },
    Error {
        message: String,
        timestamp: String,
    },
    Skipped {
        reason: String,
        timestamp: String,
    },
}

impl SubResult {
    pub fn completed(payload: Value, provider: &str) -> Self {
        SubResult::Completed {
            payload,
            provider: provider.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SubResult::Error {
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        SubResult::Skipped {
            reason: reason.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether this sub-analysis counts toward completion. Errors and skips
    /// count as done so partial failure never stalls the report.
    pub fn is_done(&self) -> bool {
        matches!(
            self,
            SubResult::Completed { .. } | SubResult::Error { .. } | SubResult::Skipped { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_kind_round_trip() {
        for kind in [
            AnalysisKind::Gemini,
            AnalysisKind::Claude,
            AnalysisKind::Chatgpt,
            AnalysisKind::Pagespeed,
            AnalysisKind::Structure,
        ] {
            assert_eq!(kind.as_str().parse::<AnalysisKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_analysis_kind_unknown() {
        assert!("llama".parse::<AnalysisKind>().is_err());
    }

    #[test]
    fn test_ai_provider_classification() {
        assert!(AnalysisKind::Gemini.is_ai_provider());
        assert!(!AnalysisKind::Pagespeed.is_ai_provider());
        assert!(!AnalysisKind::Structure.is_ai_provider());
    }

    #[test]
    fn test_sub_result_serialization_tags() {
        let ok = SubResult::completed(json!({"text": "hi"}), "gemini");
        let v = serde_json::to_value(&ok).unwrap();
        assert_eq!(v["status"], "completed");
        assert_eq!(v["provider"], "gemini");

        let err = SubResult::error("boom");
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["message"], "boom");

        let skip = SubResult::skipped("no credential");
        let v = serde_json::to_value(&skip).unwrap();
        assert_eq!(v["status"], "skipped");
    }

    #[test]
    fn test_all_variants_count_as_done() {
        assert!(SubResult::completed(json!({}), "p").is_done());
        assert!(SubResult::error("e").is_done());
        assert!(SubResult::skipped("s").is_done());
    }
}
