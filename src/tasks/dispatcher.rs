use chrono::Utc;
use tracing::info;

use crate::errors::SitescopeError;
use crate::models::{AnalysisKind, AnalysisRequest, Report, ReportStatus, TaskMessage};
use crate::store::ReportStore;

use super::queue::TaskPublisher;

/// Create one report and fan its expected sub-analyses out as independent
/// task messages. Returns the new report id.
///
/// Exactly one report row and exactly |expected| messages result from a
/// valid request; invalid input is rejected before any report exists.
pub fn dispatch_report(
    store: &ReportStore,
    publisher: &dyn TaskPublisher,
    request: &AnalysisRequest,
) -> Result<String, SitescopeError> {
    let url = request
        .website_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| SitescopeError::InvalidRequest("websiteUrl is required".into()))?;

    let ai_kinds = resolve_enabled_services(request.enabled_services.as_deref())?;

    let mut expected = ai_kinds;
    expected.push(AnalysisKind::Pagespeed);
    expected.push(AnalysisKind::Structure);

    let id = uuid::Uuid::new_v4().to_string();
    let report = Report {
        id: id.clone(),
        website_url: url.to_string(),
        email: request.email.clone(),
        industry: request.industry.clone(),
        location: request.location.clone(),
        company_name: request.company_name.clone(),
        expected: expected.clone(),
        status: ReportStatus::Processing,
        final_report: None,
        error: None,
        created_at: Utc::now().to_rfc3339(),
        completed_at: None,
    };
    store.create_report(&report)?;

    for kind in &expected {
        // Only AI prompts need the business metadata
        let is_ai = kind.is_ai_provider();
        publisher.publish(TaskMessage {
            report_id: id.clone(),
            analysis_type: *kind,
            website_url: url.to_string(),
            industry: if is_ai { request.industry.clone() } else { None },
            company_name: if is_ai { request.company_name.clone() } else { None },
            location: if is_ai { request.location.clone() } else { None },
        });
    }

    info!(report_id = %id, expected = expected.len(), url, "Report dispatched");
    Ok(id)
}

/// An explicit service list enables exactly those AI providers; absence
/// enables all supported ones. Unknown or non-AI identifiers are rejected.
fn resolve_enabled_services(
    services: Option<&[String]>,
) -> Result<Vec<AnalysisKind>, SitescopeError> {
    let Some(services) = services else {
        return Ok(AnalysisKind::AI_PROVIDERS.to_vec());
    };

    let mut kinds = Vec::new();
    for service in services {
        let kind: AnalysisKind = service.parse()?;
        if !kind.is_ai_provider() {
            return Err(SitescopeError::InvalidRequest(format!(
                "'{}' is always analyzed and cannot be requested as an AI service",
                service
            )));
        }
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
