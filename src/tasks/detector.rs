use std::collections::{BTreeMap, HashSet};

use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::errors::SitescopeError;
use crate::models::{AnalysisKind, DeliveryTask, Report, SubResult};

use super::queue::TaskQueue;

/// Completion check, invoked after every partial-result merge.
///
/// Correct under any interleaving of worker completions: the decision is
/// made from store state alone, and the processing→completed transition is
/// a conditional update, so concurrent triggers converge on exactly one
/// finalization (and exactly one delivery enqueue).
pub fn on_result_written(queue: &TaskQueue, report_id: &str) -> Result<(), SitescopeError> {
    let store = queue.store();
    let Some(report) = store.get_report(report_id)? else {
        warn!(report_id, "Completion trigger for unknown report");
        return Ok(());
    };

    // Duplicate trigger after finalization: nothing to do
    if report.status.is_terminal() {
        return Ok(());
    }

    let results = store.get_sub_results(report_id)?;
    let done: HashSet<&str> = results
        .iter()
        .filter(|(_, result)| result.is_done())
        .map(|(key, _)| key.as_str())
        .collect();

    if !report.expected.iter().all(|kind| done.contains(kind.as_str())) {
        debug!(
            report_id,
            done = done.len(),
            expected = report.expected.len(),
            "Report not yet complete"
        );
        return Ok(());
    }

    let final_report = assemble_final_report(&report, &results)?;
    if store.try_finalize(report_id, &final_report)? {
        info!(report_id, sections = results.len(), "Report finalized");
        if let Some(email) = &report.email {
            queue.publish_delivery(DeliveryTask {
                document_id: report_id.to_string(),
                recipient_email: email.clone(),
            });
        }
    }
    Ok(())
}

/// Merge the partial results into the final report shape: AI-provider
/// sections grouped under one object, pagespeed and structure standalone.
/// Error and skipped outcomes stay visible inline per section.
pub fn assemble_final_report(
    report: &Report,
    results: &BTreeMap<String, SubResult>,
) -> Result<Value, SitescopeError> {
    let mut ai_analysis = Map::new();
    let mut page_speed = Value::Null;
    let mut website_structure = Value::Null;

    for (key, result) in results {
        let value = serde_json::to_value(result)?;
        match key.parse::<AnalysisKind>() {
            Ok(AnalysisKind::Pagespeed) => page_speed = value,
            Ok(AnalysisKind::Structure) => website_structure = value,
            Ok(kind) if kind.is_ai_provider() => {
                ai_analysis.insert(key.clone(), value);
            }
            _ => {
                warn!(key = %key, "Ignoring result under unknown analysis key");
            }
        }
    }

    Ok(json!({
        "websiteUrl": report.website_url,
        "aiAnalysis": ai_analysis,
        "pageSpeed": page_speed,
        "websiteStructure": website_structure,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportStatus;
    use chrono::Utc;

    fn report_with_expected(expected: Vec<AnalysisKind>) -> Report {
        Report {
            id: "r1".into(),
            website_url: "https://example.com".into(),
            email: None,
            industry: None,
            location: None,
            company_name: None,
            expected,
            status: ReportStatus::Processing,
            final_report: None,
            error: None,
            created_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    #[test]
    fn test_assemble_groups_sections_by_kind() {
        let report = report_with_expected(vec![
            AnalysisKind::Gemini,
            AnalysisKind::Pagespeed,
            AnalysisKind::Structure,
        ]);
        let mut results = BTreeMap::new();
        results.insert(
            "gemini".to_string(),
            SubResult::completed(json!({"text": "great site"}), "gemini"),
        );
        results.insert(
            "pagespeed".to_string(),
            SubResult::completed(json!({"metrics": {"score": 0.9}}), "pagespeed"),
        );
        results.insert("structure".to_string(), SubResult::error("fetch failed"));

        let merged = assemble_final_report(&report, &results).unwrap();
        assert_eq!(merged["aiAnalysis"]["gemini"]["status"], "completed");
        assert_eq!(merged["aiAnalysis"]["gemini"]["payload"]["text"], "great site");
        assert_eq!(merged["pageSpeed"]["status"], "completed");
        assert_eq!(merged["websiteStructure"]["status"], "error");
        assert_eq!(merged["websiteStructure"]["message"], "fetch failed");
    }

    #[test]
    fn test_assemble_with_no_results_is_empty_shell() {
        let report = report_with_expected(vec![AnalysisKind::Gemini]);
        let merged = assemble_final_report(&report, &BTreeMap::new()).unwrap();
        assert_eq!(merged["aiAnalysis"], json!({}));
        assert!(merged["pageSpeed"].is_null());
        assert!(merged["websiteStructure"].is_null());
    }
}
