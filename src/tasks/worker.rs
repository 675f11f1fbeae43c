use tracing::{error, info, warn};

use crate::errors::ProviderError;
use crate::models::{AnalysisKind, SubResult, TaskMessage};

use super::detector;
use super::queue::{Analyzers, TaskQueue};

/// Run one queued sub-analysis to its terminal state.
///
/// The merge contract: exactly one SubResult lands at this worker's key,
/// whatever happens upstream. Failures become recorded error results, never
/// raised ones, so siblings and the completion detector keep making
/// progress. Only a store failure aborts the invocation, and it touches no
/// other key.
pub async fn run_task(queue: &TaskQueue, msg: TaskMessage) {
    let result = execute(queue.analyzers(), &msg).await;
    info!(
        report_id = %msg.report_id,
        analysis = %msg.analysis_type,
        outcome = outcome_label(&result),
        "Sub-analysis finished"
    );

    if let Err(e) = queue.store().upsert_sub_result(&msg.report_id, msg.analysis_type, &result) {
        error!(report_id = %msg.report_id, analysis = %msg.analysis_type, error = %e, "Failed to merge sub result");
        // A report missing a merge would never reach the completion rule;
        // park it in a terminal state instead of leaving it processing.
        if let Err(e) = queue
            .store()
            .mark_failed(&msg.report_id, &format!("failed to record '{}' result", msg.analysis_type))
        {
            error!(report_id = %msg.report_id, error = %e, "Failed to mark report failed");
        }
        return;
    }

    // Every merge triggers the completion detector
    if let Err(e) = detector::on_result_written(queue, &msg.report_id) {
        warn!(report_id = %msg.report_id, error = %e, "Completion check failed");
    }
}

async fn execute(analyzers: &Analyzers, msg: &TaskMessage) -> SubResult {
    match msg.analysis_type {
        AnalysisKind::Pagespeed => match analyzers.pagespeed.fetch_metrics(&msg.website_url).await
        {
            Ok(payload) => SubResult::completed(payload, analyzers.pagespeed.provider_name()),
            Err(ProviderError::NotConfigured(provider)) => {
                SubResult::skipped(format!("provider '{}' is not configured", provider))
            }
            Err(e) => SubResult::error(e.to_string()),
        },
        AnalysisKind::Structure => match analyzers.structure.probe(&msg.website_url).await {
            Ok(report) => match serde_json::to_value(&report) {
                Ok(payload) => SubResult::completed(payload, "structure"),
                Err(e) => SubResult::error(format!("structure report serialization: {}", e)),
            },
            Err(e) => SubResult::error(e.to_string()),
        },
        ai_kind => run_ai_analysis(analyzers, ai_kind, msg).await,
    }
}

async fn run_ai_analysis(
    analyzers: &Analyzers,
    kind: AnalysisKind,
    msg: &TaskMessage,
) -> SubResult {
    // An unconfigured provider short-circuits before any network I/O
    let Some(provider) = analyzers.ai.get(kind) else {
        return SubResult::skipped(format!("provider '{}' is not configured", kind));
    };

    let prompt = analysis_prompt(msg);
    match provider.generate(&prompt).await {
        Ok(response) => SubResult::completed(response.into_payload(), provider.provider_name()),
        Err(ProviderError::NotConfigured(p)) => {
            SubResult::skipped(format!("provider '{}' is not configured", p))
        }
        Err(e) => SubResult::error(e.to_string()),
    }
}

fn analysis_prompt(msg: &TaskMessage) -> String {
    let mut prompt = format!(
        "Analyze the website {} and provide an SEO and digital marketing assessment.",
        msg.website_url
    );
    if let Some(company) = &msg.company_name {
        prompt.push_str(&format!(" The site belongs to {}.", company));
    }
    if let Some(industry) = &msg.industry {
        prompt.push_str(&format!(" The business operates in the {} industry.", industry));
    }
    if let Some(location) = &msg.location {
        prompt.push_str(&format!(" It serves customers in {}.", location));
    }
    prompt.push_str(
        " Cover content quality, keyword opportunities, and concrete improvement suggestions.",
    );
    prompt
}

fn outcome_label(result: &SubResult) -> &'static str {
    match result {
        SubResult::Completed { .. } => "completed",
        SubResult::Error { .. } => "error",
        SubResult::Skipped { .. } => "skipped",
    }
}
