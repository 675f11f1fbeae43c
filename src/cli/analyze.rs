use std::time::{Duration, Instant};

use serde_json::json;
use tracing::info;

use crate::errors::SitescopeError;
use crate::models::AnalysisRequest;
use crate::store::ReportStore;
use crate::tasks::{dispatch_report, spawn_delivery_consumer, Analyzers, TaskQueue};

use super::commands::AnalyzeArgs;
use super::load_config;

/// Headless one-shot: dispatch, wait for the detector to finalize, print
/// the report as JSON.
pub async fn handle_analyze(args: AnalyzeArgs) -> Result<(), SitescopeError> {
    let config = load_config(args.config.as_deref()).await?;
    let analyzers = Analyzers::from_config(&config)?;
    let store = ReportStore::in_memory()?;
    let (queue, delivery_rx) = TaskQueue::new(store.clone(), analyzers);
    spawn_delivery_consumer(delivery_rx);

    let request = AnalysisRequest {
        website_url: Some(args.url.clone()),
        email: args.email.clone(),
        industry: args.industry.clone(),
        location: args.location.clone(),
        company_name: args.company_name.clone(),
        enabled_services: if args.services.is_empty() { None } else { Some(args.services.clone()) },
    };

    let report_id = dispatch_report(&store, &queue, &request)?;
    info!(report_id = %report_id, url = %args.url, "Analysis dispatched");

    let deadline = Instant::now() + Duration::from_secs(args.timeout);
    loop {
        tokio::time::sleep(Duration::from_millis(250)).await;

        let report = store
            .get_report(&report_id)?
            .ok_or_else(|| SitescopeError::Internal("dispatched report vanished".into()))?;
        if report.status.is_terminal() && queue.pending(&report_id) == 0 {
            let results = store.get_sub_results(&report_id)?;
            let output = json!({
                "id": report.id,
                "websiteUrl": report.website_url,
                "status": report.status,
                "results": results,
                "finalReport": report.final_report,
                "error": report.error,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(SitescopeError::Internal(format!(
                "report {} did not complete within {}s",
                report_id, args.timeout
            )));
        }
    }
}
