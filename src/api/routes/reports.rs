use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::errors::SitescopeError;
use crate::models::AnalysisRequest;
use crate::tasks::dispatch_report;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<(StatusCode, Json<Value>), SitescopeError> {
    let report_id = dispatch_report(&state.store, &state.queue, &request)?;
    Ok((StatusCode::CREATED, Json(json!({ "reportId": report_id }))))
}

/// The evolving report record: lifecycle state plus the per-section partial
/// results, so clients see sub-analysis errors inline while others run.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let report = match state.store.get_report(&id) {
        Ok(Some(report)) => report,
        Ok(None) => {
            return Err((StatusCode::NOT_FOUND, Json(json!({"error": "Report not found"}))))
        }
        Err(e) => {
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))))
        }
    };

    let results = state
        .store
        .get_sub_results(&id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))))?;

    Ok(Json(json!({
        "id": report.id,
        "websiteUrl": report.website_url,
        "status": report.status,
        "expected": report.expected,
        "results": results,
        "finalReport": report.final_report,
        "error": report.error,
        "createdAt": report.created_at,
        "completedAt": report.completed_at,
    })))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);

    let reports = state
        .store
        .list_reports(limit, offset)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))))?;

    Ok(Json(json!({ "reports": reports, "total": reports.len() })))
}
