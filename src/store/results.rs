use std::collections::BTreeMap;

use chrono::Utc;

use crate::errors::SitescopeError;
use crate::models::{AnalysisKind, SubResult};

use super::ReportStore;

impl ReportStore {
    /// Atomic per-key upsert into the partial result set. Each worker owns
    /// exactly one (report_id, analysis_type) key, so distinct workers can
    /// never clobber each other; a worker retrying its own attempt replaces
    /// its previous value (last-write-wins per key).
    pub fn upsert_sub_result(
        &self,
        report_id: &str,
        kind: AnalysisKind,
        result: &SubResult,
    ) -> Result<(), SitescopeError> {
        let json = serde_json::to_string(result)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sub_results (report_id, analysis_type, result, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(report_id, analysis_type)
             DO UPDATE SET result = excluded.result, updated_at = excluded.updated_at",
            rusqlite::params![report_id, kind.as_str(), json, Utc::now().to_rfc3339()],
        )
        .map_err(|e| SitescopeError::Store(format!("Failed to merge sub result: {}", e)))?;
        Ok(())
    }

    /// The accumulated partial result set for a report, keyed by
    /// sub-analysis identifier.
    pub fn get_sub_results(
        &self,
        report_id: &str,
    ) -> Result<BTreeMap<String, SubResult>, SitescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT analysis_type, result FROM sub_results WHERE report_id = ?1")
            .map_err(|e| SitescopeError::Store(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![report_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| SitescopeError::Store(format!("Query error: {}", e)))?;

        let mut results = BTreeMap::new();
        for row in rows {
            let (kind, json) =
                row.map_err(|e| SitescopeError::Store(format!("Row error: {}", e)))?;
            results.insert(kind, serde_json::from_str(&json)?);
        }
        Ok(results)
    }
}
