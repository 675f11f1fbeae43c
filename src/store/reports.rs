use chrono::Utc;
use serde_json::Value;

use crate::errors::SitescopeError;
use crate::models::{Report, ReportStatus};

use super::ReportStore;

impl ReportStore {
    pub fn create_report(&self, report: &Report) -> Result<(), SitescopeError> {
        let expected = serde_json::to_string(&report.expected)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO reports (id, website_url, email, industry, location, company_name, expected, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                report.id,
                report.website_url,
                report.email,
                report.industry,
                report.location,
                report.company_name,
                expected,
                report.status.as_str(),
                report.created_at,
            ],
        )
        .map_err(|e| SitescopeError::Store(format!("Failed to create report: {}", e)))?;
        Ok(())
    }

    pub fn get_report(&self, id: &str) -> Result<Option<Report>, SitescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, website_url, email, industry, location, company_name, expected, status, final_report, error_message, created_at, completed_at
                 FROM reports WHERE id = ?1",
            )
            .map_err(|e| SitescopeError::Store(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, Option<String>>(8)?,
                row.get::<_, Option<String>>(9)?,
                row.get::<_, String>(10)?,
                row.get::<_, Option<String>>(11)?,
            ))
        });

        let row = match result {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(SitescopeError::Store(format!("Query error: {}", e))),
        };

        let final_report = match row.8 {
            Some(json) => Some(serde_json::from_str::<Value>(&json)?),
            None => None,
        };
        Ok(Some(Report {
            id: row.0,
            website_url: row.1,
            email: row.2,
            industry: row.3,
            location: row.4,
            company_name: row.5,
            expected: serde_json::from_str(&row.6)?,
            status: row.7.parse()?,
            final_report,
            error: row.9,
            created_at: row.10,
            completed_at: row.11,
        }))
    }

    pub fn list_reports(&self, limit: usize, offset: usize) -> Result<Vec<Value>, SitescopeError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, website_url, status, created_at, completed_at FROM reports
                 ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
            )
            .map_err(|e| SitescopeError::Store(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![limit as i64, offset as i64], |row| {
                Ok(serde_json::json!({
                    "id": row.get::<_, String>(0)?,
                    "websiteUrl": row.get::<_, String>(1)?,
                    "status": row.get::<_, String>(2)?,
                    "createdAt": row.get::<_, String>(3)?,
                    "completedAt": row.get::<_, Option<String>>(4)?,
                }))
            })
            .map_err(|e| SitescopeError::Store(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| SitescopeError::Store(format!("Row error: {}", e)))?);
        }
        Ok(results)
    }

    /// Conditional processing→completed transition. Returns true only for
    /// the single caller whose update takes effect; racing finalizers see
    /// false and must not repeat completion side effects.
    pub fn try_finalize(&self, id: &str, final_report: &Value) -> Result<bool, SitescopeError> {
        let json = serde_json::to_string(final_report)?;
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute(
                "UPDATE reports SET status = ?2, final_report = ?3, completed_at = ?4
                 WHERE id = ?1 AND status = ?5",
                rusqlite::params![
                    id,
                    ReportStatus::Completed.as_str(),
                    json,
                    Utc::now().to_rfc3339(),
                    ReportStatus::Processing.as_str(),
                ],
            )
            .map_err(|e| SitescopeError::Store(format!("Finalize failed: {}", e)))?;
        Ok(affected > 0)
    }

    /// Force-fail a report that could not be dispatched. Guarded the same
    /// way as finalization so a completed report is never demoted.
    pub fn mark_failed(&self, id: &str, message: &str) -> Result<(), SitescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE reports SET status = ?2, error_message = ?3, completed_at = ?4
             WHERE id = ?1 AND status = ?5",
            rusqlite::params![
                id,
                ReportStatus::Failed.as_str(),
                message,
                Utc::now().to_rfc3339(),
                ReportStatus::Processing.as_str(),
            ],
        )
        .map_err(|e| SitescopeError::Store(format!("Mark failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisKind;
    use serde_json::json;

    fn sample_report(id: &str) -> Report {
        Report {
            id: id.to_string(),
            website_url: "https://example.com".to_string(),
            email: Some("owner@example.com".to_string()),
            industry: Some("retail".to_string()),
            location: None,
            company_name: Some("Acme".to_string()),
            expected: vec![AnalysisKind::Gemini, AnalysisKind::Pagespeed, AnalysisKind::Structure],
            status: ReportStatus::Processing,
            final_report: None,
            error: None,
            created_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    #[test]
    fn test_create_and_get_report() {
        let store = ReportStore::in_memory().unwrap();
        store.create_report(&sample_report("r1")).unwrap();

        let report = store.get_report("r1").unwrap().unwrap();
        assert_eq!(report.website_url, "https://example.com");
        assert_eq!(report.status, ReportStatus::Processing);
        assert_eq!(report.expected.len(), 3);
        assert!(report.final_report.is_none());
    }

    #[test]
    fn test_get_nonexistent_report() {
        let store = ReportStore::in_memory().unwrap();
        assert!(store.get_report("nope").unwrap().is_none());
    }

    #[test]
    fn test_try_finalize_is_exactly_once() {
        let store = ReportStore::in_memory().unwrap();
        store.create_report(&sample_report("r2")).unwrap();

        let final_report = json!({"aiAnalysis": {}});
        assert!(store.try_finalize("r2", &final_report).unwrap());
        // Second finalizer loses the conditional update
        assert!(!store.try_finalize("r2", &final_report).unwrap());

        let report = store.get_report("r2").unwrap().unwrap();
        assert_eq!(report.status, ReportStatus::Completed);
        assert!(report.completed_at.is_some());
        assert_eq!(report.final_report.unwrap()["aiAnalysis"], json!({}));
    }

    #[test]
    fn test_mark_failed_does_not_demote_completed() {
        let store = ReportStore::in_memory().unwrap();
        store.create_report(&sample_report("r3")).unwrap();
        store.try_finalize("r3", &json!({})).unwrap();

        store.mark_failed("r3", "late failure").unwrap();
        let report = store.get_report("r3").unwrap().unwrap();
        assert_eq!(report.status, ReportStatus::Completed);
    }

    #[test]
    fn test_mark_failed_sets_error() {
        let store = ReportStore::in_memory().unwrap();
        store.create_report(&sample_report("r4")).unwrap();
        store.mark_failed("r4", "dispatch exploded").unwrap();

        let report = store.get_report("r4").unwrap().unwrap();
        assert_eq!(report.status, ReportStatus::Failed);
        assert_eq!(report.error.as_deref(), Some("dispatch exploded"));
    }

    #[test]
    fn test_list_reports_pagination() {
        let store = ReportStore::in_memory().unwrap();
        for i in 0..5 {
            store.create_report(&sample_report(&format!("r{}", i))).unwrap();
        }
        assert_eq!(store.list_reports(10, 0).unwrap().len(), 5);
        assert_eq!(store.list_reports(2, 0).unwrap().len(), 2);
        assert_eq!(store.list_reports(10, 4).unwrap().len(), 1);
    }
}
