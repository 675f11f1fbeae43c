pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS reports (
    id TEXT PRIMARY KEY,
    website_url TEXT NOT NULL,
    email TEXT,
    industry TEXT,
    location TEXT,
    company_name TEXT,
    expected TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'processing',
    final_report TEXT,
    error_message TEXT,
    created_at TEXT NOT NULL,
    completed_at TEXT
);

CREATE TABLE IF NOT EXISTS sub_results (
    report_id TEXT NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
    analysis_type TEXT NOT NULL,
    result TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (report_id, analysis_type)
);

CREATE INDEX IF NOT EXISTS idx_reports_status ON reports(status);
CREATE INDEX IF NOT EXISTS idx_sub_results_report ON sub_results(report_id);
";
