use crate::error::{ResumeExtractError, Result};
use crate::pipeline::{BatchResult, BatchStatus};
use crate::recognizer::ResumeRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub status: String,
    pub summary: BatchSummary,
    pub records: Vec<ResumeRecord>,
    pub failures: Vec<FailureEntry>,
    pub skipped: Vec<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    pub path: String,
    pub kind: String,
    pub reason: String,
}

impl BatchReport {
    pub fn from_result(result: &BatchResult) -> Self {
        let failures = result
            .failures
            .iter()
            .map(|f| FailureEntry {
                path: f.path.display().to_string(),
                kind: f.error.kind().to_string(),
                reason: f.reason(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            status: status_name(result.status()).to_string(),
            summary: BatchSummary {
                total: result.total,
                succeeded: result.successes.len(),
                failed: result.failures.len(),
                skipped: result.skipped.len(),
                duration_ms: result.elapsed.as_millis() as u64,
            },
            records: result.successes.clone(),
            failures,
            skipped: result
                .skipped
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            output_path: None,
        }
    }

    pub fn with_output_path(mut self, path: &Path) -> Self {
        self.output_path = Some(path.display().to_string());
        self
    }

    /// `out/people.csv` -> `out/people.report.json`
    pub fn path_for(csv_path: &Path) -> PathBuf {
        let stem = csv_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "extracted_data".to_string());
        csv_path.with_file_name(format!("{}.report.json", stem))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ResumeExtractError::Config {
            message: format!("Failed to serialize report to JSON: {}", e),
        })
    }

    /// Saves the report beside `csv_path` and returns where it went.
    pub fn save_next_to(&self, csv_path: &Path) -> Result<PathBuf> {
        let report_path = Self::path_for(csv_path);
        std::fs::write(&report_path, self.to_json()?)?;
        tracing::debug!(path = %report_path.display(), "saved batch report");
        Ok(report_path)
    }
}

pub fn status_name(status: BatchStatus) -> &'static str {
    match status {
        BatchStatus::NothingSubmitted => "nothing_submitted",
        BatchStatus::Completed => "completed",
        BatchStatus::NoResults => "no_results",
        BatchStatus::Cancelled => "cancelled",
    }
}
