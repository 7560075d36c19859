//! Result and report types produced by the preparation pipeline.
//!
//! These are serde-serializable so the CLI can emit them as JSON.

use serde::{Deserialize, Serialize};

/// Missing-value percentages for one column, measured before and after the
/// cleaning step over the row count captured at entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub name: String,
    pub missing_before_pct: f64,
    pub missing_after_pct: f64,
}

/// Observability report emitted by the cleaner. Not used for control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanReport {
    /// Row count captured when cleaning started.
    pub rows: usize,
    /// Per-column missing percentages, in table column order.
    pub columns: Vec<ColumnMissing>,
}

impl CleanReport {
    /// Missing stats for a single column, if it exists.
    pub fn column(&self, name: &str) -> Option<&ColumnMissing> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Summary of a full load → clean → combine → publish run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepReport {
    /// Path of the input file.
    pub input_file: String,

    /// Shape of the raw table as loaded (rows, columns).
    pub raw_shape: (usize, usize),
    /// Shape of the staged table as written (rows, columns).
    pub staged_shape: (usize, usize),

    /// Path of the staged snapshot.
    pub staging_file: String,

    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Missing-value report from the cleaning step.
    pub clean_report: CleanReport,

    /// Human-readable log of the steps taken, in order.
    pub steps: Vec<String>,

    /// Non-fatal problems encountered during the run (e.g. a failed preview
    /// sample write).
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report_column_lookup() {
        let report = CleanReport {
            rows: 10,
            columns: vec![ColumnMissing {
                name: "TITLE".to_string(),
                missing_before_pct: 20.0,
                missing_after_pct: 0.0,
            }],
        };
        assert!(report.column("TITLE").is_some());
        assert!(report.column("DESCRIPTION").is_none());
    }

    #[test]
    fn test_prep_report_serialization() {
        let report = PrepReport {
            input_file: "train.csv".to_string(),
            raw_shape: (5, 6),
            staged_shape: (5, 6),
            staging_file: "Data/Staging/train.csv".to_string(),
            duration_ms: 12,
            clean_report: CleanReport {
                rows: 5,
                columns: Vec::new(),
            },
            steps: vec!["loaded".to_string()],
            warnings: Vec::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"raw_shape\":[5,6]"));
        let back: PrepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.duration_ms, 12);
    }
}
