use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::parser::types::TestCase;

/// Terminal classification of one case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed,
    TimedOut,
}

impl CaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "PASS",
            CaseStatus::Failed => "FAIL",
            CaseStatus::TimedOut => "TIMEOUT",
        }
    }
}

/// Outcome of a single case, immutable once the child has been reaped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub case: TestCase,
    pub status: CaseStatus,
    /// Raw child exit code; `None` when the child was killed by the harness
    /// or died to a signal
    pub exit_code: Option<i32>,
    pub log_path: PathBuf,
    pub duration_ms: u64,
}

impl CaseResult {
    /// Exit code as shown in the report; killed children get a sentinel
    /// instead of a number.
    pub fn exit_display(&self) -> String {
        match self.exit_code {
            Some(code) => code.to_string(),
            None => "KILLED".to_string(),
        }
    }
}

/// Aggregate counters for the report header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub timed_out: u32,
}

impl RunSummary {
    pub fn from_results(results: &[CaseResult]) -> Self {
        let mut summary = RunSummary::default();
        for result in results {
            summary.total += 1;
            match result.status {
                CaseStatus::Passed => summary.passed += 1,
                CaseStatus::Failed => summary.failed += 1,
                CaseStatus::TimedOut => summary.timed_out += 1,
            }
        }
        summary
    }

    /// Percentage of passed cases; zero for an empty run.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: CaseStatus, exit_code: Option<i32>) -> CaseResult {
        CaseResult {
            case: TestCase {
                file_name: "clip.mp4".to_string(),
                scenario_name: "scenario".to_string(),
            },
            status,
            exit_code,
            log_path: PathBuf::from("logs/scenario.log"),
            duration_ms: 10,
        }
    }

    #[test]
    fn test_summary_counts_every_status() {
        let results = vec![
            result(CaseStatus::Passed, Some(0)),
            result(CaseStatus::Failed, Some(1)),
            result(CaseStatus::Passed, Some(0)),
            result(CaseStatus::TimedOut, None),
        ];

        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.timed_out, 1);
        assert_eq!(
            summary.passed + summary.failed + summary.timed_out,
            summary.total
        );
    }

    #[test]
    fn test_pass_rate() {
        let results = vec![
            result(CaseStatus::Passed, Some(0)),
            result(CaseStatus::Failed, Some(2)),
        ];

        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.pass_rate(), 50.0);
    }

    #[test]
    fn test_pass_rate_of_empty_run_is_zero() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary.pass_rate(), 0.0);
    }

    #[test]
    fn test_exit_display_sentinel() {
        assert_eq!(result(CaseStatus::TimedOut, None).exit_display(), "KILLED");
        assert_eq!(result(CaseStatus::Failed, Some(18)).exit_display(), "18");
    }
}
