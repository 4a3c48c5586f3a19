use crate::runner::state::{CaseResult, RunSummary};
use serde::{Deserialize, Serialize};

/// Everything the HTML renderer needs for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub generated_at: String,
    /// The harness invocation itself, as typed by the user
    pub command_line: String,
    pub cases: Vec<CaseResult>,
    pub summary: RunSummary,
}
