use serde::{Deserialize, Serialize};

/// One row of the input CSV: a media file and the scenario to validate it
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub file_name: String,
    pub scenario_name: String,
}

impl TestCase {
    /// Playback URI handed to the validator.
    pub fn uri(&self) -> String {
        format!("file:///streams/{}", self.file_name)
    }

    /// File name of the scenario definition, relative to the scenario base
    /// directory.
    pub fn scenario_file(&self) -> String {
        format!("{}.scenario", self.scenario_name)
    }

    /// File name of this case's log inside the log directory.
    pub fn log_file(&self) -> String {
        format!("{}.log", self.scenario_name)
    }
}
