use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::TestCase;

/// Load the ordered list of test cases from a CSV file.
///
/// Each row is `file_name[,scenario_name]`. Lines starting with `#` are
/// comments, rows with an empty first field are skipped, and a missing
/// scenario column falls back to the file name.
pub fn load_cases(path: &Path) -> Result<Vec<TestCase>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input CSV: {}", path.display()))?;
    read_cases(file).with_context(|| format!("Failed to parse input CSV: {}", path.display()))
}

/// Parse test cases from any CSV byte stream.
pub fn read_cases<R: Read>(input: R) -> Result<Vec<TestCase>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(input);

    let mut cases = Vec::new();
    for result in rdr.records() {
        let record = result.context("Failed to parse CSV record")?;

        let file_name = match record.get(0).map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let scenario_name = match record.get(1).map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => file_name.clone(),
        };

        cases.push(TestCase {
            file_name,
            scenario_name,
        });
    }

    Ok(cases)
}
