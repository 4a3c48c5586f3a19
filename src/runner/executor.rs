use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;

use super::state::{CaseResult, CaseStatus};
use crate::parser::types::TestCase;

/// How the validator is invoked for every case
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Resolved path of the validator executable
    pub validator: PathBuf,
    /// Base directory holding `<scenario_name>.scenario` files
    pub scenario_dir: PathBuf,
    /// Directory receiving one log file per case
    pub log_dir: PathBuf,
    /// Wall clock budget per case; `None` runs unbounded
    pub timeout: Option<Duration>,
}

impl RunConfig {
    /// Argument vector for one case, without the program itself.
    pub fn command_args(&self, case: &TestCase) -> Vec<String> {
        let scenario_path = self.scenario_dir.join(case.scenario_file());
        vec![
            "playbin".to_string(),
            format!("uri={}", case.uri()),
            "flags=99".to_string(),
            "--set-scenario".to_string(),
            scenario_path.display().to_string(),
        ]
    }

    /// Full command line as written to the log header.
    pub fn command_display(&self, case: &TestCase) -> String {
        format!(
            "{} {}",
            self.validator.display(),
            self.command_args(case).join(" ")
        )
    }
}

/// Run one case to completion and classify the outcome.
///
/// The log file is created before the child starts; both child streams are
/// attached to it directly, so anything the validator printed before a
/// timeout kill is already on disk.
pub async fn run_case(config: &RunConfig, case: &TestCase) -> Result<CaseResult> {
    let log_path = config.log_dir.join(case.log_file());
    let args = config.command_args(case);

    let mut log = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;
    let header = format!(
        "Command: {}\n{}\n",
        config.command_display(case),
        "=".repeat(50)
    );
    log.write_all(header.as_bytes())
        .with_context(|| format!("Failed to write log header: {}", log_path.display()))?;
    log.flush()
        .with_context(|| format!("Failed to flush log header: {}", log_path.display()))?;

    let stdout = log.try_clone().context("Failed to clone log handle")?;
    let stderr = log.try_clone().context("Failed to clone log handle")?;

    log::debug!("Spawning: {}", config.command_display(case));

    let started = Instant::now();
    let mut child = Command::new(&config.validator)
        .args(&args)
        // Keeps ANSI color codes out of the captured log. Scoped to the
        // child so the harness environment stays untouched.
        .env("GST_DEBUG_NO_COLOR", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .spawn()
        .with_context(|| format!("Failed to spawn validator: {}", config.validator.display()))?;

    let (status, exit_code) = match config.timeout {
        Some(budget) => match tokio::time::timeout(budget, child.wait()).await {
            Ok(exit) => classify(exit.context("Failed to wait for validator")?),
            Err(_) => {
                child
                    .kill()
                    .await
                    .context("Failed to kill timed out validator")?;
                writeln!(
                    log,
                    "\n\n[!!!] TEST TIMEOUT EXCEEDED ({}s) - KILLED BY HARNESS",
                    budget.as_secs()
                )
                .with_context(|| format!("Failed to append timeout marker: {}", log_path.display()))?;
                (CaseStatus::TimedOut, None)
            }
        },
        None => classify(child.wait().await.context("Failed to wait for validator")?),
    };

    log.flush()
        .with_context(|| format!("Failed to flush log file: {}", log_path.display()))?;

    Ok(CaseResult {
        case: case.clone(),
        status,
        exit_code,
        log_path,
        duration_ms: started.elapsed().as_millis() as u64,
    })
}

fn classify(exit: ExitStatus) -> (CaseStatus, Option<i32>) {
    if exit.success() {
        (CaseStatus::Passed, Some(0))
    } else {
        // code() is None when the child died to a signal; rendered with the
        // same sentinel as a timeout kill.
        (CaseStatus::Failed, exit.code())
    }
}
