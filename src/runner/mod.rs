pub mod executor;
pub mod state;

pub use state::*;

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

use crate::parser;
use crate::report::{self, types::RunReport};
use crate::utils::{archive, binary_resolver};
use executor::RunConfig;

/// Options for one harness run, straight from the CLI
#[derive(Debug, Clone)]
pub struct SuiteOptions {
    pub input_csv: PathBuf,
    pub output_html: PathBuf,
    pub log_dir: PathBuf,
    /// Validator executable name or path
    pub validator: String,
    pub scenario_dir: PathBuf,
    /// Per-case wall clock budget; `None` disables it
    pub timeout: Option<Duration>,
}

/// Drive the whole suite: load the cases, run each one in CSV order, write
/// the HTML report, then bundle the run artifacts into a tgz archive.
///
/// Cases run strictly one at a time; a failing or timed out case never stops
/// the run. File-level errors (unreadable CSV, unwritable log directory) do.
pub async fn run_suite(options: &SuiteOptions) -> Result<RunSummary> {
    let started_at = Local::now();
    let run_id = Uuid::new_v4().to_string();
    let command_line = std::env::args().collect::<Vec<_>>().join(" ");

    let validator = binary_resolver::find_validator(&options.validator)?;
    log::debug!("Resolved validator: {}", validator.display());

    std::fs::create_dir_all(&options.log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            options.log_dir.display()
        )
    })?;

    let cases = parser::csv::load_cases(&options.input_csv)?;

    let budget_display = match options.timeout {
        Some(budget) => format!("{}s per case", budget.as_secs()),
        None => "disabled".to_string(),
    };
    println!(
        "{} Execution started: {} (timeout: {})",
        "▶".green().bold(),
        started_at.format("%Y-%m-%d %H:%M:%S"),
        budget_display
    );

    let config = RunConfig {
        validator,
        scenario_dir: options.scenario_dir.clone(),
        log_dir: options.log_dir.clone(),
        timeout: options.timeout,
    };

    let mut results = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        print!(
            "[{}] Testing {}... ",
            index + 1,
            case.scenario_name.cyan()
        );
        let _ = std::io::stdout().flush();

        let result = executor::run_case(&config, case).await?;
        println!("[{}]", status_colored(result.status));
        results.push(result);
    }

    let summary = RunSummary::from_results(&results);
    let run_report = RunReport {
        run_id,
        generated_at: started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        command_line,
        cases: results,
        summary: summary.clone(),
    };

    report::html::write_report(&run_report, &options.output_html)?;

    // Archive failures are reported but never fail the run; the report and
    // logs are already on disk.
    let archive_path = PathBuf::from(format!(
        "results_{}.tgz",
        started_at.format("%Y%m%d_%H%M%S")
    ));
    match archive::create_bundle(
        &archive_path,
        &options.input_csv,
        &options.output_html,
        &options.log_dir,
    ) {
        Ok(path) => println!("📦 Package: {}", path.display()),
        Err(err) => eprintln!("{} Failed to create archive: {:#}", "✗".red(), err),
    }

    println!(
        "\n✅ Done! Result: {}/{} passed ({} timed out).",
        summary.passed, summary.total, summary.timed_out
    );

    Ok(summary)
}

fn status_colored(status: CaseStatus) -> colored::ColoredString {
    match status {
        CaseStatus::Passed => status.label().green().bold(),
        CaseStatus::Failed => status.label().red().bold(),
        CaseStatus::TimedOut => status.label().yellow().bold(),
    }
}
