use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use gst_validate_batch::{run_suite, SuiteOptions};

#[derive(Parser)]
#[command(name = "gst-validate-batch")]
#[command(version)]
#[command(about = "CSV-driven batch harness for gst-validate media scenarios", long_about = None)]
struct Cli {
    /// CSV file listing the cases to run (file_name[,scenario_name])
    input_csv: PathBuf,

    /// Path of the generated HTML report
    output_html: PathBuf,

    /// Directory that receives one log file per case
    log_dir: PathBuf,

    /// Per-case wall clock budget in seconds
    #[arg(long, default_value_t = 600)]
    timeout: u64,

    /// Run every case without a wall clock budget
    #[arg(long, default_value = "false")]
    no_timeout: bool,

    /// Base directory for scenario definitions
    #[arg(long, default_value = "/usr/share/gstreamer-1.0/validate/scenarios")]
    scenario_dir: PathBuf,

    /// Validator executable (name on PATH or explicit path)
    #[arg(long, default_value = "gst-validate-1.0")]
    validator: String,

    /// Exit non-zero when the run aborts on a fatal error
    #[arg(long, default_value = "false")]
    strict: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!(
        "{} Running cases from: {}",
        "▶".green().bold(),
        cli.input_csv.display()
    );
    println!("  Report: {}", cli.output_html.display().to_string().cyan());
    println!("  Logs: {}", cli.log_dir.display().to_string().cyan());
    if cli.no_timeout {
        println!("  Timeout: {}", "disabled".yellow());
    }

    let options = SuiteOptions {
        input_csv: cli.input_csv,
        output_html: cli.output_html,
        log_dir: cli.log_dir,
        validator: cli.validator,
        scenario_dir: cli.scenario_dir,
        timeout: if cli.no_timeout {
            None
        } else {
            Some(Duration::from_secs(cli.timeout))
        },
    };

    // Per-case failures never change the exit status; a fatal error aborts
    // the run and, without --strict, is reported while still exiting 0.
    if let Err(err) = run_suite(&options).await {
        eprintln!("{} Error: {:#}", "✗".red().bold(), err);
        if cli.strict {
            std::process::exit(1);
        }
    }

    Ok(())
}
