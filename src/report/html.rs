use super::types::RunReport;
use crate::runner::state::CaseStatus;
use anyhow::{Context, Result};
use std::path::Path;

/// Render the report and write it wholesale to `output`, overwriting any
/// existing file.
pub fn write_report(report: &RunReport, output: &Path) -> Result<()> {
    let html = generate_html(report);
    std::fs::write(output, html)
        .with_context(|| format!("Failed to write HTML report: {}", output.display()))?;
    println!("HTML report saved to: {}", output.display());
    Ok(())
}

fn generate_html(report: &RunReport) -> String {
    let summary = &report.summary;
    let pass_rate = summary.pass_rate();

    let mut rows = String::new();
    for result in &report.cases {
        let status_class = match result.status {
            CaseStatus::Passed => "passed",
            CaseStatus::Failed => "failed",
            CaseStatus::TimedOut => "timeout",
        };

        rows.push_str(&format!(
            r#"
            <tr class="{status_class}">
                <td>{scenario}</td>
                <td>{file}</td>
                <td class="status">{label}</td>
                <td class="duration">{duration}</td>
                <td><a href="{log_href}" target="_blank">View Log</a> <span class="exit">({exit})</span></td>
            </tr>"#,
            status_class = status_class,
            scenario = html_escape(&result.case.scenario_name),
            file = html_escape(&result.case.file_name),
            label = result.status.label(),
            duration = format_duration(result.duration_ms),
            log_href = html_escape(&result.log_path.display().to_string()),
            exit = html_escape(&result.exit_display()),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>GstValidate Execution Report</title>
    <style>
        :root {{
            --bg-primary: #0a0f1d;
            --bg-secondary: #141b2d;
            --border: #374151;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --green: #10b981;
            --red: #ef4444;
            --yellow: #f59e0b;
        }}

        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}

        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.5;
            padding: 3rem 1rem;
        }}

        .container {{
            max-width: 1100px;
            margin: 0 auto;
        }}

        h1 {{
            font-size: 2rem;
            font-weight: 800;
            letter-spacing: -0.025em;
            margin-bottom: 2rem;
        }}

        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }}

        .stat {{
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            padding: 1.5rem;
            border-radius: 1rem;
        }}

        .stat-value {{
            font-size: 2.25rem;
            font-weight: 800;
        }}

        .stat-label {{
            color: var(--text-secondary);
            font-size: 0.875rem;
            font-weight: 500;
            text-transform: uppercase;
            letter-spacing: 0.05em;
        }}

        .stat.passed .stat-value {{ color: var(--green); }}
        .stat.failed .stat-value {{ color: var(--red); }}
        .stat.timeout .stat-value {{ color: var(--yellow); }}

        .meta {{
            color: var(--text-secondary);
            font-size: 0.875rem;
            margin-bottom: 0.5rem;
        }}

        .cmd {{
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 0.75rem 1rem;
            font-family: monospace;
            font-size: 0.875rem;
            margin-bottom: 2rem;
            overflow-x: auto;
        }}

        table {{
            border-collapse: collapse;
            width: 100%;
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
        }}

        th {{
            background: #1f2937;
            text-align: left;
            padding: 0.75rem 1rem;
            font-size: 0.8125rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
            color: var(--text-secondary);
        }}

        td {{
            padding: 0.625rem 1rem;
            border-top: 1px solid var(--border);
            font-size: 0.9375rem;
        }}

        td.status {{
            font-weight: 700;
        }}

        td.duration {{
            color: var(--text-secondary);
            font-size: 0.8125rem;
        }}

        tr.passed {{ background: rgba(16, 185, 129, 0.08); }}
        tr.failed {{ background: rgba(239, 68, 68, 0.08); }}
        tr.timeout {{ background: rgba(245, 158, 11, 0.08); }}

        tr.passed td.status {{ color: var(--green); }}
        tr.failed td.status {{ color: var(--red); }}
        tr.timeout td.status {{ color: var(--yellow); }}

        a {{
            color: #3b82f6;
            text-decoration: none;
        }}

        a:hover {{
            text-decoration: underline;
        }}

        .exit {{
            color: var(--text-secondary);
            font-size: 0.8125rem;
        }}

        footer {{
            margin-top: 3rem;
            padding-top: 1.5rem;
            border-top: 1px solid var(--border);
            color: var(--text-secondary);
            font-size: 0.875rem;
            display: flex;
            justify-content: center;
            gap: 2rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>GstValidate Execution Report</h1>

        <div class="summary">
            <div class="stat">
                <div class="stat-value">{total}</div>
                <div class="stat-label">Total</div>
            </div>
            <div class="stat passed">
                <div class="stat-value">{passed}</div>
                <div class="stat-label">Passed</div>
            </div>
            <div class="stat failed">
                <div class="stat-value">{failed}</div>
                <div class="stat-label">Failed</div>
            </div>
            <div class="stat timeout">
                <div class="stat-value">{timed_out}</div>
                <div class="stat-label">Timed Out</div>
            </div>
            <div class="stat">
                <div class="stat-value">{pass_rate:.1}%</div>
                <div class="stat-label">Success Rate</div>
            </div>
        </div>

        <p class="meta"><b>Date:</b> {generated_at}</p>
        <p class="meta"><b>Command:</b></p>
        <div class="cmd">{command_line}</div>

        <table>
            <tr><th>Scenario</th><th>File</th><th>Status</th><th>Duration</th><th>Log</th></tr>{rows}
        </table>

        <footer>
            <span>Run: {run_id}</span>
            <span>Generated: {generated_at}</span>
        </footer>
    </div>
</body>
</html>"#,
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        timed_out = summary.timed_out,
        pass_rate = pass_rate,
        generated_at = html_escape(&report.generated_at),
        command_line = html_escape(&report.command_line),
        rows = rows,
        run_id = html_escape(&report.run_id),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60000;
        let seconds = (ms % 60000) as f64 / 1000.0;
        format!("{}m {:.0}s", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::TestCase;
    use crate::runner::state::{CaseResult, RunSummary};
    use std::path::PathBuf;

    fn case_result(scenario: &str, status: CaseStatus, exit_code: Option<i32>) -> CaseResult {
        CaseResult {
            case: TestCase {
                file_name: format!("{}.mp4", scenario),
                scenario_name: scenario.to_string(),
            },
            status,
            exit_code,
            log_path: PathBuf::from(format!("logs/{}.log", scenario)),
            duration_ms: 1500,
        }
    }

    fn report(cases: Vec<CaseResult>) -> RunReport {
        let summary = RunSummary::from_results(&cases);
        RunReport {
            run_id: "run-1234".to_string(),
            generated_at: "2026-08-06 10:00:00".to_string(),
            command_line: "gst-validate-batch cases.csv report.html logs".to_string(),
            cases,
            summary,
        }
    }

    #[test]
    fn test_generate_html_summary_and_rows() {
        let html = generate_html(&report(vec![
            case_result("scenario_a", CaseStatus::Passed, Some(0)),
            case_result("scenario_b", CaseStatus::Failed, Some(18)),
            case_result("scenario_c", CaseStatus::TimedOut, None),
        ]));

        assert!(html.contains("GstValidate Execution Report"));
        assert!(html.contains(r#"<tr class="passed">"#));
        assert!(html.contains(r#"<tr class="failed">"#));
        assert!(html.contains(r#"<tr class="timeout">"#));
        assert!(html.contains(r#"href="logs/scenario_a.log""#));
        assert!(html.contains("(KILLED)"));
        assert!(html.contains("(18)"));
        assert!(html.contains("33.3%"));
        assert!(html.contains("gst-validate-batch cases.csv report.html logs"));
    }

    #[test]
    fn test_empty_run_has_zero_pass_rate() {
        let html = generate_html(&report(vec![]));
        assert!(html.contains("0.0%"));
    }

    #[test]
    fn test_case_strings_are_escaped() {
        let html = generate_html(&report(vec![case_result(
            "bad<name>&\"quote",
            CaseStatus::Passed,
            Some(0),
        )]));

        assert!(html.contains("bad&lt;name&gt;&amp;&quot;quote"));
        assert!(!html.contains("bad<name>"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(250), "250ms");
        assert_eq!(format_duration(1500), "1.5s");
        assert_eq!(format_duration(95_000), "1m 35s");
    }
}
