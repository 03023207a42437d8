// Console and JSON rendering of a finished run

use crate::diff::{BrokenLink, LinkDiff};
use crate::run::RunOutcome;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    started_at: String,
    finished_at: String,
    start_url: &'a str,
    domain: &'a str,
    pages_crawled: usize,
    links_checked: usize,
    #[serde(flatten)]
    diff: &'a LinkDiff,
}

pub fn render_report(outcome: &RunOutcome, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(outcome)),
        ReportFormat::Json => generate_json_report(outcome),
    }
}

pub fn generate_json_report(outcome: &RunOutcome) -> serde_json::Result<String> {
    let report = JsonReport {
        started_at: outcome.started_at.to_rfc3339(),
        finished_at: outcome.finished_at.to_rfc3339(),
        start_url: &outcome.start_url,
        domain: &outcome.domain,
        pages_crawled: outcome.pages_crawled,
        links_checked: outcome.links_checked,
        diff: &outcome.diff,
    };
    serde_json::to_string_pretty(&report)
}

pub fn generate_text_report(outcome: &RunOutcome) -> String {
    let diff = &outcome.diff;
    let elapsed = outcome.finished_at - outcome.started_at;

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Site: {} ({})\n", outcome.start_url, outcome.domain));
    report.push_str(&format!(
        "  Run: {} ({}s)\n",
        outcome.started_at.format("%Y-%m-%d %H:%M:%S"),
        elapsed.num_seconds()
    ));
    report.push_str(&format!("  Internal pages crawled: {}\n", outcome.pages_crawled));
    report.push_str(&format!("  Links checked: {}\n", outcome.links_checked));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    if diff.removed.is_empty() {
        report.push_str("No links removed.\n");
    } else {
        report.push_str("## Removed links (present last run, gone now):\n");
        for url in &diff.removed {
            report.push_str(&format!(" {} {}\n", "-".yellow(), url));
        }
    }
    report.push('\n');

    if diff.added.is_empty() {
        report.push_str("No new links.\n");
    } else {
        report.push_str("## New links (not present last run):\n");
        for url in &diff.added {
            report.push_str(&format!(" {} {}\n", "+".green(), url));
        }
    }
    report.push('\n');

    if diff.became_broken.is_empty() {
        report.push_str("No previously working link has broken.\n");
    } else {
        report.push_str("## Links that worked last run and are broken now:\n");
        for url in &diff.became_broken {
            report.push_str(&format!(" {} {}\n", "!".red().bold(), url));
        }
    }
    report.push('\n');

    if diff.currently_broken.is_empty() {
        report.push_str("No broken links in this run.\n");
    } else {
        report.push_str(&format!(
            "## Broken links in this run ({}):\n",
            diff.currently_broken.len()
        ));
        for broken in &diff.currently_broken {
            push_broken_link(&mut report, broken);
        }
    }

    report
}

fn push_broken_link(report: &mut String, broken: &BrokenLink) {
    report.push_str(&format!(
        " {} {} (status: {})\n",
        "-".red(),
        broken.url,
        format_status(broken.status_code)
    ));

    if broken.referrers.is_empty() {
        return;
    }

    report.push_str(&format!(
        "   -> referenced by {} page{}:\n",
        broken.referrers.len(),
        if broken.referrers.len() == 1 { "" } else { "s" }
    ));
    for page in &broken.referrers {
        report.push_str(&format!("      - {}\n", page));
    }
}

pub fn format_status(status_code: Option<u16>) -> String {
    match status_code {
        Some(code) => code.to_string(),
        None => "no response".to_string(),
    }
}

/// Final line printed once the snapshot has been written
pub fn confirmation_line(output: &Path) -> String {
    format!("[*] Run complete. Results saved to {}", output.display())
}
