//! Analyze command - extract findings from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use rfpscan_core::models::report::{AnalysisReport, ComplianceMetrics, Table};
use rfpscan_core::{Document, DocumentAnalyzer, RfpAnalyzer};

use super::config::load_config;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input file (PDF or plain text)
    #[arg(required_unless_present = "sample", conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Analyze the bundled sample RFP instead of a file
    #[arg(long)]
    sample: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Table to export when the format is CSV
    #[arg(short, long, value_enum, default_value = "compliance")]
    table: TableArg,

    /// Fail when any compliance item is missing
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON report with metrics
    Json,
    /// CSV table
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TableArg {
    /// Compliance matrix
    Compliance,
    /// Deliverables matrix
    Deliverables,
    /// Key dates
    Dates,
}

impl From<TableArg> for Table {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Compliance => Table::Compliance,
            TableArg::Deliverables => Table::Deliverables,
            TableArg::Dates => Table::KeyDates,
        }
    }
}

pub fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let analyzer = RfpAnalyzer::from_config(&config)?;

    let document = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Analyzing file: {}", path.display());
            Document::from_path(path)?
        }
        None => {
            info!("Analyzing bundled sample");
            Document::sample()
        }
    };

    let report = analyzer.analyze(&document)?;
    let output = format_report(&report, args.format, args.table.into())?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    let metrics = report.metrics();
    if args.strict && metrics.items_missing > 0 {
        anyhow::bail!(
            "{} of {} compliance items missing",
            metrics.items_missing,
            metrics.items_checked
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a AnalysisReport,
    metrics: ComplianceMetrics,
}

/// Render a report in the requested format.
pub fn format_report(report: &AnalysisReport, format: OutputFormat, table: Table) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let json = JsonReport {
                report,
                metrics: report.metrics(),
            };
            Ok(serde_json::to_string_pretty(&json)? + "\n")
        }
        OutputFormat::Csv => Ok(report.to_csv(table)?),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_text(report: &AnalysisReport) -> String {
    let metrics = report.metrics();
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n\n", report.source.name()));

    output.push_str(&format!("Items Checked:   {}\n", metrics.items_checked));
    output.push_str(&format!("Items Found:     {}\n", metrics.items_found));
    output.push_str(&format!("Items Missing:   {}\n", metrics.items_missing));
    output.push_str(&format!("Compliance:      {}\n", metrics.compliance_percent_label()));
    output.push_str(&format!("Key Dates Found: {}\n", metrics.key_dates_found));
    output.push('\n');

    output.push_str("Key Dates:\n");
    if report.key_dates.is_empty() {
        output.push_str("  No dates detected.\n");
    }
    for event in &report.key_dates {
        output.push_str(&format!("  {}: {}\n", event.label, event.value));
    }
    output.push('\n');

    output.push_str("Deliverables:\n");
    for row in &report.deliverables {
        output.push_str(&format!("  {} {}\n", row.marker(), row.phrase));
    }
    output.push('\n');

    output.push_str("Compliance Matrix:\n");
    for row in &report.compliance {
        output.push_str(&format!("  {} {}\n", row.marker(), row.phrase));
    }
    output.push('\n');

    output.push_str("Questions to Clarify:\n");
    if report.clarifications.is_empty() {
        output.push_str("  None.\n");
    }
    for note in &report.clarifications {
        output.push_str(&format!("  - {}\n", note.question));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text_sample() {
        let report = RfpAnalyzer::new().analyze(&Document::sample()).unwrap();
        let text = format_text(&report);

        assert!(text.contains("Compliance:      91%\n"));
        assert!(text.contains("  Proposal Submission Deadline: March 5, 2025\n"));
        assert!(text.contains("  ✗ ISO 14001\n"));
        assert!(text.contains("regarding 'Bid Bond'"));
    }

    #[test]
    fn test_format_text_no_dates() {
        let report = RfpAnalyzer::new().analyze_text("nothing here");
        assert!(format_text(&report).contains("No dates detected."));
    }

    #[test]
    fn test_format_json_includes_metrics() {
        let report = RfpAnalyzer::new().analyze_text("Bid Bond: 5%");
        let json = format_report(&report, OutputFormat::Json, Table::Compliance).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metrics"]["items_found"], 1);
        assert_eq!(value["compliance"].as_array().unwrap().len(), 11);
        assert_eq!(value["source"]["type"], "uploaded");
    }
}
