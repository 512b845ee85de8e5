//! Report generation command

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::client::{ApiClient, CostSavingsReport, GenerateReportRequest};
use crate::output::{format_currency, OutputFormat};

/// Generate a cost savings report.
///
/// With a narrative file the server parses that text into report
/// sections; without one it synthesizes the report from the analysis.
pub async fn generate(
    client: &ApiClient,
    narrative_file: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let narrative = match narrative_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let request = GenerateReportRequest { narrative };
    let report: CostSavingsReport = client.post("api/v1/generate-report", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_report(&report);
        }
    }

    Ok(())
}

fn print_report(report: &CostSavingsReport) {
    println!("{}", "Cost Savings Report".bold());
    println!("{}", "=".repeat(50));
    println!("{}", report.summary);
    println!();

    if !report.findings.is_empty() {
        println!("{}", "Findings".bold());
        println!("{}", "-".repeat(50));
        for finding in &report.findings {
            println!("  • {}", finding);
        }
        println!();
    }

    if !report.recommendations.is_empty() {
        println!("{}", "Recommendations".bold());
        println!("{}", "-".repeat(50));
        for recommendation in &report.recommendations {
            println!("  • {}", recommendation);
        }
        println!();
    }

    if !report.priority_actions.is_empty() {
        println!("{}", "Priority Actions".bold());
        println!("{}", "-".repeat(50));
        for (i, action) in report.priority_actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action);
        }
        println!();
    }

    println!(
        "{} {} per month",
        "Estimated Savings:".bold(),
        format_currency(report.estimated_savings).green().bold()
    );
}
