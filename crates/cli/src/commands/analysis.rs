//! Analysis and health CLI commands

use anyhow::Result;
use colored::Colorize;

use crate::client::{AnalysisSummary, ApiClient, HealthResponse};
use crate::output::{color_status, format_currency, OutputFormat};

/// Run an analysis of the uploaded cost data
pub async fn analyze(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let summary: AnalysisSummary = client.get("api/v1/analyze").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_summary(&summary);
        }
    }

    Ok(())
}

/// Check API health
pub async fn health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health: HealthResponse = client.get("healthz").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&health)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("Status:          {}", color_status(&health.status));
            println!("Records stored:  {}", health.records_count);
        }
    }

    Ok(())
}

/// Print an analysis summary as key/value lines
pub fn print_summary(summary: &AnalysisSummary) {
    println!("{}", "Cost Analysis".bold());
    println!("{}", "=".repeat(50));
    println!("Records analyzed:       {}", summary.total_records);
    println!(
        "Daily cost:             {}",
        format_currency(summary.total_daily_cost)
    );
    println!(
        "Monthly cost estimate:  {}",
        format_currency(summary.total_monthly_cost_estimate)
    );
    println!();

    println!("{}", "Flagged Resources".bold());
    println!("{}", "-".repeat(50));
    println!(
        "Idle:                   {}",
        summary.idle_count.to_string().yellow()
    );
    println!(
        "Underutilized:          {}",
        summary.underutilized_count.to_string().yellow()
    );
    println!(
        "High-cost anomalies:    {}",
        summary.high_cost_anomaly_count.to_string().red()
    );
    println!();

    let savings_pct = if summary.total_monthly_cost_estimate > 0.0 {
        (summary.potential_monthly_savings / summary.total_monthly_cost_estimate) * 100.0
    } else {
        0.0
    };

    println!(
        "{} {} ({:.1}% of monthly spend)",
        "Potential Savings:".bold(),
        format_currency(summary.potential_monthly_savings)
            .green()
            .bold(),
        savings_pct
    );
}
