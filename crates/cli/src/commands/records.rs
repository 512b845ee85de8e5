//! Record listing commands

use anyhow::Result;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::client::{ApiClient, ClassifiedRecord};
use crate::output::{color_flag, color_status, format_currency, format_percent, OutputFormat};

/// Row for the records table
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Type")]
    instance_type: String,
    #[tabled(rename = "Daily Cost")]
    daily_cost: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Idle")]
    idle: String,
    #[tabled(rename = "Underutilized")]
    underutilized: String,
    #[tabled(rename = "Anomaly")]
    anomaly: String,
}

impl From<&ClassifiedRecord> for RecordRow {
    fn from(record: &ClassifiedRecord) -> Self {
        Self {
            service: record.service.clone(),
            region: record.region.clone(),
            instance_type: record.instance_type.clone(),
            daily_cost: format_currency(record.daily_cost),
            cpu: format_percent(record.usage_cpu_avg_float),
            memory: format_percent(record.usage_mem_avg_float),
            status: color_status(&record.status),
            idle: color_flag(record.is_idle),
            underutilized: color_flag(record.is_underutilized),
            anomaly: color_flag(record.is_high_cost_anomaly),
        }
    }
}

/// List all stored records with their classification flags
pub async fn list(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let records: Vec<ClassifiedRecord> = client.get("api/v1/records").await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if records.is_empty() {
                println!("{}", "No records found".yellow());
                return Ok(());
            }
            let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
    }

    Ok(())
}

/// Show one record by service name
pub async fn show(client: &ApiClient, service: &str, format: OutputFormat) -> Result<()> {
    let record: ClassifiedRecord = client
        .get(&format!("api/v1/records/{}", service))
        .await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&record)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", record.service.bold());
            println!("{}", "=".repeat(50));
            println!("Region:                 {}", record.region);
            println!("Instance type:          {}", record.instance_type);
            println!("Date:                   {}", record.date);
            println!("Status:                 {}", color_status(&record.status));
            println!(
                "Daily cost:             {}",
                format_currency(record.daily_cost)
            );
            println!(
                "Monthly cost estimate:  {}",
                format_currency(record.monthly_cost_estimate)
            );
            println!(
                "CPU usage:              {}",
                format_percent(record.usage_cpu_avg_float)
            );
            println!(
                "Memory usage:           {}",
                format_percent(record.usage_mem_avg_float)
            );
            println!();
            println!("Idle:                   {}", color_flag(record.is_idle));
            println!(
                "Underutilized:          {}",
                color_flag(record.is_underutilized)
            );
            println!(
                "High-cost anomaly:      {}",
                color_flag(record.is_high_cost_anomaly)
            );
        }
    }

    Ok(())
}
