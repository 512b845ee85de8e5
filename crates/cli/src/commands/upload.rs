//! CSV upload command

use anyhow::{Context, Result};
use std::path::Path;

use crate::client::{ApiClient, CsvUploadResponse};
use crate::commands::analysis::print_summary;
use crate::output::{print_success, OutputFormat};

/// Upload a CSV file of cost records
pub async fn upload(client: &ApiClient, file: &Path, format: OutputFormat) -> Result<()> {
    let csv = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let response: CsvUploadResponse = client.post_csv("api/v1/upload-csv", csv).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_success(&response.message);
            println!();
            print_summary(&response.analysis_summary);
        }
    }

    Ok(())
}
