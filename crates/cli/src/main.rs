//! Cloud Cost Analyzer CLI
//!
//! A command-line tool for uploading cost data, running waste analysis,
//! and generating cost savings reports against the cost API.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{analysis, records, report, upload};
use std::path::PathBuf;

/// Cloud Cost Analyzer CLI
#[derive(Parser)]
#[command(name = "cca")]
#[command(author, version, about = "CLI for the Cloud Cost Analyzer", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via CCA_API_URL env var)
    #[arg(long, env = "CCA_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a CSV file of cost records
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Analyze the uploaded cost data
    Analyze,

    /// Generate a cost savings report
    Report {
        /// Path to a narrative text file to parse into report sections
        #[arg(long)]
        narrative_file: Option<PathBuf>,
    },

    /// List stored records with classification flags
    Records {
        /// Show a single record by service name
        service: Option<String>,
    },

    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let client = client::ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Upload { file } => {
            upload::upload(&client, &file, cli.format).await?;
        }
        Commands::Analyze => {
            analysis::analyze(&client, cli.format).await?;
        }
        Commands::Report { narrative_file } => {
            report::generate(&client, narrative_file.as_deref(), cli.format).await?;
        }
        Commands::Records { service } => match service {
            Some(service) => {
                records::show(&client, &service, cli.format).await?;
            }
            None => {
                records::list(&client, cli.format).await?;
            }
        },
        Commands::Health => {
            analysis::health(&client, cli.format).await?;
        }
    }

    Ok(())
}
