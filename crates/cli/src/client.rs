//! API client for communicating with the Cost API

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the Cost API
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Make a POST request with a raw CSV body
    pub async fn post_csv<T: DeserializeOwned>(&self, path: &str, csv: String) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .header("content-type", "text/csv")
            .body(csv)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_records: usize,
    pub total_daily_cost: f64,
    pub total_monthly_cost_estimate: f64,
    pub underutilized_count: usize,
    pub idle_count: usize,
    pub high_cost_anomaly_count: usize,
    pub potential_monthly_savings: f64,
    pub underutilized_resources: Vec<ClassifiedRecord>,
    pub idle_resources: Vec<ClassifiedRecord>,
    pub high_cost_anomalies: Vec<ClassifiedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvUploadResponse {
    pub message: String,
    pub records_processed: usize,
    pub analysis_summary: AnalysisSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSavingsReport {
    pub summary: String,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub estimated_savings: f64,
    pub priority_actions: Vec<String>,
    pub analysis_summary: AnalysisSummary,
}

/// One stored record with its classification flags.
///
/// The raw usage fields come back as either numbers or percent strings,
/// so the display side leans on the normalized floats instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub service: String,
    pub region: String,
    pub instance_type: String,
    pub daily_cost: f64,
    pub date: String,
    pub status: String,
    pub usage_cpu_avg_float: f64,
    pub usage_mem_avg_float: f64,
    pub monthly_cost_estimate: f64,
    pub is_underutilized: bool,
    pub is_idle: bool,
    pub is_high_cost_anomaly: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub records_count: usize,
}
