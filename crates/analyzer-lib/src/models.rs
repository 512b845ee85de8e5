//! Core data models for the cost analyzer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Days used to project a daily cost to a monthly estimate
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Lifecycle status of a cloud resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Active,
    Idle,
    Stopped,
    Terminated,
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Idle => "idle",
            ResourceStatus::Stopped => "stopped",
            ResourceStatus::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// A usage percentage as it appears in the source data: either numeric
/// or text with an optional `%` suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsageValue {
    Number(f64),
    Text(String),
}

impl UsageValue {
    /// Normalize to a plain float.
    ///
    /// Strips a trailing `%` from text values and parses the remainder.
    /// Out-of-range values (negative or above 100) pass through unchanged;
    /// they are a data-quality signal for the caller, not something to
    /// correct silently.
    pub fn normalize(&self) -> Result<f64, AnalysisError> {
        match self {
            UsageValue::Number(n) => Ok(*n),
            UsageValue::Text(s) => {
                let trimmed = s.trim();
                let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
                digits
                    .parse::<f64>()
                    .map_err(|_| AnalysisError::InvalidUsageValue(s.clone()))
            }
        }
    }
}

impl std::fmt::Display for UsageValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageValue::Number(n) => write!(f, "{}", n),
            UsageValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One resource-cost observation, as ingested from a CSV row.
///
/// Records are immutable once constructed; analysis never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub service: String,
    pub region: String,
    pub instance_type: String,
    pub daily_cost: f64,
    pub usage_cpu_avg: UsageValue,
    pub usage_mem_avg: UsageValue,
    pub date: NaiveDate,
    pub status: ResourceStatus,
}

impl CostRecord {
    /// Projected monthly cost from the daily observation
    pub fn monthly_cost_estimate(&self) -> f64 {
        self.daily_cost * DAYS_PER_MONTH
    }
}

/// A cost record plus derived classification fields.
///
/// Produced once per record per analysis pass and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: CostRecord,
    pub usage_cpu_avg_float: f64,
    pub usage_mem_avg_float: f64,
    pub monthly_cost_estimate: f64,
    pub is_underutilized: bool,
    pub is_idle: bool,
    pub is_high_cost_anomaly: bool,
}

/// Cohort-level analysis aggregate.
///
/// The three resource buckets preserve cohort iteration order and may
/// overlap: the categories are not mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

impl AnalysisSummary {
    /// The well-defined result of analyzing an empty cohort
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            total_daily_cost: 0.0,
            total_monthly_cost_estimate: 0.0,
            underutilized_count: 0,
            idle_count: 0,
            high_cost_anomaly_count: 0,
            potential_monthly_savings: 0.0,
            underutilized_resources: Vec::new(),
            idle_resources: Vec::new(),
            high_cost_anomalies: Vec::new(),
        }
    }
}

/// Structured cost savings report, produced by either synthesis path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSavingsReport {
    pub summary: String,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub estimated_savings: f64,
    pub priority_actions: Vec<String>,
    pub analysis_summary: AnalysisSummary,
}
