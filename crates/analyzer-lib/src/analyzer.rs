//! Cohort analysis
//!
//! Orchestrates classification and savings estimation across one cohort of
//! cost records and produces a single `AnalysisSummary`. Every call
//! recomputes from the cohort it is handed; there is no hidden state, so
//! concurrent analyses of independent cohorts cannot interfere.

use tracing::debug;

use crate::classifier::WasteClassifier;
use crate::error::AnalysisError;
use crate::models::{AnalysisSummary, ClassifiedRecord, CostRecord, DAYS_PER_MONTH};
use crate::savings::SavingsEstimator;

/// Analyzer for a cohort of cloud cost records
#[derive(Debug, Clone, Copy, Default)]
pub struct CostAnalyzer {
    pub classifier: WasteClassifier,
    pub estimator: SavingsEstimator,
}

impl CostAnalyzer {
    /// Create an analyzer with default thresholds and recovery rates
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one record against the cohort average daily cost
    fn classify(
        &self,
        record: &CostRecord,
        avg_daily_cost: f64,
    ) -> Result<ClassifiedRecord, AnalysisError> {
        Ok(ClassifiedRecord {
            usage_cpu_avg_float: record.usage_cpu_avg.normalize()?,
            usage_mem_avg_float: record.usage_mem_avg.normalize()?,
            monthly_cost_estimate: record.monthly_cost_estimate(),
            is_underutilized: self.classifier.is_underutilized(record)?,
            is_idle: self.classifier.is_idle(record)?,
            is_high_cost_anomaly: self.classifier.is_high_cost_anomaly(record, avg_daily_cost),
            record: record.clone(),
        })
    }

    /// Classify every record in a cohort against the cohort's own average
    /// daily cost. Empty cohorts yield an empty vector.
    pub fn classify_cohort(
        &self,
        records: &[CostRecord],
    ) -> Result<Vec<ClassifiedRecord>, AnalysisError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let total_daily_cost: f64 = records.iter().map(|r| r.daily_cost).sum();
        let avg_daily_cost = total_daily_cost / records.len() as f64;

        let mut classified = Vec::with_capacity(records.len());
        for record in records {
            classified.push(self.classify(record, avg_daily_cost)?);
        }
        Ok(classified)
    }

    /// Analyze a cohort and produce its summary.
    ///
    /// An empty cohort yields the all-zero summary rather than an error.
    /// The cohort average includes anomaly candidates themselves; there is
    /// no outlier exclusion.
    pub fn analyze(&self, records: &[CostRecord]) -> Result<AnalysisSummary, AnalysisError> {
        if records.is_empty() {
            return Ok(AnalysisSummary::empty());
        }

        let total_daily_cost: f64 = records.iter().map(|r| r.daily_cost).sum();
        let classified = self.classify_cohort(records)?;

        // Bucket in cohort order; a record can land in several buckets
        let mut underutilized = Vec::new();
        let mut idle = Vec::new();
        let mut anomalies = Vec::new();
        for record in &classified {
            if record.is_underutilized {
                underutilized.push(record.clone());
            }
            if record.is_idle {
                idle.push(record.clone());
            }
            if record.is_high_cost_anomaly {
                anomalies.push(record.clone());
            }
        }

        let potential_monthly_savings = self.estimator.estimate(&classified);

        debug!(
            total_records = records.len(),
            underutilized = underutilized.len(),
            idle = idle.len(),
            anomalies = anomalies.len(),
            potential_monthly_savings,
            "Cohort analysis complete"
        );

        Ok(AnalysisSummary {
            total_records: records.len(),
            total_daily_cost,
            total_monthly_cost_estimate: total_daily_cost * DAYS_PER_MONTH,
            underutilized_count: underutilized.len(),
            idle_count: idle.len(),
            high_cost_anomaly_count: anomalies.len(),
            potential_monthly_savings,
            underutilized_resources: underutilized,
            idle_resources: idle,
            high_cost_anomalies: anomalies,
        })
    }
}
