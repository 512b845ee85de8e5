//! Savings estimation
//!
//! Converts classification flags into a recoverable-dollars estimate. Each
//! record is credited under exactly one category so the same dollar never
//! counts twice; the priority order is idle, then underutilized, then
//! high-cost anomaly.

use crate::models::ClassifiedRecord;

/// Fraction of monthly cost recoverable by stopping an idle resource
pub const IDLE_RECOVERY_RATE: f64 = 0.8;

/// Fraction of monthly cost recoverable by right-sizing an underutilized
/// resource
pub const UNDERUTILIZED_RECOVERY_RATE: f64 = 0.3;

/// Fraction of monthly cost recoverable by optimizing a high-cost anomaly
pub const ANOMALY_RECOVERY_RATE: f64 = 0.2;

/// Recovery rates, overridable per estimator instance
#[derive(Debug, Clone, Copy)]
pub struct RecoveryRates {
    pub idle: f64,
    pub underutilized: f64,
    pub anomaly: f64,
}

impl Default for RecoveryRates {
    fn default() -> Self {
        Self {
            idle: IDLE_RECOVERY_RATE,
            underutilized: UNDERUTILIZED_RECOVERY_RATE,
            anomaly: ANOMALY_RECOVERY_RATE,
        }
    }
}

/// Estimates potential monthly savings for a classified cohort
#[derive(Debug, Clone, Copy, Default)]
pub struct SavingsEstimator {
    pub rates: RecoveryRates,
}

impl SavingsEstimator {
    /// Create an estimator with the default recovery rates
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom recovery rates
    pub fn with_rates(rates: RecoveryRates) -> Self {
        Self { rates }
    }

    /// Monthly-dollar credit for a single record.
    ///
    /// Idle wins over underutilized wins over anomaly; a record matching
    /// none of the three contributes zero.
    pub fn record_credit(&self, record: &ClassifiedRecord) -> f64 {
        if record.is_idle {
            record.monthly_cost_estimate * self.rates.idle
        } else if record.is_underutilized {
            record.monthly_cost_estimate * self.rates.underutilized
        } else if record.is_high_cost_anomaly {
            record.monthly_cost_estimate * self.rates.anomaly
        } else {
            0.0
        }
    }

    /// Total potential monthly savings across the cohort
    pub fn estimate(&self, records: &[ClassifiedRecord]) -> f64 {
        records.iter().map(|r| self.record_credit(r)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostRecord, ResourceStatus, UsageValue};
    use chrono::NaiveDate;

    fn classified(
        daily_cost: f64,
        is_underutilized: bool,
        is_idle: bool,
        is_high_cost_anomaly: bool,
    ) -> ClassifiedRecord {
        let record = CostRecord {
            service: "batch-worker".to_string(),
            region: "eu-west-1".to_string(),
            instance_type: "c5.xlarge".to_string(),
            daily_cost,
            usage_cpu_avg: UsageValue::Number(10.0),
            usage_mem_avg: UsageValue::Number(10.0),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: ResourceStatus::Active,
        };
        ClassifiedRecord {
            monthly_cost_estimate: record.monthly_cost_estimate(),
            usage_cpu_avg_float: 10.0,
            usage_mem_avg_float: 10.0,
            record,
            is_underutilized,
            is_idle,
            is_high_cost_anomaly,
        }
    }

    #[test]
    fn test_idle_takes_priority_over_underutilized() {
        let estimator = SavingsEstimator::new();
        // 10/day -> 300/month; idle rate only, never 80% + 30%
        let r = classified(10.0, true, true, false);
        assert_eq!(estimator.record_credit(&r), 240.0);
    }

    #[test]
    fn test_underutilized_takes_priority_over_anomaly() {
        let estimator = SavingsEstimator::new();
        let r = classified(10.0, true, false, true);
        assert_eq!(estimator.record_credit(&r), 90.0);
    }

    #[test]
    fn test_anomaly_only() {
        let estimator = SavingsEstimator::new();
        let r = classified(100.0, false, false, true);
        assert_eq!(estimator.record_credit(&r), 600.0);
    }

    #[test]
    fn test_unflagged_record_contributes_zero() {
        let estimator = SavingsEstimator::new();
        let r = classified(50.0, false, false, false);
        assert_eq!(estimator.record_credit(&r), 0.0);
    }

    #[test]
    fn test_cohort_sum() {
        let estimator = SavingsEstimator::new();
        let cohort = vec![
            classified(10.0, true, true, false),   // 240
            classified(20.0, false, true, false),  // 480
            classified(100.0, false, false, true), // 600
        ];
        assert_eq!(estimator.estimate(&cohort), 1320.0);
    }
}
