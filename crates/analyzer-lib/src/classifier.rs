//! Waste classification rules
//!
//! Three independent predicates evaluated per record. A record may satisfy
//! more than one: an active resource at 3% CPU is both underutilized and
//! idle. The high-cost check needs the cohort average as input and is never
//! evaluated against an empty cohort.

use crate::error::AnalysisError;
use crate::models::{CostRecord, ResourceStatus};

/// CPU usage below this is underutilized (percent)
pub const UNDERUTILIZED_CPU_THRESHOLD: f64 = 20.0;

/// Memory usage below this is underutilized (percent)
pub const UNDERUTILIZED_MEM_THRESHOLD: f64 = 20.0;

/// CPU usage below this is idle (percent)
pub const IDLE_CPU_THRESHOLD: f64 = 5.0;

/// Memory usage below this is idle (percent)
pub const IDLE_MEM_THRESHOLD: f64 = 5.0;

/// Daily cost above this multiple of the cohort average is an anomaly
pub const HIGH_COST_MULTIPLIER: f64 = 2.0;

/// Classification thresholds, overridable per classifier instance
#[derive(Debug, Clone, Copy)]
pub struct WasteThresholds {
    pub underutilized_cpu: f64,
    pub underutilized_mem: f64,
    pub idle_cpu: f64,
    pub idle_mem: f64,
    pub high_cost_multiplier: f64,
}

impl Default for WasteThresholds {
    fn default() -> Self {
        Self {
            underutilized_cpu: UNDERUTILIZED_CPU_THRESHOLD,
            underutilized_mem: UNDERUTILIZED_MEM_THRESHOLD,
            idle_cpu: IDLE_CPU_THRESHOLD,
            idle_mem: IDLE_MEM_THRESHOLD,
            high_cost_multiplier: HIGH_COST_MULTIPLIER,
        }
    }
}

/// Applies fixed threshold rules to individual cost records
#[derive(Debug, Clone, Copy, Default)]
pub struct WasteClassifier {
    pub thresholds: WasteThresholds,
}

impl WasteClassifier {
    /// Create a classifier with the default policy thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds
    pub fn with_thresholds(thresholds: WasteThresholds) -> Self {
        Self { thresholds }
    }

    /// An active resource running well below capacity on both CPU and memory
    pub fn is_underutilized(&self, record: &CostRecord) -> Result<bool, AnalysisError> {
        if record.status != ResourceStatus::Active {
            return Ok(false);
        }
        let cpu = record.usage_cpu_avg.normalize()?;
        let mem = record.usage_mem_avg.normalize()?;
        Ok(cpu < self.thresholds.underutilized_cpu && mem < self.thresholds.underutilized_mem)
    }

    /// A resource reported idle, or one whose usage is near zero.
    ///
    /// The usage check means a record whose status is still `active` can be
    /// flagged idle.
    pub fn is_idle(&self, record: &CostRecord) -> Result<bool, AnalysisError> {
        if record.status == ResourceStatus::Idle {
            return Ok(true);
        }
        let cpu = record.usage_cpu_avg.normalize()?;
        let mem = record.usage_mem_avg.normalize()?;
        Ok(cpu < self.thresholds.idle_cpu && mem < self.thresholds.idle_mem)
    }

    /// A resource costing strictly more than the multiplier times the
    /// cohort average daily cost
    pub fn is_high_cost_anomaly(&self, record: &CostRecord, avg_daily_cost: f64) -> bool {
        record.daily_cost > avg_daily_cost * self.thresholds.high_cost_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UsageValue;
    use chrono::NaiveDate;

    fn record(status: ResourceStatus, cpu: &str, mem: &str, daily_cost: f64) -> CostRecord {
        CostRecord {
            service: "web-frontend".to_string(),
            region: "us-east-1".to_string(),
            instance_type: "m5.large".to_string(),
            daily_cost,
            usage_cpu_avg: UsageValue::Text(cpu.to_string()),
            usage_mem_avg: UsageValue::Text(mem.to_string()),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status,
        }
    }

    #[test]
    fn test_underutilized_active_low_usage() {
        let classifier = WasteClassifier::new();
        let r = record(ResourceStatus::Active, "10%", "10%", 5.0);
        assert!(classifier.is_underutilized(&r).unwrap());
        assert!(!classifier.is_idle(&r).unwrap());
    }

    #[test]
    fn test_underutilized_requires_active_status() {
        let classifier = WasteClassifier::new();
        let r = record(ResourceStatus::Stopped, "10%", "10%", 5.0);
        assert!(!classifier.is_underutilized(&r).unwrap());
    }

    #[test]
    fn test_underutilized_requires_both_dimensions_low() {
        let classifier = WasteClassifier::new();
        let r = record(ResourceStatus::Active, "10%", "50%", 5.0);
        assert!(!classifier.is_underutilized(&r).unwrap());
    }

    #[test]
    fn test_idle_by_usage_can_overlap_underutilized() {
        let classifier = WasteClassifier::new();
        let r = record(ResourceStatus::Active, "3%", "3%", 5.0);
        assert!(classifier.is_idle(&r).unwrap());
        assert!(classifier.is_underutilized(&r).unwrap());
    }

    #[test]
    fn test_idle_by_status_ignores_usage() {
        let classifier = WasteClassifier::new();
        let r = record(ResourceStatus::Idle, "50%", "50%", 5.0);
        assert!(classifier.is_idle(&r).unwrap());
    }

    #[test]
    fn test_high_cost_anomaly_strict_boundary() {
        let classifier = WasteClassifier::new();
        assert!(classifier.is_high_cost_anomaly(
            &record(ResourceStatus::Active, "50%", "50%", 25.0),
            10.0
        ));
        assert!(!classifier.is_high_cost_anomaly(
            &record(ResourceStatus::Active, "50%", "50%", 19.0),
            10.0
        ));
        // Exactly 2x average is not an anomaly
        assert!(!classifier.is_high_cost_anomaly(
            &record(ResourceStatus::Active, "50%", "50%", 20.0),
            10.0
        ));
    }

    #[test]
    fn test_invalid_usage_propagates() {
        let classifier = WasteClassifier::new();
        let r = record(ResourceStatus::Active, "n/a", "10%", 5.0);
        assert!(classifier.is_underutilized(&r).is_err());
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = WasteClassifier::with_thresholds(WasteThresholds {
            underutilized_cpu: 50.0,
            underutilized_mem: 50.0,
            ..WasteThresholds::default()
        });
        let r = record(ResourceStatus::Active, "40%", "40%", 5.0);
        assert!(classifier.is_underutilized(&r).unwrap());
    }
}
