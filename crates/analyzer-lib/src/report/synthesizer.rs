//! Deterministic report synthesis
//!
//! Builds a structured report purely from an `AnalysisSummary`. No external
//! dependency, always succeeds; this is also the fallback target when a
//! narrative cannot be parsed.

use crate::models::{AnalysisSummary, ClassifiedRecord, CostSavingsReport};
use crate::savings::RecoveryRates;

use super::PRIORITY_PLACEHOLDER;

/// How many example services to name in the idle recommendation
const MAX_NAMED_SERVICES: usize = 3;

/// Deterministic synthesizer, parameterized by recovery rates so the idle
/// savings figure matches the estimator that produced the summary
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportSynthesizer {
    pub rates: RecoveryRates,
}

impl ReportSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate recoverable amount for the idle bucket
    fn idle_savings(&self, idle: &[ClassifiedRecord]) -> f64 {
        idle.iter()
            .map(|r| r.monthly_cost_estimate * self.rates.idle)
            .sum()
    }

    /// Synthesize a report from the summary. Pure function of its input.
    pub fn synthesize(&self, summary: &AnalysisSummary) -> CostSavingsReport {
        let summary_text = format!(
            "Analysis of {} cloud resources reveals significant cost optimization \
             opportunities. Current monthly spend is ${:.2}, with potential savings \
             of ${:.2} per month.",
            summary.total_records,
            summary.total_monthly_cost_estimate,
            summary.potential_monthly_savings
        );

        let mut findings = Vec::new();
        if summary.idle_count > 0 {
            findings.push(format!(
                "Found {} idle resources that can be stopped or terminated, saving \
                 approximately ${:.2}/month",
                summary.idle_count,
                self.idle_savings(&summary.idle_resources)
            ));
        }
        if summary.underutilized_count > 0 {
            findings.push(format!(
                "Identified {} underutilized resources that can be downsized to \
                 smaller instance types.",
                summary.underutilized_count
            ));
        }
        if summary.high_cost_anomaly_count > 0 {
            findings.push(format!(
                "Detected {} high-cost anomalies requiring optimization review.",
                summary.high_cost_anomaly_count
            ));
        }

        let mut recommendations = Vec::new();
        if !summary.idle_resources.is_empty() {
            let names: Vec<&str> = summary
                .idle_resources
                .iter()
                .take(MAX_NAMED_SERVICES)
                .map(|r| r.record.service.as_str())
                .collect();
            recommendations.push(format!(
                "Immediately stop or terminate idle resources, especially: {}",
                names.join(", ")
            ));
        }
        if !summary.underutilized_resources.is_empty() {
            recommendations.push(
                "Downsize underutilized resources to smaller instance types. \
                 Consider right-sizing based on actual usage patterns."
                    .to_string(),
            );
        }
        if !summary.high_cost_anomalies.is_empty() {
            recommendations.push(
                "Review high-cost resources for optimization opportunities. \
                 Consider reserved instances or spot instances where appropriate."
                    .to_string(),
            );
        }
        // Standing recommendations always close the list
        recommendations.push(
            "Implement automated resource scheduling for non-production environments."
                .to_string(),
        );
        recommendations
            .push("Set up cost alerts and budgets to prevent future cost anomalies.".to_string());

        let mut priority_actions = Vec::new();
        if !summary.idle_resources.is_empty() {
            priority_actions.push(format!(
                "Terminate {} idle resources (highest impact: ${:.2}/month savings)",
                summary.idle_resources.len(),
                self.idle_savings(&summary.idle_resources)
            ));
        }
        if !summary.underutilized_resources.is_empty() {
            priority_actions.push(format!(
                "Right-size {} underutilized resources",
                summary.underutilized_resources.len()
            ));
        }
        if !summary.high_cost_anomalies.is_empty() {
            priority_actions.push(format!(
                "Review and optimize {} high-cost resources",
                summary.high_cost_anomalies.len()
            ));
        }
        if priority_actions.is_empty() {
            priority_actions.push(PRIORITY_PLACEHOLDER.to_string());
        }

        CostSavingsReport {
            summary: summary_text,
            findings,
            recommendations,
            estimated_savings: summary.potential_monthly_savings,
            priority_actions,
            analysis_summary: summary.clone(),
        }
    }
}

/// Synthesize a report with the default recovery rates
pub fn synthesize_report(summary: &AnalysisSummary) -> CostSavingsReport {
    ReportSynthesizer::new().synthesize(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::CostAnalyzer;
    use crate::models::{CostRecord, ResourceStatus, UsageValue};
    use chrono::NaiveDate;

    fn record(service: &str, status: ResourceStatus, cpu: f64, daily_cost: f64) -> CostRecord {
        CostRecord {
            service: service.to_string(),
            region: "us-east-1".to_string(),
            instance_type: "m5.large".to_string(),
            daily_cost,
            usage_cpu_avg: UsageValue::Number(cpu),
            usage_mem_avg: UsageValue::Number(cpu),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status,
        }
    }

    #[test]
    fn test_clean_cohort_still_gets_standing_recommendations() {
        // Nothing idle, underutilized, or anomalous
        let cohort = vec![
            record("svc-a", ResourceStatus::Active, 70.0, 10.0),
            record("svc-b", ResourceStatus::Active, 80.0, 11.0),
        ];
        let summary = CostAnalyzer::new().analyze(&cohort).unwrap();
        let report = synthesize_report(&summary);

        assert!(report.findings.is_empty());
        assert_eq!(report.recommendations.len(), 2);
        assert!(report.recommendations[0].contains("automated resource scheduling"));
        assert!(report.recommendations[1].contains("cost alerts"));
        assert_eq!(report.priority_actions, vec![PRIORITY_PLACEHOLDER.to_string()]);
        assert_eq!(report.estimated_savings, 0.0);
    }

    #[test]
    fn test_idle_finding_carries_recovery_figure() {
        let cohort = vec![
            record("cache", ResourceStatus::Idle, 50.0, 10.0),
            record("web", ResourceStatus::Active, 80.0, 10.0),
        ];
        let summary = CostAnalyzer::new().analyze(&cohort).unwrap();
        let report = synthesize_report(&summary);

        // 10/day -> 300/month, 80% recoverable
        assert!(report.findings[0].contains("$240.00/month"));
        assert!(report.priority_actions[0].contains("Terminate 1 idle resources"));
    }

    #[test]
    fn test_standing_recommendations_come_last() {
        let cohort = vec![record("cache", ResourceStatus::Idle, 50.0, 10.0)];
        let summary = CostAnalyzer::new().analyze(&cohort).unwrap();
        let report = synthesize_report(&summary);

        let n = report.recommendations.len();
        assert!(report.recommendations[0].contains("cache"));
        assert!(report.recommendations[n - 2].contains("automated resource scheduling"));
        assert!(report.recommendations[n - 1].contains("cost alerts"));
    }

    #[test]
    fn test_priority_order_idle_underutilized_anomaly() {
        let cohort = vec![
            record("anomaly", ResourceStatus::Active, 90.0, 200.0),
            record("under", ResourceStatus::Active, 10.0, 10.0),
            record("idle", ResourceStatus::Idle, 50.0, 10.0),
        ];
        let summary = CostAnalyzer::new().analyze(&cohort).unwrap();
        let report = synthesize_report(&summary);

        assert!(report.priority_actions[0].starts_with("Terminate"));
        assert!(report.priority_actions[1].starts_with("Right-size"));
        assert!(report.priority_actions[2].starts_with("Review and optimize"));
    }

    #[test]
    fn test_estimated_savings_copied_from_summary() {
        let cohort = vec![record("cache", ResourceStatus::Idle, 50.0, 10.0)];
        let summary = CostAnalyzer::new().analyze(&cohort).unwrap();
        let report = synthesize_report(&summary);
        assert_eq!(report.estimated_savings, summary.potential_monthly_savings);
        assert_eq!(report.analysis_summary, summary);
    }
}
