//! Report generation
//!
//! Two paths produce the same structured `CostSavingsReport`:
//! deterministic synthesis straight from an `AnalysisSummary`, and
//! heuristic parsing of a free-form narrative obtained from an external
//! text-generation provider. Parsing that yields nothing usable always
//! falls back to the deterministic path, so report generation never fails.

mod parser;
mod prompt;
mod synthesizer;

pub use parser::{narrative_is_usable, parse_narrative};
pub use prompt::build_prompt;
pub use synthesizer::{synthesize_report, ReportSynthesizer};

use anyhow::Result;
use tracing::warn;

use crate::models::{AnalysisSummary, CostSavingsReport};

/// Maximum findings kept from a parsed narrative
pub const MAX_FINDINGS: usize = 10;

/// Maximum recommendations kept from a parsed narrative
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Maximum priority actions kept from a parsed narrative
pub const MAX_PRIORITY_ACTIONS: usize = 5;

/// Placeholder finding for an accepted narrative with an empty section
pub const FINDINGS_PLACEHOLDER: &str = "Review cost data for optimization opportunities";

/// Placeholder recommendation for an accepted narrative with an empty section
pub const RECOMMENDATIONS_PLACEHOLDER: &str = "Implement cost monitoring";

/// Placeholder priority action when no category produced one
pub const PRIORITY_PLACEHOLDER: &str = "Review findings";

/// Trait for external text-generation providers.
///
/// Implementations perform the round-trip to whatever service produces the
/// narrative; this crate never makes that call itself. A failed round-trip
/// is indistinguishable from "no narrative available" and resolves through
/// the deterministic path.
pub trait NarrativeProvider: Send + Sync {
    /// Generate a free-form narrative for the given prompt
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name, for logging
    fn name(&self) -> &str;
}

/// Produces cost savings reports, with or without a narrative provider
#[derive(Default)]
pub struct ReportGenerator {
    provider: Option<Box<dyn NarrativeProvider>>,
}

impl ReportGenerator {
    /// Generator that only uses deterministic synthesis
    pub fn deterministic() -> Self {
        Self { provider: None }
    }

    /// Generator backed by an external narrative provider
    pub fn with_provider(provider: Box<dyn NarrativeProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Generate a report for the summary.
    ///
    /// Provider absence, provider failure, a blank narrative, and an
    /// unusable narrative all resolve to the deterministic report; none of
    /// them is surfaced as an error.
    pub fn generate(&self, summary: &AnalysisSummary) -> CostSavingsReport {
        let provider = match &self.provider {
            Some(p) => p,
            None => return synthesize_report(summary),
        };

        let prompt = build_prompt(summary);
        match provider.generate(&prompt) {
            Ok(narrative) if !narrative.trim().is_empty() => parse_narrative(&narrative, summary),
            Ok(_) => {
                warn!(
                    provider = provider.name(),
                    "Provider returned an empty narrative, using deterministic report"
                );
                synthesize_report(summary)
            }
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    "Narrative provider failed, using deterministic report"
                );
                synthesize_report(summary)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::CostAnalyzer;
    use crate::models::{CostRecord, ResourceStatus, UsageValue};
    use chrono::NaiveDate;

    struct StaticProvider(&'static str);

    impl NarrativeProvider for StaticProvider {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
        fn name(&self) -> &str {
            "static"
        }
    }

    struct FailingProvider;

    impl NarrativeProvider for FailingProvider {
        fn generate(&self, _prompt: &str) -> Result<String> {
            anyhow::bail!("connection refused")
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    fn summary() -> AnalysisSummary {
        let cohort = vec![CostRecord {
            service: "cache".to_string(),
            region: "us-east-1".to_string(),
            instance_type: "r5.large".to_string(),
            daily_cost: 12.0,
            usage_cpu_avg: UsageValue::Number(2.0),
            usage_mem_avg: UsageValue::Number(2.0),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: ResourceStatus::Active,
        }];
        CostAnalyzer::new().analyze(&cohort).unwrap()
    }

    #[test]
    fn test_no_provider_uses_deterministic_path() {
        let summary = summary();
        let report = ReportGenerator::deterministic().generate(&summary);
        assert_eq!(report, synthesize_report(&summary));
    }

    #[test]
    fn test_provider_failure_falls_back() {
        let summary = summary();
        let report = ReportGenerator::with_provider(Box::new(FailingProvider)).generate(&summary);
        assert_eq!(report, synthesize_report(&summary));
    }

    #[test]
    fn test_blank_narrative_falls_back() {
        let summary = summary();
        let report =
            ReportGenerator::with_provider(Box::new(StaticProvider("  \n "))).generate(&summary);
        assert_eq!(report, synthesize_report(&summary));
    }

    #[test]
    fn test_usable_narrative_is_parsed() {
        let summary = summary();
        let narrative = "Executive Summary\n\
                         Idle cache capacity dominates spend.\n\
                         Key Findings\n\
                         - The cache fleet sits below 5% utilization\n";
        let report =
            ReportGenerator::with_provider(Box::new(StaticProvider(narrative))).generate(&summary);
        assert_eq!(report.summary, "Idle cache capacity dominates spend.");
        assert_eq!(
            report.findings,
            vec!["The cache fleet sits below 5% utilization".to_string()]
        );
    }
}
