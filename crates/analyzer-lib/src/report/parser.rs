//! Narrative parsing
//!
//! Heuristic line scanner for the loosely structured text an external
//! generative provider returns: section headers switch the active section,
//! bulleted lines fill it. The token checks run before the bullet check, so
//! a bullet that reads like a header ("- Recommendations:") switches the
//! section instead of being captured. A narrative that yields no summary
//! sentence or no findings is unusable and the deterministic synthesizer
//! takes over wholesale.

use tracing::warn;

use crate::models::{AnalysisSummary, CostSavingsReport};

use super::synthesizer::synthesize_report;
use super::{
    FINDINGS_PLACEHOLDER, MAX_FINDINGS, MAX_PRIORITY_ACTIONS, MAX_RECOMMENDATIONS,
    PRIORITY_PLACEHOLDER, RECOMMENDATIONS_PLACEHOLDER,
};

/// Bullet markers stripped from list items
const BULLET_MARKERS: &[char] = &['-', '•', '*', ' '];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Findings,
    Recommendations,
    Priority,
}

/// Raw sections scanned out of a narrative, before usability checks
#[derive(Debug, Default)]
struct NarrativeSections {
    summary: Option<String>,
    findings: Vec<String>,
    recommendations: Vec<String>,
    priority_actions: Vec<String>,
}

impl NarrativeSections {
    /// A narrative is usable only if it produced a summary sentence and at
    /// least one finding
    fn is_usable(&self) -> bool {
        self.summary.is_some() && !self.findings.is_empty()
    }
}

/// Map a line to the section it switches to, if any
fn section_for(line: &str) -> Option<Section> {
    let lower = line.to_lowercase();
    if lower.contains("summary") || lower.contains("executive") {
        Some(Section::Summary)
    } else if lower.contains("finding") {
        Some(Section::Findings)
    } else if lower.contains("recommendation") {
        Some(Section::Recommendations)
    } else if lower.contains("priority") || lower.contains("action") {
        Some(Section::Priority)
    } else {
        None
    }
}

/// Scan a narrative line by line into sections
fn scan(narrative: &str) -> NarrativeSections {
    let mut sections = NarrativeSections::default();
    let mut current: Option<Section> = None;

    for raw_line in narrative.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(section) = section_for(line) {
            current = Some(section);
        } else if line.starts_with('-') || line.starts_with('•') || line.starts_with('*') {
            let item = line.trim_start_matches(BULLET_MARKERS).trim();
            if item.is_empty() {
                continue;
            }
            match current {
                Some(Section::Findings) => sections.findings.push(item.to_string()),
                Some(Section::Recommendations) => sections.recommendations.push(item.to_string()),
                Some(Section::Priority) => sections.priority_actions.push(item.to_string()),
                // Bullets in the summary section or before any header are dropped
                _ => {}
            }
        } else if current == Some(Section::Summary) && sections.summary.is_none() {
            sections.summary = Some(line.to_string());
        }
    }

    sections
}

/// Whether a narrative would survive parsing without the fallback.
///
/// Exposed so callers can account for fallbacks without re-running the
/// whole parse.
pub fn narrative_is_usable(narrative: &str) -> bool {
    scan(narrative).is_usable()
}

/// Parse a narrative into a structured report.
///
/// Unusable narratives resolve to the deterministic report for the same
/// summary; accepted ones get fixed placeholders for any section that came
/// back empty. The result is always fully populated.
pub fn parse_narrative(narrative: &str, summary: &AnalysisSummary) -> CostSavingsReport {
    let mut sections = scan(narrative);

    if !sections.is_usable() {
        warn!(
            narrative_chars = narrative.len(),
            "Narrative unusable (no summary or no findings), using deterministic report"
        );
        return synthesize_report(summary);
    }

    sections.findings.truncate(MAX_FINDINGS);
    sections.recommendations.truncate(MAX_RECOMMENDATIONS);
    sections.priority_actions.truncate(MAX_PRIORITY_ACTIONS);

    if sections.findings.is_empty() {
        sections.findings.push(FINDINGS_PLACEHOLDER.to_string());
    }
    if sections.recommendations.is_empty() {
        sections
            .recommendations
            .push(RECOMMENDATIONS_PLACEHOLDER.to_string());
    }
    if sections.priority_actions.is_empty() {
        sections
            .priority_actions
            .push(PRIORITY_PLACEHOLDER.to_string());
    }

    CostSavingsReport {
        // is_usable guarantees the summary sentence exists
        summary: sections.summary.unwrap_or_default(),
        findings: sections.findings,
        recommendations: sections.recommendations,
        estimated_savings: summary.potential_monthly_savings,
        priority_actions: sections.priority_actions,
        analysis_summary: summary.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::CostAnalyzer;
    use crate::models::{CostRecord, ResourceStatus, UsageValue};
    use chrono::NaiveDate;

    fn summary() -> AnalysisSummary {
        let cohort = vec![
            CostRecord {
                service: "cache".to_string(),
                region: "us-east-1".to_string(),
                instance_type: "r5.large".to_string(),
                daily_cost: 12.0,
                usage_cpu_avg: UsageValue::Text("2%".to_string()),
                usage_mem_avg: UsageValue::Text("2%".to_string()),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                status: ResourceStatus::Active,
            },
            CostRecord {
                service: "web".to_string(),
                region: "us-east-1".to_string(),
                instance_type: "m5.large".to_string(),
                daily_cost: 8.0,
                usage_cpu_avg: UsageValue::Text("75%".to_string()),
                usage_mem_avg: UsageValue::Text("60%".to_string()),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                status: ResourceStatus::Active,
            },
        ];
        CostAnalyzer::new().analyze(&cohort).unwrap()
    }

    #[test]
    fn test_well_formed_narrative() {
        let narrative = "\
Executive Summary
The cache fleet is the dominant source of recoverable spend this month.

Key Findings
- cache runs at 2% CPU while costing $12/day
- One resource qualifies for immediate shutdown

Recommendations
- Stop the cache instance outside business hours
• Consolidate onto a smaller instance class

Priority Actions
* Terminate the idle cache instance this week
";
        let s = summary();
        let report = parse_narrative(narrative, &s);

        assert_eq!(
            report.summary,
            "The cache fleet is the dominant source of recoverable spend this month."
        );
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(
            report.priority_actions,
            vec!["Terminate the idle cache instance this week".to_string()]
        );
        assert_eq!(report.estimated_savings, s.potential_monthly_savings);
    }

    #[test]
    fn test_mixed_bullet_markers() {
        let narrative = "Summary\nSpend is flat.\nFindings\n- dash\n• dot\n* star\n";
        let report = parse_narrative(narrative, &summary());
        assert_eq!(report.findings, vec!["dash", "dot", "star"]);
    }

    #[test]
    fn test_unrelated_prose_falls_back_to_deterministic() {
        let narrative = "The weather in the data center region has been mild.\n\
                         Nothing else to add here.\n";
        let s = summary();
        assert!(!narrative_is_usable(narrative));
        assert_eq!(parse_narrative(narrative, &s), synthesize_report(&s));
    }

    #[test]
    fn test_findings_without_summary_falls_back() {
        let narrative = "Findings\n- something is idle\n";
        let s = summary();
        assert_eq!(parse_narrative(narrative, &s), synthesize_report(&s));
    }

    #[test]
    fn test_summary_without_findings_falls_back() {
        let narrative = "Executive Summary\nEverything is fine.\n";
        let s = summary();
        assert_eq!(parse_narrative(narrative, &s), synthesize_report(&s));
    }

    #[test]
    fn test_truncation_limits() {
        let mut narrative = String::from("Summary\nToo much detail.\nFindings\n");
        for i in 0..15 {
            narrative.push_str(&format!("- item {}\n", i));
        }
        narrative.push_str("Priority Actions\n");
        for i in 0..8 {
            narrative.push_str(&format!("- task {}\n", i));
        }
        let report = parse_narrative(&narrative, &summary());
        assert_eq!(report.findings.len(), MAX_FINDINGS);
        assert_eq!(report.priority_actions.len(), MAX_PRIORITY_ACTIONS);
    }

    #[test]
    fn test_accepted_narrative_gets_placeholders_for_empty_sections() {
        let narrative = "Summary\nCohort is small but wasteful.\nFindings\n- one idle resource\n";
        let report = parse_narrative(narrative, &summary());
        assert_eq!(
            report.recommendations,
            vec![RECOMMENDATIONS_PLACEHOLDER.to_string()]
        );
        assert_eq!(
            report.priority_actions,
            vec![PRIORITY_PLACEHOLDER.to_string()]
        );
    }

    #[test]
    fn test_header_tokens_win_over_bullet_markers() {
        // A bullet containing a header token switches sections instead of
        // being captured as an item
        let narrative =
            "Summary\nShort overview.\nFindings\n- real item\n- Recommendations:\n- consolidate the fleet\n";
        let report = parse_narrative(narrative, &summary());
        assert_eq!(report.findings, vec!["real item"]);
        assert_eq!(report.recommendations, vec!["consolidate the fleet"]);
    }

    #[test]
    fn test_only_first_summary_line_is_kept() {
        let narrative =
            "Summary\nFirst sentence wins.\nSecond sentence ignored.\nFindings\n- f\n";
        let report = parse_narrative(narrative, &summary());
        assert_eq!(report.summary, "First sentence wins.");
    }
}
