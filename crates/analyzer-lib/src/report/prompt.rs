//! Prompt construction for the narrative provider
//!
//! Renders an `AnalysisSummary` into the text prompt handed to whatever
//! external provider produces the narrative. The requested response shape
//! matches what the parser expects: an executive summary plus bulleted
//! findings, recommendations, and priority actions.

use std::fmt::Write;

use crate::models::{AnalysisSummary, ClassifiedRecord};

/// Resources listed per category in the prompt
const MAX_LISTED_RESOURCES: usize = 5;

fn push_resource_lines(
    prompt: &mut String,
    resources: &[ClassifiedRecord],
    detail: impl Fn(&ClassifiedRecord) -> String,
) {
    for r in resources.iter().take(MAX_LISTED_RESOURCES) {
        let _ = writeln!(
            prompt,
            "- {} ({}): {}",
            r.record.service, r.record.instance_type, detail(r)
        );
    }
}

/// Build the analysis prompt for a narrative provider
pub fn build_prompt(summary: &AnalysisSummary) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Analyze the following cloud cost data and generate a comprehensive cost savings report.\n"
    );
    let _ = writeln!(prompt, "Summary:");
    let _ = writeln!(prompt, "- Total Resources: {}", summary.total_records);
    let _ = writeln!(
        prompt,
        "- Total Daily Cost: ${:.2}",
        summary.total_daily_cost
    );
    let _ = writeln!(
        prompt,
        "- Total Monthly Cost Estimate: ${:.2}",
        summary.total_monthly_cost_estimate
    );
    let _ = writeln!(
        prompt,
        "- Potential Monthly Savings: ${:.2}\n",
        summary.potential_monthly_savings
    );

    let _ = writeln!(prompt, "Flagged categories:");
    let _ = writeln!(
        prompt,
        "- Underutilized Resources: {}",
        summary.underutilized_count
    );
    let _ = writeln!(prompt, "- Idle Resources: {}", summary.idle_count);
    let _ = writeln!(
        prompt,
        "- High-Cost Anomalies: {}\n",
        summary.high_cost_anomaly_count
    );

    let _ = writeln!(prompt, "Underutilized Resources:");
    push_resource_lines(&mut prompt, &summary.underutilized_resources, |r| {
        format!(
            "CPU {}%, Memory {}%, Cost: ${:.2}/day",
            r.usage_cpu_avg_float, r.usage_mem_avg_float, r.record.daily_cost
        )
    });

    let _ = writeln!(prompt, "\nIdle Resources:");
    push_resource_lines(&mut prompt, &summary.idle_resources, |r| {
        format!(
            "Status: {}, Cost: ${:.2}/day",
            r.record.status, r.record.daily_cost
        )
    });

    let _ = writeln!(prompt, "\nHigh-Cost Anomalies:");
    push_resource_lines(&mut prompt, &summary.high_cost_anomalies, |r| {
        format!("Cost: ${:.2}/day", r.record.daily_cost)
    });

    prompt.push_str(
        "\nPlease provide:\n\
         1. Executive summary (2-3 sentences)\n\
         2. Key findings (bullet points)\n\
         3. Actionable recommendations (prioritized)\n\
         4. Priority actions (top 3-5 actions to take immediately)\n\n\
         Format your response in a structured way that can be parsed.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::CostAnalyzer;
    use crate::models::{CostRecord, ResourceStatus, UsageValue};
    use chrono::NaiveDate;

    #[test]
    fn test_prompt_lists_flagged_resources() {
        let cohort = vec![
            CostRecord {
                service: "cache".to_string(),
                region: "us-east-1".to_string(),
                instance_type: "r5.large".to_string(),
                daily_cost: 12.0,
                usage_cpu_avg: UsageValue::Number(2.0),
                usage_mem_avg: UsageValue::Number(2.0),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                status: ResourceStatus::Idle,
            },
            CostRecord {
                service: "web".to_string(),
                region: "us-east-1".to_string(),
                instance_type: "m5.large".to_string(),
                daily_cost: 8.0,
                usage_cpu_avg: UsageValue::Number(75.0),
                usage_mem_avg: UsageValue::Number(60.0),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                status: ResourceStatus::Active,
            },
            // 100/day against a cohort average of 40 makes this an anomaly
            CostRecord {
                service: "etl".to_string(),
                region: "us-east-1".to_string(),
                instance_type: "c5.2xlarge".to_string(),
                daily_cost: 100.0,
                usage_cpu_avg: UsageValue::Number(90.0),
                usage_mem_avg: UsageValue::Number(90.0),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                status: ResourceStatus::Active,
            },
        ];
        let summary = CostAnalyzer::new().analyze(&cohort).unwrap();
        let prompt = build_prompt(&summary);

        assert!(prompt.contains("Total Resources: 3"));
        assert!(prompt.contains("cache (r5.large): Status: idle, Cost: $12.00/day"));
        assert!(prompt.contains("etl (c5.2xlarge): Cost: $100.00/day"));
        assert!(prompt.contains("Executive summary"));
    }
}
