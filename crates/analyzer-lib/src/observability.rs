//! Observability infrastructure for the cost analyzer
//!
//! Prometheus metrics for ingestion, analysis, and report generation,
//! registered once in a process-wide registry and shared by all handles.

use prometheus::{
    register_histogram, register_int_counter, register_int_gauge, Histogram, IntCounter, IntGauge,
};
use std::sync::OnceLock;

/// Histogram buckets for analysis latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<AnalyzerMetricsInner> = OnceLock::new();

struct AnalyzerMetricsInner {
    analysis_latency_seconds: Histogram,
    analyses_total: IntCounter,
    reports_generated_total: IntCounter,
    narrative_fallbacks_total: IntCounter,
    uploads_total: IntCounter,
    ingest_errors_total: IntCounter,
    records_stored: IntGauge,
}

impl AnalyzerMetricsInner {
    fn new() -> Self {
        Self {
            analysis_latency_seconds: register_histogram!(
                "cost_analyzer_analysis_latency_seconds",
                "Time spent analyzing one cohort of cost records",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register analysis_latency_seconds"),

            analyses_total: register_int_counter!(
                "cost_analyzer_analyses_total",
                "Total number of cohort analyses performed"
            )
            .expect("Failed to register analyses_total"),

            reports_generated_total: register_int_counter!(
                "cost_analyzer_reports_generated_total",
                "Total number of cost savings reports generated"
            )
            .expect("Failed to register reports_generated_total"),

            narrative_fallbacks_total: register_int_counter!(
                "cost_analyzer_narrative_fallbacks_total",
                "Narratives that were unusable and fell back to deterministic synthesis"
            )
            .expect("Failed to register narrative_fallbacks_total"),

            uploads_total: register_int_counter!(
                "cost_analyzer_uploads_total",
                "Total number of CSV uploads accepted"
            )
            .expect("Failed to register uploads_total"),

            ingest_errors_total: register_int_counter!(
                "cost_analyzer_ingest_errors_total",
                "CSV uploads rejected because no valid records were found"
            )
            .expect("Failed to register ingest_errors_total"),

            records_stored: register_int_gauge!(
                "cost_analyzer_records_stored",
                "Number of cost records currently held in memory"
            )
            .expect("Failed to register records_stored"),
        }
    }
}

/// Metrics handle for Prometheus exposition.
///
/// Lightweight; all clones share the same underlying registry entries.
#[derive(Clone)]
pub struct AnalyzerMetrics {
    _private: (),
}

impl Default for AnalyzerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerMetrics {
    /// Create a metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(AnalyzerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &AnalyzerMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record how long one cohort analysis took
    pub fn observe_analysis_latency(&self, duration_secs: f64) {
        self.inner().analysis_latency_seconds.observe(duration_secs);
    }

    pub fn inc_analyses(&self) {
        self.inner().analyses_total.inc();
    }

    pub fn inc_reports_generated(&self) {
        self.inner().reports_generated_total.inc();
    }

    pub fn inc_narrative_fallbacks(&self) {
        self.inner().narrative_fallbacks_total.inc();
    }

    pub fn inc_uploads(&self) {
        self.inner().uploads_total.inc();
    }

    pub fn inc_ingest_errors(&self) {
        self.inner().ingest_errors_total.inc();
    }

    pub fn set_records_stored(&self, count: i64) {
        self.inner().records_stored.set(count);
    }
}
