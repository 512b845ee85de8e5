//! HTTP API for cost analysis
//!
//! Holds the uploaded cohort in memory and exposes analysis, report
//! generation, record queries, health, and Prometheus metrics endpoints.
//! The cohort store lives in `AppState`; there is no process-wide static,
//! so independent server instances cannot interfere.

use analyzer_lib::{
    ingest, narrative_is_usable, parse_narrative, synthesize_report, AnalysisError,
    AnalysisSummary, AnalyzerMetrics, ClassifiedRecord, CostAnalyzer, CostRecord,
    CostSavingsReport, IngestError,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RwLock<Vec<CostRecord>>>,
    pub analyzer: CostAnalyzer,
    pub metrics: AnalyzerMetrics,
}

impl AppState {
    pub fn new(metrics: AnalyzerMetrics) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            analyzer: CostAnalyzer::new(),
            metrics,
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response after a CSV upload
#[derive(Debug, Serialize, Deserialize)]
pub struct CsvUploadResponse {
    pub message: String,
    pub records_processed: usize,
    pub analysis_summary: AnalysisSummary,
}

/// Optional report-generation parameters
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    /// Externally produced narrative to parse; absent means deterministic
    /// synthesis
    #[serde(default)]
    pub narrative: Option<String>,
}

/// Health check body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub records_count: usize,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn no_data_error() -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        "No cost data available. Please upload a CSV file first.",
    )
}

fn analysis_error(e: AnalysisError) -> ApiError {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

/// Upload a CSV cohort, replacing any previously stored records
async fn upload_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<CsvUploadResponse>, ApiError> {
    let records = ingest::read_records(body.as_bytes()).map_err(|e| {
        state.metrics.inc_ingest_errors();
        match e {
            IngestError::NoValidRecords => {
                error_response(StatusCode::BAD_REQUEST, "No valid records found in CSV file")
            }
            IngestError::Csv(e) => error_response(
                StatusCode::BAD_REQUEST,
                format!("Error processing CSV file: {}", e),
            ),
        }
    })?;

    let analysis_summary = analyze_timed(&state, &records).map_err(analysis_error)?;

    let mut store = state.records.write().await;
    *store = records;
    let count = store.len();
    drop(store);

    state.metrics.inc_uploads();
    state.metrics.set_records_stored(count as i64);
    info!(records = count, "Cohort uploaded");

    Ok(Json(CsvUploadResponse {
        message: format!("Successfully processed {} records", count),
        records_processed: count,
        analysis_summary,
    }))
}

/// Analyze the stored cohort
async fn analyze(State(state): State<Arc<AppState>>) -> Result<Json<AnalysisSummary>, ApiError> {
    let records = state.records.read().await;
    if records.is_empty() {
        return Err(no_data_error());
    }

    let summary = analyze_timed(&state, &records).map_err(analysis_error)?;
    Ok(Json(summary))
}

/// Generate a cost savings report, deterministic or narrative-backed
async fn generate_report(
    State(state): State<Arc<AppState>>,
    body: Option<Json<GenerateReportRequest>>,
) -> Result<Json<CostSavingsReport>, ApiError> {
    let records = state.records.read().await;
    if records.is_empty() {
        return Err(no_data_error());
    }

    let summary = analyze_timed(&state, &records).map_err(analysis_error)?;
    drop(records);

    let narrative = body.and_then(|Json(req)| req.narrative);
    let report = match narrative.as_deref().map(str::trim) {
        Some(narrative) if !narrative.is_empty() => {
            if !narrative_is_usable(narrative) {
                state.metrics.inc_narrative_fallbacks();
            }
            parse_narrative(narrative, &summary)
        }
        // A missing or blank narrative is indistinguishable from "no
        // provider": deterministic synthesis, not an error
        _ => synthesize_report(&summary),
    };

    state.metrics.inc_reports_generated();
    Ok(Json(report))
}

/// All stored records with their classification flags
async fn get_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClassifiedRecord>>, ApiError> {
    let records = state.records.read().await;
    let classified = state
        .analyzer
        .classify_cohort(&records)
        .map_err(analysis_error)?;
    Ok(Json(classified))
}

/// One stored record by service name
async fn get_record_by_service(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
) -> Result<Json<ClassifiedRecord>, ApiError> {
    let records = state.records.read().await;
    if records.is_empty() {
        return Err(no_data_error());
    }

    let classified = state
        .analyzer
        .classify_cohort(&records)
        .map_err(analysis_error)?;

    classified
        .into_iter()
        .find(|r| r.record.service == service)
        .map(Json)
        .ok_or_else(|| {
            error_response(
                StatusCode::NOT_FOUND,
                format!("Service '{}' not found", service),
            )
        })
}

/// Health check: always healthy once serving, reports stored record count
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records_count = state.records.read().await.len();
    Json(HealthResponse {
        status: "healthy".to_string(),
        records_count,
    })
}

/// Prometheus metrics endpoint
async fn metrics() -> Result<impl IntoResponse, ApiError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    ))
}

/// Run one timed analysis and record it in the metrics
fn analyze_timed(
    state: &AppState,
    records: &[CostRecord],
) -> Result<AnalysisSummary, AnalysisError> {
    let start = Instant::now();
    let summary = state.analyzer.analyze(records)?;
    state
        .metrics
        .observe_analysis_latency(start.elapsed().as_secs_f64());
    state.metrics.inc_analyses();
    Ok(summary)
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/upload-csv", post(upload_csv))
        .route("/api/v1/analyze", get(analyze))
        .route("/api/v1/generate-report", post(generate_report))
        .route("/api/v1/records", get(get_records))
        .route("/api/v1/records/:service", get(get_record_by_service))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(bind_address: String, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", bind_address, port);
    info!(addr = %addr, "Starting cost API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
