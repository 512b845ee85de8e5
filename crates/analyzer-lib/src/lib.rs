//! Core library for cloud cost analysis
//!
//! This crate provides the core functionality for:
//! - CSV ingestion of cost records
//! - Rule-based waste classification (underutilized, idle, high-cost)
//! - Savings estimation without double-counting
//! - Cost savings report synthesis, deterministic or narrative-backed
//! - Metrics and observability

pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod ingest;
pub mod models;
pub mod observability;
pub mod report;
pub mod savings;

pub use analyzer::CostAnalyzer;
pub use classifier::{WasteClassifier, WasteThresholds};
pub use error::{AnalysisError, IngestError};
pub use models::*;
pub use observability::AnalyzerMetrics;
pub use report::{
    build_prompt, narrative_is_usable, parse_narrative, synthesize_report, NarrativeProvider,
    ReportGenerator, ReportSynthesizer,
};
pub use savings::{RecoveryRates, SavingsEstimator};
