//! Synheart Insights - Deterministic insight engine for wellness aggregates
//!
//! Insights turns pre-aggregated wellness metrics (emotional-analysis results,
//! group activity counters, recommendation outcomes, alerts) into short,
//! classified advisory statements: request parsing → statistics →
//! threshold classification → report encoding.
//!
//! ## Report categories
//!
//! - **Trend**: split-half trends, variability and elevated emotions over time
//! - **Distribution**: shares of detected emotions
//! - **Classification**: critical share of stress levels
//! - **Group activity**: completion and membership of support groups
//! - **Recommendations**: usefulness of generated recommendations
//! - **Alerts**: pending alert roster
//! - **Ranking**: users ranked by a selected metric

pub mod config;
pub mod encoder;
pub mod error;
pub mod insights;
pub mod pipeline;
pub mod stats;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::Thresholds;
pub use error::InsightError;
pub use pipeline::{generate_report, InsightEngine, InsightRequest};
pub use types::{strip_marker, Emotion, Insight, InsightReport, ReportCategory, Severity};

/// Insights version embedded in all reports
pub const INSIGHTS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "synheart-insights";
