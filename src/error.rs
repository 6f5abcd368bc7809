//! Error types for Synheart Insights

use thiserror::Error;

/// Errors that can occur while generating insights.
///
/// Empty, partial or zero-total aggregates are not errors: they produce an
/// informational insight. Only inputs of the wrong shape end up here.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),
}
