//! Report encoding
//!
//! This module wraps generated insights into a versioned report envelope and
//! serializes it to JSON for rendering collaborators.

use crate::error::InsightError;
use crate::types::{Insight, InsightReport, ReportCategory, ReportProducer};
use crate::{INSIGHTS_VERSION, PRODUCER_NAME};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder producing report envelopes
#[derive(Debug, Clone)]
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Wrap insights into a report
    pub fn encode(
        &self,
        category: ReportCategory,
        input_records: usize,
        insights: Vec<Insight>,
        computed_at: DateTime<Utc>,
    ) -> InsightReport {
        InsightReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: INSIGHTS_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            category,
            computed_at_utc: computed_at.to_rfc3339(),
            input_records,
            insights,
        }
    }

    /// Encode a report to a JSON string
    pub fn encode_to_json(&self, report: &InsightReport) -> Result<String, InsightError> {
        Ok(serde_json::to_string(report)?)
    }
}
