//! Request dispatch
//!
//! This module provides the public API for Synheart Insights.
//! It parses category requests, routes them to the matching report function
//! and wraps the result into a report envelope.

use crate::config::Thresholds;
use crate::encoder::ReportEncoder;
use crate::error::InsightError;
use crate::insights::{
    alerts, classification, distribution, groups, ranking, recommendations, trend,
};
use crate::types::{
    AlertRecord, ClassificationEntry, DistributionEntry, Emotion, GroupActivity, Insight,
    InsightReport, RecommendationEffectiveness, ReportCategory, TimeSeriesPoint, UserMetric,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metric name used by ranking requests that do not name one
pub const DEFAULT_RANKING_METRIC: &str = "stress";

fn default_ranking_metric() -> String {
    DEFAULT_RANKING_METRIC.to_string()
}

/// A single report request, tagged by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum InsightRequest {
    Trend {
        /// Emotions to analyze; empty means the whole vocabulary
        #[serde(default)]
        emotions: Vec<Emotion>,
        points: Vec<TimeSeriesPoint>,
    },
    Distribution {
        entries: Vec<DistributionEntry>,
    },
    Classification {
        entries: Vec<ClassificationEntry>,
    },
    GroupActivity {
        groups: Vec<GroupActivity>,
    },
    Recommendations {
        entries: Vec<RecommendationEffectiveness>,
    },
    Alerts {
        alerts: Vec<AlertRecord>,
        /// Reference instant for the recent-alert window; defaults to the current time
        #[serde(default, skip_serializing_if = "Option::is_none")]
        now: Option<DateTime<Utc>>,
    },
    Ranking {
        users: Vec<UserMetric>,
        #[serde(default = "default_ranking_metric")]
        metric: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
}

impl InsightRequest {
    /// Parse a request from JSON.
    ///
    /// A request of the wrong shape (unknown category, records that are not
    /// an array, malformed timestamps) is an [`InsightError::InvalidInput`].
    pub fn from_json(json: &str) -> Result<Self, InsightError> {
        serde_json::from_str(json).map_err(|e| InsightError::InvalidInput(e.to_string()))
    }

    pub fn category(&self) -> ReportCategory {
        match self {
            InsightRequest::Trend { .. } => ReportCategory::Trend,
            InsightRequest::Distribution { .. } => ReportCategory::Distribution,
            InsightRequest::Classification { .. } => ReportCategory::Classification,
            InsightRequest::GroupActivity { .. } => ReportCategory::GroupActivity,
            InsightRequest::Recommendations { .. } => ReportCategory::Recommendations,
            InsightRequest::Alerts { .. } => ReportCategory::Alerts,
            InsightRequest::Ranking { .. } => ReportCategory::Ranking,
        }
    }

    /// Number of aggregate records carried by the request
    pub fn record_count(&self) -> usize {
        match self {
            InsightRequest::Trend { points, .. } => points.len(),
            InsightRequest::Distribution { entries } => entries.len(),
            InsightRequest::Classification { entries } => entries.len(),
            InsightRequest::GroupActivity { groups } => groups.len(),
            InsightRequest::Recommendations { entries } => entries.len(),
            InsightRequest::Alerts { alerts, .. } => alerts.len(),
            InsightRequest::Ranking { users, .. } => users.len(),
        }
    }
}

/// Generate a report from request JSON with default thresholds (stateless, one-shot).
///
/// # Arguments
/// * `request_json` - Request JSON tagged with its `category`
///
/// # Returns
/// Report JSON string
///
/// # Example
/// ```ignore
/// let report_json = generate_report(
///     r#"{"category": "alerts", "alerts": []}"#.to_string()
/// )?;
/// ```
pub fn generate_report(request_json: String) -> Result<String, InsightError> {
    InsightEngine::new().process_json(&request_json)
}

/// Processor holding the threshold policy and report encoder.
///
/// Holds no per-request state: the same request always yields the same
/// insights.
#[derive(Debug, Clone)]
pub struct InsightEngine {
    thresholds: Thresholds,
    encoder: ReportEncoder,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with default thresholds
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
            encoder: ReportEncoder::new(),
        }
    }

    /// Create an engine with custom thresholds
    pub fn with_thresholds(thresholds: Thresholds) -> Result<Self, InsightError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            encoder: ReportEncoder::new(),
        })
    }

    /// Load thresholds from JSON
    pub fn load_thresholds(&mut self, json: &str) -> Result<(), InsightError> {
        self.thresholds = Thresholds::from_json(json)?;
        Ok(())
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn trend(&self, points: &[TimeSeriesPoint], emotions: &[Emotion]) -> Vec<Insight> {
        trend::analyze(points, emotions, &self.thresholds)
    }

    pub fn distribution(&self, entries: &[DistributionEntry]) -> Vec<Insight> {
        distribution::analyze(entries, &self.thresholds)
    }

    pub fn classification(&self, entries: &[ClassificationEntry]) -> Vec<Insight> {
        classification::analyze(entries, &self.thresholds)
    }

    pub fn group_activity(&self, groups: &[GroupActivity]) -> Vec<Insight> {
        groups::analyze(groups, &self.thresholds)
    }

    pub fn recommendations(&self, entries: &[RecommendationEffectiveness]) -> Vec<Insight> {
        recommendations::analyze(entries, &self.thresholds)
    }

    pub fn alerts(&self, alerts: &[AlertRecord], now: DateTime<Utc>) -> Vec<Insight> {
        alerts::analyze(alerts, now, &self.thresholds)
    }

    pub fn ranking(&self, users: &[UserMetric], metric: &str, limit: Option<usize>) -> Vec<Insight> {
        ranking::analyze(users, metric, limit, &self.thresholds)
    }

    /// Route a request to its report function.
    ///
    /// `now` is only read by alert requests without their own reference instant.
    pub fn generate(&self, request: &InsightRequest, now: DateTime<Utc>) -> Vec<Insight> {
        let insights = match request {
            InsightRequest::Trend { emotions, points } => self.trend(points, emotions),
            InsightRequest::Distribution { entries } => self.distribution(entries),
            InsightRequest::Classification { entries } => self.classification(entries),
            InsightRequest::GroupActivity { groups } => self.group_activity(groups),
            InsightRequest::Recommendations { entries } => self.recommendations(entries),
            InsightRequest::Alerts { alerts, now: at } => self.alerts(alerts, at.unwrap_or(now)),
            InsightRequest::Ranking {
                users,
                metric,
                limit,
            } => self.ranking(users, metric, *limit),
        };

        debug!(
            category = request.category().as_str(),
            records = request.record_count(),
            insights = insights.len(),
            "generated insights"
        );

        insights
    }

    /// Generate a full report for a request
    pub fn report(&self, request: &InsightRequest) -> InsightReport {
        let now = Utc::now();
        let insights = self.generate(request, now);
        self.encoder
            .encode(request.category(), request.record_count(), insights, now)
    }

    /// Parse request JSON and return report JSON
    pub fn process_json(&self, request_json: &str) -> Result<String, InsightError> {
        let request = InsightRequest::from_json(request_json)?;
        let report = self.report(&request);
        self.encoder.encode_to_json(&report)
    }
}
