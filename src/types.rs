//! Core types for the Synheart Insights engine
//!
//! This module defines the shared vocabularies (emotions, severity levels),
//! the aggregate records consumed by each report category, and the tagged
//! [`Insight`] value every category produces.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Emotion vocabulary produced by the voice analysis collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Ansiedad,
    Estres,
    Felicidad,
    Tristeza,
    Miedo,
    Enojo,
    Neutral,
    Sorpresa,
}

impl Emotion {
    /// Full vocabulary in canonical order
    pub const ALL: [Emotion; 8] = [
        Emotion::Ansiedad,
        Emotion::Estres,
        Emotion::Felicidad,
        Emotion::Tristeza,
        Emotion::Miedo,
        Emotion::Enojo,
        Emotion::Neutral,
        Emotion::Sorpresa,
    ];

    /// Emotions whose sustained high level warrants an alert in trend reports
    pub const CONCERNING: [Emotion; 5] = [
        Emotion::Ansiedad,
        Emotion::Estres,
        Emotion::Miedo,
        Emotion::Enojo,
        Emotion::Tristeza,
    ];

    /// Emotions counted towards the negative share of a distribution
    pub const NEGATIVE: [Emotion; 5] = [
        Emotion::Ansiedad,
        Emotion::Estres,
        Emotion::Tristeza,
        Emotion::Miedo,
        Emotion::Enojo,
    ];

    const NAMES: &'static [&'static str] = &[
        "ansiedad",
        "estres",
        "felicidad",
        "tristeza",
        "miedo",
        "enojo",
        "neutral",
        "sorpresa",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Ansiedad => "ansiedad",
            Emotion::Estres => "estres",
            Emotion::Felicidad => "felicidad",
            Emotion::Tristeza => "tristeza",
            Emotion::Miedo => "miedo",
            Emotion::Enojo => "enojo",
            Emotion::Neutral => "neutral",
            Emotion::Sorpresa => "sorpresa",
        }
    }

    /// Lenient lookup: case-insensitive, trimmed, accepts "estrés"
    pub fn parse(label: &str) -> Option<Emotion> {
        let normalized = label.trim().to_lowercase();
        let normalized = normalized.replace('é', "e");
        Emotion::ALL
            .iter()
            .copied()
            .find(|emotion| emotion.as_str() == normalized)
    }

    pub fn is_concerning(&self) -> bool {
        Emotion::CONCERNING.contains(self)
    }

    pub fn is_negative(&self) -> bool {
        Emotion::NEGATIVE.contains(self)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Emotion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Emotion::parse(&label).ok_or_else(|| D::Error::unknown_variant(&label, Emotion::NAMES))
    }
}

/// Stress classification level, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Normal,
    Medium,
    High,
    VeryHigh,
}

impl SeverityLevel {
    const NAMES: &'static [&'static str] = &[
        "normal", "medium", "medio", "moderado", "high", "alto", "very_high", "muy_alto",
    ];

    /// Lenient lookup: case-insensitive, trimmed, spaces or dashes for
    /// underscores, Spanish names accepted
    pub fn parse(label: &str) -> Option<SeverityLevel> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "normal" => Some(SeverityLevel::Normal),
            "medium" | "medio" | "moderado" => Some(SeverityLevel::Medium),
            "high" | "alto" => Some(SeverityLevel::High),
            "very_high" | "muy_alto" => Some(SeverityLevel::VeryHigh),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Normal => "normal",
            SeverityLevel::Medium => "medium",
            SeverityLevel::High => "high",
            SeverityLevel::VeryHigh => "very_high",
        }
    }

    /// Human-readable label used in insight text
    pub fn label(&self) -> &'static str {
        match self {
            SeverityLevel::Normal => "normal",
            SeverityLevel::Medium => "medium",
            SeverityLevel::High => "high",
            SeverityLevel::VeryHigh => "very high",
        }
    }

    /// The two highest levels make up the critical share
    pub fn is_critical(&self) -> bool {
        matches!(self, SeverityLevel::High | SeverityLevel::VeryHigh)
    }
}

impl<'de> Deserialize<'de> for SeverityLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        SeverityLevel::parse(&label)
            .ok_or_else(|| D::Error::unknown_variant(&label, SeverityLevel::NAMES))
    }
}

/// Presentation marker attached to every insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Ok,
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Ok => "ok",
            Severity::Alert => "alert",
        }
    }

    pub fn parse(marker: &str) -> Option<Severity> {
        match marker {
            "normal" => Some(Severity::Normal),
            "ok" => Some(Severity::Ok),
            "alert" => Some(Severity::Alert),
            _ => None,
        }
    }
}

/// A single advisory line plus its severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub severity: Severity,
}

impl Insight {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(Severity::Normal, text)
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self::new(Severity::Ok, text)
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self::new(Severity::Alert, text)
    }

    /// Render as a marker-prefixed line (`[alert] text`) for string-based renderers
    pub fn to_marked(&self) -> String {
        format!("[{}] {}", self.severity.as_str(), self.text)
    }

    /// Parse a marker-prefixed line. Lines without a known marker are `Normal`.
    pub fn from_marked(line: &str) -> Self {
        let (severity, text) = strip_marker(line);
        Self::new(severity, text)
    }
}

/// Split a marker-prefixed line into its severity and clean display text
pub fn strip_marker(line: &str) -> (Severity, &str) {
    if let Some(rest) = line.strip_prefix('[') {
        if let Some((marker, text)) = rest.split_once(']') {
            if let Some(severity) = Severity::parse(marker) {
                return (severity, text.trim_start());
            }
        }
    }
    (Severity::Normal, line)
}

/// Deserialize a JSON value into a finite number, dropping anything else
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(finite_number))
}

fn finite_number(value: &serde_json::Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

/// One time-ordered sample of emotion percentages (0-100)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Optional label for the sample (usually a date)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Emotion name to raw value; values may be absent or non-numeric
    #[serde(flatten)]
    pub values: BTreeMap<String, serde_json::Value>,
}

impl TimeSeriesPoint {
    /// Build a point from numeric emotion values
    pub fn from_values(values: &[(Emotion, f64)]) -> Self {
        Self {
            label: None,
            values: values
                .iter()
                .map(|(emotion, value)| (emotion.as_str().to_string(), serde_json::json!(value)))
                .collect(),
        }
    }

    /// Numeric value recorded for an emotion, if any.
    ///
    /// The canonical key wins when present; otherwise the first key (in
    /// map order) that names the same emotion is used.
    pub fn value(&self, emotion: Emotion) -> Option<f64> {
        let raw = match self.values.get(emotion.as_str()) {
            Some(value) => value,
            None => self
                .values
                .iter()
                .find(|(key, _)| Emotion::parse(key) == Some(emotion))
                .map(|(_, value)| value)?,
        };
        finite_number(raw)
    }
}

/// Count of analyses per detected emotion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub emotion: String,
    pub count: u64,
}

/// Count of analyses per stress classification level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    pub level: SeverityLevel,
    pub count: u64,
}

/// Activity counters for one support group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupActivity {
    pub group_name: String,
    #[serde(default)]
    pub completed_activities: u64,
    #[serde(default)]
    pub total_activities: u64,
    #[serde(default)]
    pub active_members: u64,
}

/// Outcome counters for one recommendation type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEffectiveness {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub generated: u64,
    #[serde(default)]
    pub useful: u64,
}

/// A raised alert awaiting attention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(rename = "type", alias = "severity")]
    pub kind: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-user metric row used for rankings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetric {
    #[serde(alias = "name")]
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub metric_value: Option<f64>,
    #[serde(default)]
    pub total_analyses: u64,
}

/// Report category handled by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Trend,
    Distribution,
    Classification,
    GroupActivity,
    Recommendations,
    Alerts,
    Ranking,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 7] = [
        ReportCategory::Trend,
        ReportCategory::Distribution,
        ReportCategory::Classification,
        ReportCategory::GroupActivity,
        ReportCategory::Recommendations,
        ReportCategory::Alerts,
        ReportCategory::Ranking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::Trend => "trend",
            ReportCategory::Distribution => "distribution",
            ReportCategory::Classification => "classification",
            ReportCategory::GroupActivity => "group_activity",
            ReportCategory::Recommendations => "recommendations",
            ReportCategory::Alerts => "alerts",
            ReportCategory::Ranking => "ranking",
        }
    }
}

/// Report producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete insight report handed to rendering collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub category: ReportCategory,
    pub computed_at_utc: String,
    /// Number of aggregate records in the request
    pub input_records: usize,
    pub insights: Vec<Insight>,
}
