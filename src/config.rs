//! Classification thresholds
//!
//! Every cut-off used by the report categories lives here so callers can
//! override policy without touching the computations. Comparisons against
//! these values are strict: a value equal to a threshold never crosses it.

use crate::error::InsightError;
use serde::{Deserialize, Serialize};

/// Upper bound for the recent-alert window (ten years)
pub const MAX_ALERT_WINDOW_HOURS: i64 = 24 * 365 * 10;

/// Threshold policy shared by all report categories.
///
/// Percentages are expressed on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum split-half delta (percentage points) reported as a trend
    pub trend_delta: f64,
    /// Minimum max-min range reported as high variability
    pub variability_range: f64,
    /// Mean above which a concerning emotion raises an alert
    pub concerning_mean: f64,
    /// Negative share above which a distribution raises an alert
    pub negative_share_alert: f64,
    /// Negative share below which a distribution is reported as healthy
    pub negative_share_ok: f64,
    /// Number of emotions in the top-N distribution line
    pub top_emotions: usize,
    /// Absent emotions are listed only when at most this many are missing
    pub max_missing_listed: usize,
    /// Critical share above which classification raises an alert
    pub critical_alert: f64,
    /// Critical share above which classification asks for caution
    pub critical_caution: f64,
    /// Normal-level share above which a reassuring note is added
    pub normal_majority: f64,
    /// Average completion above which group activity is healthy
    pub completion_ok: f64,
    /// Average completion above which group activity is acceptable
    pub completion_neutral: f64,
    /// Global effectiveness above which recommendations are healthy
    pub effectiveness_ok: f64,
    /// Global effectiveness above which recommendations are acceptable
    pub effectiveness_neutral: f64,
    /// Effectiveness below which a recommendation type is flagged
    pub low_effectiveness: f64,
    /// A type needs more than this many generated recommendations to be flagged
    pub min_generated: u64,
    /// Window (hours) for counting recent alerts
    pub recent_alert_hours: i64,
    /// Metric value above which a user is considered at risk
    pub at_risk_metric: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            trend_delta: 5.0,
            variability_range: 30.0,
            concerning_mean: 60.0,
            negative_share_alert: 60.0,
            negative_share_ok: 40.0,
            top_emotions: 3,
            max_missing_listed: 3,
            critical_alert: 30.0,
            critical_caution: 15.0,
            normal_majority: 50.0,
            completion_ok: 70.0,
            completion_neutral: 40.0,
            effectiveness_ok: 70.0,
            effectiveness_neutral: 40.0,
            low_effectiveness: 30.0,
            min_generated: 5,
            recent_alert_hours: 24,
            at_risk_metric: 70.0,
        }
    }
}

impl Thresholds {
    /// Load thresholds from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, InsightError> {
        let thresholds: Thresholds = serde_json::from_str(json)
            .map_err(|e| InsightError::InvalidThresholds(e.to_string()))?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Serialize thresholds to pretty JSON
    pub fn to_json(&self) -> Result<String, InsightError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make classification ambiguous
    pub fn validate(&self) -> Result<(), InsightError> {
        let values = [
            ("trend_delta", self.trend_delta),
            ("variability_range", self.variability_range),
            ("concerning_mean", self.concerning_mean),
            ("negative_share_alert", self.negative_share_alert),
            ("negative_share_ok", self.negative_share_ok),
            ("critical_alert", self.critical_alert),
            ("critical_caution", self.critical_caution),
            ("normal_majority", self.normal_majority),
            ("completion_ok", self.completion_ok),
            ("completion_neutral", self.completion_neutral),
            ("effectiveness_ok", self.effectiveness_ok),
            ("effectiveness_neutral", self.effectiveness_neutral),
            ("low_effectiveness", self.low_effectiveness),
            ("at_risk_metric", self.at_risk_metric),
        ];

        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(InsightError::InvalidThresholds(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        let ordered = [
            ("negative_share_ok", self.negative_share_ok, "negative_share_alert", self.negative_share_alert),
            ("critical_caution", self.critical_caution, "critical_alert", self.critical_alert),
            ("completion_neutral", self.completion_neutral, "completion_ok", self.completion_ok),
            ("effectiveness_neutral", self.effectiveness_neutral, "effectiveness_ok", self.effectiveness_ok),
        ];

        for (low_name, low, high_name, high) in ordered {
            if low > high {
                return Err(InsightError::InvalidThresholds(format!(
                    "{} ({}) must not exceed {} ({})",
                    low_name, low, high_name, high
                )));
            }
        }

        if !(1..=MAX_ALERT_WINDOW_HOURS).contains(&self.recent_alert_hours) {
            return Err(InsightError::InvalidThresholds(format!(
                "recent_alert_hours must be between 1 and {}",
                MAX_ALERT_WINDOW_HOURS
            )));
        }

        if self.top_emotions == 0 {
            return Err(InsightError::InvalidThresholds(
                "top_emotions must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Thresholds::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let thresholds = Thresholds::from_json(r#"{"critical_alert": 25.0}"#).unwrap();

        assert_eq!(thresholds.critical_alert, 25.0);
        assert_eq!(thresholds.critical_caution, 15.0);
        assert_eq!(thresholds.trend_delta, 5.0);
    }

    #[test]
    fn test_inverted_pair_rejected() {
        let result = Thresholds::from_json(r#"{"completion_neutral": 80.0}"#);
        assert!(matches!(result, Err(InsightError::InvalidThresholds(_))));
    }

    #[test]
    fn test_negative_value_rejected() {
        let result = Thresholds::from_json(r#"{"trend_delta": -1.0}"#);
        assert!(matches!(result, Err(InsightError::InvalidThresholds(_))));
    }

    #[test]
    fn test_alert_window_bounds() {
        assert!(Thresholds::from_json(r#"{"recent_alert_hours": 0}"#).is_err());
        assert!(Thresholds::from_json(r#"{"recent_alert_hours": 48}"#).is_ok());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = Thresholds::from_json(r#"{"trend_delta": "five"}"#);
        assert!(matches!(result, Err(InsightError::InvalidThresholds(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let json = Thresholds::default().to_json().unwrap();
        assert_eq!(Thresholds::from_json(&json).unwrap(), Thresholds::default());
    }
}
