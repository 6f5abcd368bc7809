//! Roster of pending critical alerts

use super::counted;
use crate::config::Thresholds;
use crate::stats;
use crate::types::{AlertRecord, Insight};
use chrono::{DateTime, Duration, Utc};

/// Generate alert roster insights relative to `now`
pub fn analyze(alerts: &[AlertRecord], now: DateTime<Utc>, thresholds: &Thresholds) -> Vec<Insight> {
    if alerts.is_empty() {
        return vec![Insight::ok("No pending alerts")];
    }

    let mut insights = vec![Insight::normal(format!(
        "{} registered",
        counted(alerts.len() as u64, "alert", "alerts")
    ))];

    let by_kind = stats::tally(alerts.iter().map(|a| (a.kind.as_str(), 1)));
    if by_kind.len() > 1 {
        if let Some(top) = stats::argmax_by(&by_kind, |(_, count)| *count as f64) {
            let (kind, count) = by_kind[top];
            insights.push(Insight::normal(format!(
                "Most frequent alert type: {} ({})",
                kind,
                counted(count, "alert", "alerts")
            )));
        }
    }

    let window_start = now - Duration::hours(thresholds.recent_alert_hours);
    let recent = alerts
        .iter()
        .filter(|a| a.timestamp > window_start && a.timestamp <= now)
        .count();
    if recent > 0 {
        let hours = u64::try_from(thresholds.recent_alert_hours).unwrap_or_default();
        insights.push(Insight::alert(format!(
            "{} in the last {}",
            counted(recent as u64, "alert", "alerts"),
            counted(hours, "hour", "hours")
        )));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn alert(kind: &str, hours_ago: i64) -> AlertRecord {
        AlertRecord {
            kind: kind.to_string(),
            timestamp: now() - Duration::hours(hours_ago),
        }
    }

    #[test]
    fn test_no_alerts() {
        let insights = analyze(&[], now(), &Thresholds::default());
        assert_eq!(insights, vec![Insight::ok("No pending alerts")]);
    }

    #[test]
    fn test_roster() {
        let insights = analyze(
            &[
                alert("high_stress", 2),
                alert("crisis", 30),
                alert("crisis", 1),
                alert("high_stress", 50),
            ],
            now(),
            &Thresholds::default(),
        );

        assert_eq!(
            insights,
            vec![
                Insight::normal("4 alerts registered"),
                Insight::normal("Most frequent alert type: high_stress (2 alerts)"),
                Insight::alert("2 alerts in the last 24 hours"),
            ]
        );
    }

    #[test]
    fn test_single_type_omits_most_frequent() {
        let insights = analyze(&[alert("crisis", 48), alert("crisis", 72)], now(), &Thresholds::default());

        assert_eq!(insights, vec![Insight::normal("2 alerts registered")]);
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let insights = analyze(&[alert("crisis", 24)], now(), &Thresholds::default());
        assert!(!insights.iter().any(|i| i.severity == Severity::Alert));

        let insights = analyze(&[alert("crisis", 23)], now(), &Thresholds::default());
        assert_eq!(insights.last().unwrap().severity, Severity::Alert);
    }

    #[test]
    fn test_future_alerts_are_not_recent() {
        let future = AlertRecord {
            kind: "crisis".to_string(),
            timestamp: now() + Duration::hours(1),
        };
        let insights = analyze(&[future], now(), &Thresholds::default());
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn test_single_alert_reads_singular() {
        let thresholds = Thresholds {
            recent_alert_hours: 1,
            ..Thresholds::default()
        };
        let insights = analyze(&[alert("crisis", 0)], now(), &thresholds);

        assert_eq!(
            insights,
            vec![
                Insight::normal("1 alert registered"),
                Insight::alert("1 alert in the last 1 hour"),
            ]
        );
    }
}
