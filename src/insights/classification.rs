//! Stress classification summary

use crate::config::Thresholds;
use crate::stats;
use crate::types::{ClassificationEntry, Insight, SeverityLevel};

/// Generate classification insights
pub fn analyze(entries: &[ClassificationEntry], thresholds: &Thresholds) -> Vec<Insight> {
    let counts = stats::tally(entries.iter().map(|entry| (entry.level, entry.count)));
    let total = stats::total(counts.iter().map(|(_, count)| *count));

    if total == 0 {
        return vec![Insight::normal(
            "No classification data available for the selected period",
        )];
    }

    let share = |count: u64| stats::count_share(count, total).unwrap_or(0.0);
    let count_of = |predicate: fn(&SeverityLevel) -> bool| -> u64 {
        stats::total(
            counts
                .iter()
                .filter(|(level, _)| predicate(level))
                .map(|(_, count)| *count),
        )
    };

    let mut insights = Vec::new();

    let critical = share(count_of(SeverityLevel::is_critical));
    if critical > thresholds.critical_alert {
        insights.push(Insight::alert(format!(
            "Critical: {:.1}% of analyses show high or very high stress levels",
            critical
        )));
    } else if critical > thresholds.critical_caution {
        insights.push(Insight::normal(format!(
            "Caution: {:.1}% of analyses show high or very high stress levels",
            critical
        )));
    } else {
        insights.push(Insight::ok(format!(
            "Only {:.1}% of analyses show high or very high stress levels",
            critical
        )));
    }

    if let Some(top) = stats::argmax_by(&counts, |(_, count)| *count as f64) {
        let (level, count) = counts[top];
        insights.push(Insight::normal(format!(
            "Most frequent level: {} ({:.1}% of analyses)",
            level.label(),
            share(count)
        )));
    }

    let normal = share(count_of(|level| *level == SeverityLevel::Normal));
    if normal > thresholds.normal_majority {
        insights.push(Insight::ok(format!(
            "{:.1}% of analyses fall within the normal level",
            normal
        )));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use pretty_assertions::assert_eq;

    fn entry(level: SeverityLevel, count: u64) -> ClassificationEntry {
        ClassificationEntry { level, count }
    }

    #[test]
    fn test_zero_total() {
        let insights = analyze(&[entry(SeverityLevel::High, 0)], &Thresholds::default());
        assert_eq!(insights.len(), 1);
        assert!(insights[0].text.starts_with("No classification data"));
        assert_eq!(analyze(&[], &Thresholds::default()).len(), 1);
    }

    #[test]
    fn test_critical_exactly_at_alert_threshold_is_caution() {
        let insights = analyze(
            &[
                entry(SeverityLevel::Normal, 70),
                entry(SeverityLevel::High, 20),
                entry(SeverityLevel::VeryHigh, 10),
            ],
            &Thresholds::default(),
        );

        assert_eq!(
            insights,
            vec![
                Insight::normal("Caution: 30.0% of analyses show high or very high stress levels"),
                Insight::normal("Most frequent level: normal (70.0% of analyses)"),
                Insight::ok("70.0% of analyses fall within the normal level"),
            ]
        );
    }

    #[test]
    fn test_critical_just_above_alert_threshold_is_alert() {
        let insights = analyze(
            &[
                entry(SeverityLevel::Normal, 6999),
                entry(SeverityLevel::High, 2001),
                entry(SeverityLevel::VeryHigh, 1000),
            ],
            &Thresholds::default(),
        );

        assert_eq!(insights[0].severity, Severity::Alert);
        assert_eq!(
            insights[0].text,
            "Critical: 30.0% of analyses show high or very high stress levels"
        );
    }

    #[test]
    fn test_low_critical_share_is_ok() {
        let insights = analyze(
            &[entry(SeverityLevel::Normal, 85), entry(SeverityLevel::VeryHigh, 15)],
            &Thresholds::default(),
        );
        assert_eq!(insights[0].severity, Severity::Ok);
    }

    #[test]
    fn test_normal_majority_at_threshold_not_reported() {
        let insights = analyze(
            &[entry(SeverityLevel::Normal, 50), entry(SeverityLevel::Medium, 50)],
            &Thresholds::default(),
        );

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[1].text, "Most frequent level: normal (50.0% of analyses)");
    }

    #[test]
    fn test_most_frequent_level_merges_duplicates() {
        let insights = analyze(
            &[
                entry(SeverityLevel::Normal, 30),
                entry(SeverityLevel::Medium, 25),
                entry(SeverityLevel::Medium, 25),
            ],
            &Thresholds::default(),
        );
        assert_eq!(insights[1].text, "Most frequent level: medium (62.5% of analyses)");
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let insights = analyze(
            &[entry(SeverityLevel::Normal, u64::MAX), entry(SeverityLevel::High, 1)],
            &Thresholds::default(),
        );

        assert_eq!(
            insights,
            vec![
                Insight::ok("Only 0.0% of analyses show high or very high stress levels"),
                Insight::normal("Most frequent level: normal (100.0% of analyses)"),
                Insight::ok("100.0% of analyses fall within the normal level"),
            ]
        );
    }
}
