//! Snapshot of how detected emotions are distributed

use crate::config::Thresholds;
use crate::stats;
use crate::types::{DistributionEntry, Emotion, Insight};

/// Merge entries by emotion label (vocabulary names are matched leniently),
/// keeping the order in which each emotion first appears.
fn merged(entries: &[DistributionEntry]) -> Vec<(String, u64)> {
    stats::tally(entries.iter().map(|entry| {
        let label = match Emotion::parse(&entry.emotion) {
            Some(emotion) => emotion.as_str().to_string(),
            None => entry.emotion.trim().to_string(),
        };
        (label, entry.count)
    }))
}

/// Percentage share of every emotion present in the input
pub fn shares(entries: &[DistributionEntry]) -> Vec<(String, f64)> {
    let counts = merged(entries);
    let total = stats::total(counts.iter().map(|(_, count)| *count));

    counts
        .into_iter()
        .filter_map(|(label, count)| Some((label, stats::count_share(count, total)?)))
        .collect()
}

/// Generate distribution insights
pub fn analyze(entries: &[DistributionEntry], thresholds: &Thresholds) -> Vec<Insight> {
    let counts: Vec<(String, u64)> = merged(entries)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect();
    let total = stats::total(counts.iter().map(|(_, count)| *count));

    if total == 0 {
        return vec![Insight::normal(
            "No emotion data available for the selected period",
        )];
    }

    let share = |count: u64| stats::count_share(count, total).unwrap_or(0.0);
    let mut insights = Vec::new();

    if let Some(top) = stats::argmax_by(&counts, |(_, count)| *count as f64) {
        let (label, count) = &counts[top];
        insights.push(Insight::normal(format!(
            "Most frequent emotion: {} ({:.1}% of analyses)",
            label,
            share(*count)
        )));
    }

    let top = stats::top_k_by(&counts, thresholds.top_emotions, |(_, count)| *count as f64);
    let top_labels: Vec<&str> = top.iter().map(|(label, _)| label.as_str()).collect();
    let top_count = stats::total(top.iter().map(|(_, count)| *count));
    insights.push(Insight::normal(format!(
        "Top {} emotions ({}) account for {:.1}% of analyses",
        top.len(),
        top_labels.join(", "),
        share(top_count)
    )));

    let negative = stats::total(
        counts
            .iter()
            .filter(|(label, _)| Emotion::parse(label).is_some_and(|e| e.is_negative()))
            .map(|(_, count)| *count),
    );
    let negative_share = share(negative);
    if negative_share > thresholds.negative_share_alert {
        insights.push(Insight::alert(format!(
            "Negative emotions account for {:.1}% of analyses",
            negative_share
        )));
    } else if negative_share < thresholds.negative_share_ok {
        insights.push(Insight::ok(format!(
            "Negative emotions account for only {:.1}% of analyses",
            negative_share
        )));
    }

    let missing: Vec<&str> = Emotion::ALL
        .iter()
        .filter(|emotion| !counts.iter().any(|(label, _)| label == emotion.as_str()))
        .map(|emotion| emotion.as_str())
        .collect();
    if (1..=thresholds.max_missing_listed).contains(&missing.len()) {
        insights.push(Insight::normal(format!(
            "Not detected in this period: {}",
            missing.join(", ")
        )));
    }

    insights
}
