//! Trend analysis over a time series of emotion percentages

use crate::config::Thresholds;
use crate::stats;
use crate::types::{Emotion, Insight, TimeSeriesPoint};

/// Per-emotion statistics over the whole series
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionStats {
    pub emotion: Emotion,
    /// Mean of the defined values
    pub mean: f64,
    /// Split-half trend, `None` with a single value
    pub trend: Option<f64>,
    /// max - min
    pub variability: f64,
}

/// Compute statistics for each requested emotion that has at least one value.
///
/// An empty selection means the whole vocabulary.
pub fn emotion_stats(points: &[TimeSeriesPoint], emotions: &[Emotion]) -> Vec<EmotionStats> {
    let selected: &[Emotion] = if emotions.is_empty() {
        &Emotion::ALL
    } else {
        emotions
    };

    selected
        .iter()
        .filter_map(|&emotion| {
            let values: Vec<f64> = points.iter().filter_map(|p| p.value(emotion)).collect();
            let mean = stats::mean(&values)?;
            let variability = stats::range(&values)?;
            Some(EmotionStats {
                emotion,
                mean,
                trend: stats::split_half_trend(&values),
                variability,
            })
        })
        .collect()
}

/// Generate trend insights
pub fn analyze(
    points: &[TimeSeriesPoint],
    emotions: &[Emotion],
    thresholds: &Thresholds,
) -> Vec<Insight> {
    if points.len() < 2 {
        return vec![insufficient_data()];
    }

    let per_emotion = emotion_stats(points, emotions);
    let Some(top) = stats::argmax_by(&per_emotion, |s| s.mean) else {
        return vec![insufficient_data()];
    };

    let mut insights = vec![Insight::normal(format!(
        "Predominant emotion: {} (average {:.1}%)",
        per_emotion[top].emotion, per_emotion[top].mean
    ))];
    let mut flagged = false;

    let trend_of = |s: &EmotionStats| s.trend.unwrap_or(0.0);

    if let Some(up) = stats::argmax_by(&per_emotion, trend_of) {
        let delta = trend_of(&per_emotion[up]);
        if delta > thresholds.trend_delta {
            insights.push(Insight::normal(format!(
                "Upward trend in {}: {:+.1}% between the first and second half of the period",
                per_emotion[up].emotion, delta
            )));
            flagged = true;
        }
    }

    if let Some(down) = stats::argmin_by(&per_emotion, trend_of) {
        let delta = trend_of(&per_emotion[down]);
        if delta < -thresholds.trend_delta {
            insights.push(Insight::normal(format!(
                "Downward trend in {}: {:+.1}% between the first and second half of the period",
                per_emotion[down].emotion, delta
            )));
            flagged = true;
        }
    }

    let variable: Vec<&str> = per_emotion
        .iter()
        .filter(|s| s.variability > thresholds.variability_range)
        .map(|s| s.emotion.as_str())
        .collect();
    if !variable.is_empty() {
        insights.push(Insight::normal(format!(
            "High variability in: {}",
            variable.join(", ")
        )));
        flagged = true;
    }

    let elevated: Vec<&str> = per_emotion
        .iter()
        .filter(|s| s.emotion.is_concerning() && s.mean > thresholds.concerning_mean)
        .map(|s| s.emotion.as_str())
        .collect();
    if !elevated.is_empty() {
        insights.push(Insight::alert(format!(
            "Elevated levels of {} (average above {:.0}%)",
            elevated.join(", "),
            thresholds.concerning_mean
        )));
        flagged = true;
    }

    if !flagged {
        insights.push(Insight::ok("All emotions within normal ranges"));
    }

    insights
}

fn insufficient_data() -> Insight {
    Insight::normal("Not enough data to analyze trends (at least 2 data points are required)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use pretty_assertions::assert_eq;

    fn series(emotion: Emotion, values: &[f64]) -> Vec<TimeSeriesPoint> {
        values
            .iter()
            .map(|v| TimeSeriesPoint::from_values(&[(emotion, *v)]))
            .collect()
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let points = series(Emotion::Ansiedad, &[50.0]);
        let insights = analyze(&points, &[], &Thresholds::default());

        assert_eq!(insights.len(), 1);
        assert!(insights[0].text.starts_with("Not enough data"));
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let insights = analyze(&[], &[Emotion::Ansiedad], &Thresholds::default());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Normal);
    }

    #[test]
    fn test_points_without_numeric_values_are_insufficient() {
        let points: Vec<TimeSeriesPoint> =
            serde_json::from_str(r#"[{"ansiedad": "?"}, {"ansiedad": null}]"#).unwrap();
        let insights = analyze(&points, &[], &Thresholds::default());

        assert_eq!(insights.len(), 1);
        assert!(insights[0].text.starts_with("Not enough data"));
    }

    #[test]
    fn test_upward_trend() {
        let points = series(Emotion::Ansiedad, &[10.0, 20.0, 30.0, 40.0]);
        let insights = analyze(&points, &[Emotion::Ansiedad], &Thresholds::default());

        assert_eq!(insights[0].text, "Predominant emotion: ansiedad (average 25.0%)");
        assert_eq!(
            insights[1].text,
            "Upward trend in ansiedad: +20.0% between the first and second half of the period"
        );
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn test_downward_trend_and_variability() {
        let points = series(Emotion::Felicidad, &[80.0, 70.0, 40.0, 30.0]);
        let insights = analyze(&points, &[Emotion::Felicidad], &Thresholds::default());

        assert_eq!(
            insights[1].text,
            "Downward trend in felicidad: -40.0% between the first and second half of the period"
        );
        assert_eq!(insights[2].text, "High variability in: felicidad");
        assert_eq!(insights.len(), 3);
    }

    #[test]
    fn test_trend_at_threshold_is_not_reported() {
        // 10,10 | 15,15 => exactly +5
        let points = series(Emotion::Miedo, &[10.0, 10.0, 15.0, 15.0]);
        let insights = analyze(&points, &[Emotion::Miedo], &Thresholds::default());

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[1], Insight::ok("All emotions within normal ranges"));
    }

    #[test]
    fn test_concerning_emotions_raise_alert() {
        let points = vec![
            TimeSeriesPoint::from_values(&[
                (Emotion::Estres, 70.0),
                (Emotion::Tristeza, 65.0),
                (Emotion::Felicidad, 90.0),
            ]),
            TimeSeriesPoint::from_values(&[
                (Emotion::Estres, 72.0),
                (Emotion::Tristeza, 66.0),
                (Emotion::Felicidad, 91.0),
            ]),
        ];
        let insights = analyze(&points, &[], &Thresholds::default());

        let last = insights.last().unwrap();
        assert_eq!(last.severity, Severity::Alert);
        assert_eq!(last.text, "Elevated levels of estres, tristeza (average above 60%)");
        assert!(insights[0].text.contains("felicidad"));
    }

    #[test]
    fn test_missing_values_are_skipped_not_zeroed() {
        let points: Vec<TimeSeriesPoint> = serde_json::from_str(
            r#"[{"ansiedad": 20}, {"ansiedad": "n/a"}, {}, {"ansiedad": 22}]"#,
        )
        .unwrap();
        let stats = emotion_stats(&points, &[Emotion::Ansiedad]);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].mean, 21.0);
        assert_eq!(stats[0].trend, Some(2.0));
        assert_eq!(stats[0].variability, 2.0);
    }

    #[test]
    fn test_predominant_tie_keeps_first_requested() {
        let points = vec![
            TimeSeriesPoint::from_values(&[(Emotion::Miedo, 40.0), (Emotion::Enojo, 40.0)]),
            TimeSeriesPoint::from_values(&[(Emotion::Miedo, 40.0), (Emotion::Enojo, 40.0)]),
        ];

        let insights = analyze(&points, &[Emotion::Enojo, Emotion::Miedo], &Thresholds::default());
        assert!(insights[0].text.contains("enojo"));

        let insights = analyze(&points, &[Emotion::Miedo, Emotion::Enojo], &Thresholds::default());
        assert!(insights[0].text.contains("miedo"));
    }

    #[test]
    fn test_identical_input_gives_identical_output() {
        let points = series(Emotion::Ansiedad, &[10.0, 55.0, 30.0, 70.0, 20.0]);
        let thresholds = Thresholds::default();
        assert_eq!(
            analyze(&points, &[], &thresholds),
            analyze(&points, &[], &thresholds)
        );
    }
}
