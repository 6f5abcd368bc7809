//! Recommendation effectiveness

use super::counted;
use crate::config::Thresholds;
use crate::stats;
use crate::types::{Insight, RecommendationEffectiveness};
use tracing::warn;

/// Counters for one recommendation type after merging duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeOutcome {
    kind: String,
    generated: u64,
    useful: u64,
}

impl TypeOutcome {
    fn effectiveness(&self) -> Option<f64> {
        stats::count_share(self.useful, self.generated)
    }
}

fn merged(entries: &[RecommendationEffectiveness]) -> Vec<TypeOutcome> {
    let generated = stats::tally(entries.iter().map(|e| (e.kind.clone(), e.generated)));
    let useful = stats::tally(entries.iter().map(|e| (e.kind.clone(), e.useful)));

    generated
        .into_iter()
        .zip(useful)
        .map(|((kind, generated), (_, useful))| {
            if useful > generated {
                warn!(
                    kind = %kind,
                    generated,
                    useful,
                    "useful recommendations exceed generated; clamping"
                );
            }
            TypeOutcome {
                kind,
                generated,
                useful: useful.min(generated),
            }
        })
        .collect()
}

/// Generate recommendation effectiveness insights
pub fn analyze(entries: &[RecommendationEffectiveness], thresholds: &Thresholds) -> Vec<Insight> {
    let outcomes = merged(entries);
    let generated = stats::total(outcomes.iter().map(|o| o.generated));
    let useful = stats::total(outcomes.iter().map(|o| o.useful));

    let Some(global) = stats::count_share(useful, generated) else {
        return vec![Insight::normal("No recommendations generated yet")];
    };

    let mut insights = Vec::new();

    let text = format!("Overall recommendation effectiveness: {:.1}%", global);
    insights.push(if global > thresholds.effectiveness_ok {
        Insight::ok(text)
    } else if global > thresholds.effectiveness_neutral {
        Insight::normal(text)
    } else {
        Insight::alert(text)
    });

    let rated: Vec<(&TypeOutcome, f64)> = outcomes
        .iter()
        .filter_map(|o| Some((o, o.effectiveness()?)))
        .collect();

    if let Some(best) = stats::argmax_by(&rated, |(_, effectiveness)| *effectiveness) {
        let (outcome, effectiveness) = rated[best];
        insights.push(Insight::normal(format!(
            "Most effective type: {} ({:.1}% useful)",
            outcome.kind, effectiveness
        )));
    }

    let sampled: Vec<(&TypeOutcome, f64)> = rated
        .iter()
        .copied()
        .filter(|(o, _)| o.generated > thresholds.min_generated)
        .collect();
    if let Some(worst) = stats::argmin_by(&sampled, |(_, effectiveness)| *effectiveness) {
        let (outcome, effectiveness) = sampled[worst];
        if effectiveness < thresholds.low_effectiveness {
            insights.push(Insight::alert(format!(
                "Least effective type: {} ({:.1}% useful over {})",
                outcome.kind,
                effectiveness,
                counted(outcome.generated, "recommendation", "recommendations")
            )));
        }
    }

    insights.push(Insight::normal(format!(
        "Totals: {} useful out of {} generated recommendations",
        useful, generated
    )));

    insights
}
