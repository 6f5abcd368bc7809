//! Support group activity summary

use super::counted;
use crate::config::Thresholds;
use crate::stats;
use crate::types::{GroupActivity, Insight};

/// Generate group activity insights
pub fn analyze(groups: &[GroupActivity], thresholds: &Thresholds) -> Vec<Insight> {
    if groups.is_empty() {
        return vec![Insight::normal("No group activity data available")];
    }

    let completed = stats::total(groups.iter().map(|g| g.completed_activities));
    let total = stats::total(groups.iter().map(|g| g.total_activities));

    let mut insights = vec![Insight::normal(format!(
        "{} with {} of {} completed",
        counted(groups.len() as u64, "group", "groups"),
        completed,
        counted(total, "activity", "activities")
    ))];

    if let Some(top) = stats::argmax_by(groups, |g| g.completed_activities as f64) {
        let group = &groups[top];
        if group.completed_activities > 0 {
            insights.push(Insight::normal(format!(
                "Most active group: {} ({} completed)",
                group.group_name,
                counted(group.completed_activities, "activity", "activities")
            )));
        }
    }

    // Groups without planned activities have no completion ratio
    let ratios: Vec<f64> = groups
        .iter()
        .filter_map(|g| stats::count_share(g.completed_activities, g.total_activities))
        .collect();
    if let Some(completion) = stats::mean(&ratios) {
        let text = format!("Average activity completion: {:.1}%", completion);
        insights.push(if completion > thresholds.completion_ok {
            Insight::ok(text)
        } else if completion > thresholds.completion_neutral {
            Insight::normal(text)
        } else {
            Insight::alert(text)
        });
    }

    let members: Vec<f64> = groups.iter().map(|g| g.active_members as f64).collect();
    if let Some(average) = stats::mean(&members) {
        insights.push(Insight::normal(format!(
            "Average active members per group: {:.1}",
            average
        )));
    }

    insights
}
