//! Top-user ranking by a selected metric

use super::counted;
use crate::config::Thresholds;
use crate::stats;
use crate::types::{Insight, UserMetric};

/// The `n` users with the highest metric value.
///
/// Users without a numeric value rank last; ties keep input order.
pub fn top_users(users: &[UserMetric], n: usize) -> Vec<&UserMetric> {
    stats::top_k_by(users, n, |u| u.metric_value.unwrap_or(f64::NEG_INFINITY))
}

/// Generate ranking insights for `metric`, optionally restricted to the top `limit` users
pub fn analyze(
    users: &[UserMetric],
    metric: &str,
    limit: Option<usize>,
    thresholds: &Thresholds,
) -> Vec<Insight> {
    let scope: Vec<&UserMetric> = match limit {
        Some(n) => top_users(users, n),
        None => users.iter().collect(),
    };

    if scope.is_empty() {
        return vec![Insight::normal("No user data available for ranking")];
    }

    let mut insights = vec![Insight::normal(format!(
        "{} in ranking",
        counted(scope.len() as u64, "user", "users")
    ))];

    let values: Vec<f64> = scope.iter().filter_map(|u| u.metric_value).collect();
    if let Some(average) = stats::mean(&values) {
        insights.push(Insight::normal(format!("Average {}: {:.1}", metric, average)));
    }

    let at_risk = values
        .iter()
        .filter(|v| **v > thresholds.at_risk_metric)
        .count();
    if at_risk > 0 {
        insights.push(Insight::alert(format!(
            "{} at risk ({} above {:.0})",
            counted(at_risk as u64, "user", "users"),
            metric,
            thresholds.at_risk_metric
        )));
    }

    if let Some(top) = stats::argmax_by(&scope, |u| u.total_analyses as f64) {
        let user = scope[top];
        if user.total_analyses > 0 {
            insights.push(Insight::normal(format!(
                "Most active user: {} ({})",
                user.user_id,
                counted(user.total_analyses, "analysis", "analyses")
            )));
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use pretty_assertions::assert_eq;

    fn user(id: &str, value: Option<f64>, analyses: u64) -> UserMetric {
        UserMetric {
            user_id: id.to_string(),
            metric_value: value,
            total_analyses: analyses,
        }
    }

    #[test]
    fn test_empty_ranking() {
        let insights = analyze(&[], "stress", None, &Thresholds::default());
        assert_eq!(insights, vec![Insight::normal("No user data available for ranking")]);

        let insights = analyze(&[user("u1", Some(10.0), 1)], "stress", Some(0), &Thresholds::default());
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn test_full_ranking() {
        let insights = analyze(
            &[
                user("ana", Some(75.0), 3),
                user("luis", None, 12),
                user("eva", Some(45.0), 12),
            ],
            "stress",
            None,
            &Thresholds::default(),
        );

        assert_eq!(
            insights,
            vec![
                Insight::normal("3 users in ranking"),
                Insight::normal("Average stress: 60.0"),
                Insight::alert("1 user at risk (stress above 70)"),
                Insight::normal("Most active user: luis (12 analyses)"),
            ]
        );
    }

    #[test]
    fn test_at_risk_boundary() {
        let insights = analyze(&[user("a", Some(70.0), 0)], "stress", None, &Thresholds::default());

        assert!(!insights.iter().any(|i| i.severity == Severity::Alert));
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn test_no_numeric_values_omits_average() {
        let insights = analyze(&[user("a", None, 2)], "stress", None, &Thresholds::default());
        assert_eq!(
            insights,
            vec![
                Insight::normal("1 user in ranking"),
                Insight::normal("Most active user: a (2 analyses)"),
            ]
        );
    }

    #[test]
    fn test_limit_selects_top_users() {
        let users = vec![
            user("low", Some(10.0), 50),
            user("high", Some(90.0), 1),
            user("mid", Some(50.0), 2),
        ];
        let insights = analyze(&users, "stress", Some(2), &Thresholds::default());

        assert_eq!(insights[0].text, "2 users in ranking");
        assert_eq!(insights[1].text, "Average stress: 70.0");
        assert_eq!(insights.last().unwrap().text, "Most active user: mid (2 analyses)");
    }

    #[test]
    fn test_top_users_is_stable_and_ranks_missing_last() {
        let users = vec![
            user("none", None, 0),
            user("b", Some(40.0), 0),
            user("a", Some(40.0), 0),
            user("c", Some(80.0), 0),
        ];
        let ids: Vec<&str> = top_users(&users, 4).iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a", "none"]);
    }

    #[test]
    fn test_single_counts_read_singular() {
        let insights = analyze(&[user("a", Some(90.0), 1)], "stress", None, &Thresholds::default());

        assert_eq!(
            insights,
            vec![
                Insight::normal("1 user in ranking"),
                Insight::normal("Average stress: 90.0"),
                Insight::alert("1 user at risk (stress above 70)"),
                Insight::normal("Most active user: a (1 analysis)"),
            ]
        );
    }
}
