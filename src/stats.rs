//! Numeric helpers shared by the report categories
//!
//! Every helper returns `None` instead of a non-finite number, so callers
//! can turn an undefined statistic into "insufficient data" wording.

use std::collections::HashMap;
use std::hash::Hash;

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    finite(sum / values.len() as f64)
}

/// Share of `part` in `total` on a 0-100 scale
pub fn percentage(part: f64, total: f64) -> Option<f64> {
    if total <= 0.0 || !part.is_finite() || !total.is_finite() {
        return None;
    }
    // Multiply first: 30 * 100 / 100 is exact where 30 / 100 * 100 is not.
    finite(part * 100.0 / total)
}

/// Same as [`percentage`] for integer counters
pub fn count_share(part: u64, total: u64) -> Option<f64> {
    percentage(part as f64, total as f64)
}

/// Sum of counters, saturating at `u64::MAX` instead of overflowing
pub fn total<I>(counts: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    counts.into_iter().fold(0, u64::saturating_add)
}

/// Split-half trend: mean of the second half minus mean of the first half.
///
/// The split point is `len / 2`, so with an odd length the first half is
/// the smaller one. Undefined for fewer than two values.
pub fn split_half_trend(values: &[f64]) -> Option<f64> {
    let mid = values.len() / 2;
    let first = mean(&values[..mid])?;
    let second = mean(&values[mid..])?;
    finite(second - first)
}

/// Variability as max - min
pub fn range(values: &[f64]) -> Option<f64> {
    let max = values.iter().copied().reduce(f64::max)?;
    let min = values.iter().copied().reduce(f64::min)?;
    finite(max - min)
}

/// Index of the highest key. Ties keep the first element.
pub fn argmax_by<T, F>(items: &[T], key: F) -> Option<usize>
where
    F: Fn(&T) -> f64,
{
    select_by(items, key, |candidate, best| candidate > best)
}

/// Index of the lowest key. Ties keep the first element.
pub fn argmin_by<T, F>(items: &[T], key: F) -> Option<usize>
where
    F: Fn(&T) -> f64,
{
    select_by(items, key, |candidate, best| candidate < best)
}

fn select_by<T, F, B>(items: &[T], key: F, better: B) -> Option<usize>
where
    F: Fn(&T) -> f64,
    B: Fn(f64, f64) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, item) in items.iter().enumerate() {
        let value = key(item);
        if !value.is_finite() {
            continue;
        }
        match best {
            Some((_, best_value)) if !better(value, best_value) => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

/// The `k` highest-keyed items in descending order; ties keep input order
pub fn top_k_by<'a, T, F>(items: &'a [T], k: usize, key: F) -> Vec<&'a T>
where
    F: Fn(&T) -> f64,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    // sort_by is stable, so equal keys stay in input order
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked.truncate(k);
    ranked
}

/// Sum counts per key, preserving the order in which keys first appear
pub fn tally<K, I>(pairs: I) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, u64)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut totals: Vec<(K, u64)> = Vec::new();

    for (key, count) in pairs {
        match index.get(&key) {
            Some(&i) => totals[i].1 = totals[i].1.saturating_add(count),
            None => {
                index.insert(key.clone(), totals.len());
                totals.push((key, count));
            }
        }
    }

    totals
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[10.0, 20.0, 30.0]), Some(20.0));
    }

    #[test]
    fn test_percentage_guards_zero_total() {
        assert_eq!(percentage(5.0, 0.0), None);
        assert_eq!(count_share(0, 0), None);
        assert_eq!(count_share(30, 100), Some(30.0));
        assert_eq!(count_share(3001, 10000), Some(30.01));
    }

    #[test]
    fn test_total_saturates() {
        assert_eq!(total(Vec::<u64>::new()), 0);
        assert_eq!(total(vec![2, 3]), 5);
        assert_eq!(total(vec![u64::MAX, 1, u64::MAX]), u64::MAX);
    }

    #[test]
    fn test_split_half_trend_even() {
        // first half mean 15, second half mean 35
        assert_eq!(split_half_trend(&[10.0, 20.0, 30.0, 40.0]), Some(20.0));
    }

    #[test]
    fn test_split_half_trend_odd_gives_first_half_smaller_share() {
        // [10, 20] vs [30, 40, 50]
        assert_eq!(split_half_trend(&[10.0, 20.0, 30.0, 40.0, 50.0]), Some(25.0));
        assert_eq!(split_half_trend(&[10.0, 20.0, 30.0]), Some(15.0));
    }

    #[test]
    fn test_split_half_trend_needs_two_values() {
        assert_eq!(split_half_trend(&[]), None);
        assert_eq!(split_half_trend(&[42.0]), None);
    }

    #[test]
    fn test_split_half_trend_monotonic_in_later_half() {
        let base = [10.0, 25.0, 30.0, 12.0, 40.0, 18.0];
        let before = split_half_trend(&base).unwrap();

        let mut scaled = base;
        for value in scaled[3..].iter_mut() {
            *value *= 1.5;
        }
        let after = split_half_trend(&scaled).unwrap();

        assert!(after > before);
    }

    #[test]
    fn test_range() {
        assert_eq!(range(&[]), None);
        assert_eq!(range(&[5.0]), Some(0.0));
        assert_eq!(range(&[5.0, 45.0, 20.0]), Some(40.0));
    }

    #[test]
    fn test_argmax_first_occurrence_wins() {
        let items = [("a", 3.0), ("b", 7.0), ("c", 7.0), ("d", 1.0)];
        assert_eq!(argmax_by(&items, |(_, v)| *v), Some(1));
        assert_eq!(argmin_by(&items, |(_, v)| *v), Some(3));

        let ties = [("x", 2.0), ("y", 2.0)];
        assert_eq!(argmin_by(&ties, |(_, v)| *v), Some(0));
        assert_eq!(argmax_by::<(&str, f64), _>(&[], |(_, v)| *v), None);
    }

    #[test]
    fn test_top_k_is_stable() {
        let items = [("a", 1.0), ("b", 5.0), ("c", 5.0), ("d", 3.0)];
        let top: Vec<&str> = top_k_by(&items, 3, |(_, v)| *v)
            .into_iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(top, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_tally_preserves_first_seen_order() {
        let totals = tally(vec![("b", 1), ("a", 2), ("b", 3)]);
        assert_eq!(totals, vec![("b", 4), ("a", 2)]);
    }
}
