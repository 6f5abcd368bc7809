//! Report categories
//!
//! One pure function per category turns a slice of aggregates into an
//! ordered list of [`Insight`](crate::types::Insight)s. Empty or zero-total
//! input yields exactly one informational insight instead of an error.

pub mod alerts;
pub mod classification;
pub mod distribution;
pub mod groups;
pub mod ranking;
pub mod recommendations;
pub mod trend;

/// A count followed by the matching singular or plural noun
pub(crate) fn counted(count: u64, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{} {}", count, noun)
}
