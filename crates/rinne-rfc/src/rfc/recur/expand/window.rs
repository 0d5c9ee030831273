//! Window clipping over generated candidates.

use crate::rfc::recur::core::{ExtendedRule, Occurrence};

/// Trims tentative candidates to the final occurrence list.
///
/// Drops candidates strictly before the window start (the generators may
/// emit up to one period early around the boundary) and candidates whose
/// index exceeds a count bound. Order is preserved; the generators emit
/// in ascending date order.
#[must_use]
pub(crate) fn clip(ext: &ExtendedRule, candidates: Vec<Occurrence>) -> Vec<Occurrence> {
    let count = ext.rule.count.map(u64::from);
    candidates
        .into_iter()
        .filter(|occurrence| occurrence.date >= ext.start_range_period)
        .filter(|occurrence| count.is_none_or(|bound| occurrence.index <= bound))
        .collect()
}
