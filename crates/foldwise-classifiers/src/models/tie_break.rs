//! Majority vote over retained neighbors with distance-based tie resolution.
//!
//! Resolution runs in two passes:
//! 1. [`plurality_labels`] counts label occurrences and keeps every label
//!    reaching the maximum count.
//! 2. [`summed_distances`] totals the distances of each tied label's
//!    neighbors; the smallest total wins.
//!
//! If the totals are exactly equal the label met first in neighbor order
//! wins. Neighbors arrive sorted by (distance, training row index), so that
//! is the label owning the closest neighbor among the tied ones.
use crate::models::neighbors::NeighborCandidate;

/// Labels sharing the highest occurrence count, in first-encounter order.
pub fn plurality_labels<L>(neighbors: &[NeighborCandidate<L>]) -> Vec<L>
where
    L: Clone + PartialEq,
{
    let mut counts: Vec<(&L, usize)> = Vec::new();
    for neighbor in neighbors {
        let label = &neighbor.label;
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    counts
        .into_iter()
        .filter(|(_, c)| *c == max_count)
        .map(|(label, _)| label.clone())
        .collect()
}

/// Total neighbor distance per label, in the order of `labels`.
pub fn summed_distances<L>(
    neighbors: &[NeighborCandidate<L>],
    labels: &[L],
) -> Vec<(L, f64)>
where
    L: Clone + PartialEq,
{
    labels
        .iter()
        .map(|label| {
            let total = neighbors
                .iter()
                .filter(|n| &n.label == label)
                .map(|n| n.distance)
                .sum::<f64>();
            (label.clone(), total)
        })
        .collect()
}

/// Pick the predicted label. `None` only when `neighbors` is empty.
pub fn resolve<L>(neighbors: &[NeighborCandidate<L>]) -> Option<L>
where
    L: Clone + PartialEq,
{
    let tied = plurality_labels(neighbors);
    if tied.len() <= 1 {
        return tied.into_iter().next();
    }

    log::trace!(
        "plurality tie between {} labels among {} neighbors",
        tied.len(),
        neighbors.len()
    );

    let mut best: Option<(L, f64)> = None;
    for (label, total) in summed_distances(neighbors, &tied) {
        // Strict comparison keeps the earliest label on exact ties.
        if best.as_ref().map_or(true, |(_, b)| total < *b) {
            best = Some((label, total));
        }
    }
    best.map(|(label, _)| label)
}
