//! Scoring primitives: intersection size, F1, conductance, aggregates

use crate::data::GroundTruth;
use crate::graph::NodeSet;

/// Number of nodes shared by two sets, iterating the smaller one
pub fn intersection_size(a: &NodeSet, b: &NodeSet) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|node| large.contains(*node)).count()
}

/// F1 score from set sizes and their intersection size.
///
/// Total over non-negative sizes: any degenerate input (empty set, empty
/// intersection) scores exactly 0.0.
pub fn f1_from_sizes(size_a: usize, size_b: usize, intersection: usize) -> f64 {
    if intersection == 0 || size_a == 0 || size_b == 0 {
        return 0.0;
    }
    let precision = intersection as f64 / size_a as f64;
    let recall = intersection as f64 / size_b as f64;
    2.0 * precision * recall / (precision + recall)
}

/// F1 score between two node sets
pub fn f1(a: &NodeSet, b: &NodeSet) -> f64 {
    f1_from_sizes(a.len(), b.len(), intersection_size(a, b))
}

/// Conductance of a community from its degree sum and internal edge count.
///
/// The cut is `degree_sum / 2 - internal_edges` with truncating integer
/// division applied before the subtraction, evaluated in signed arithmetic.
/// An empty volume yields 0.0.
pub fn conductance(degree_sum: u64, internal_edges: u64) -> f64 {
    let cut = (degree_sum / 2) as f64 - internal_edges as f64;
    let volume = degree_sum as f64 + cut;
    if volume == 0.0 {
        return 0.0;
    }
    cut / volume
}

/// Arithmetic mean; an empty slice averages to 0.0
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Per-seed aggregate scoring.
///
/// For each seed node individually, the community is scored against every
/// ground-truth community containing that seed and the best F1 is kept;
/// the scores are averaged over the seeds of the set.
pub fn f1_per_seed(
    seed_sets: &[NodeSet],
    truth: &GroundTruth,
    communities: &[NodeSet],
) -> Vec<f64> {
    seed_sets
        .iter()
        .zip(communities.iter())
        .map(|(seed_set, community)| {
            let sum: f64 = seed_set
                .iter()
                .map(|&seed| {
                    truth
                        .memberships(seed)
                        .iter()
                        .map(|&index| f1(community, &truth.communities[index as usize]))
                        .fold(0.0f64, f64::max)
                })
                .sum();
            sum / seed_set.len() as f64
        })
        .collect()
}

/// Seed-union aggregate scoring.
///
/// The union of all ground-truth communities touched by any seed of the set
/// is scored once against the predicted community.
pub fn f1_seed_union(
    seed_sets: &[NodeSet],
    truth: &GroundTruth,
    communities: &[NodeSet],
) -> Vec<f64> {
    seed_sets
        .iter()
        .zip(communities.iter())
        .map(|(seed_set, community)| {
            let mut target = NodeSet::new();
            for &seed in seed_set {
                for &index in truth.memberships(seed) {
                    target.extend(truth.communities[index as usize].iter().copied());
                }
            }
            f1(&target, community)
        })
        .collect()
}
