//! Seed-set construction helpers.
//!
//! Randomness always flows through an explicit RNG handle so repeated runs
//! with the same seed produce the same seed sets.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::graph::{CompressedGraph, NodeSet};

/// Take a random fraction of each ground-truth community as its seed set.
///
/// The seed count is `ceil(|community| * proportion)`, at least one node
/// for non-empty communities.
pub fn pick_seeds_in_communities(
    communities: &[NodeSet],
    proportion: f64,
    rng: &mut impl Rng,
) -> Vec<NodeSet> {
    communities
        .iter()
        .map(|community| {
            let mut members: Vec<u32> = community.iter().copied().collect();
            members.shuffle(rng);
            let count = ((community.len() as f64) * proportion).ceil() as usize;
            members.into_iter().take(count).collect()
        })
        .collect()
}

/// Take random seeds from the distance-`d` neighborhood of each community.
///
/// The neighborhood is the community expanded `distance` times by direct
/// graph adjacency, so seeds may fall slightly outside the community.
pub fn pick_seeds_near_communities(
    graph: &CompressedGraph,
    communities: &[NodeSet],
    proportion: f64,
    distance: usize,
    rng: &mut impl Rng,
) -> Vec<NodeSet> {
    communities
        .iter()
        .map(|community| {
            let mut neighborhood: NodeSet = community.clone();
            for _ in 0..distance {
                let mut next = neighborhood.clone();
                for &node in &neighborhood {
                    next.extend(graph.neighbors(node).iter().copied());
                }
                neighborhood = next;
            }

            let mut candidates: Vec<u32> = neighborhood.into_iter().collect();
            candidates.shuffle(rng);
            let count = ((community.len() as f64) * proportion).ceil() as usize;
            candidates.into_iter().take(count).collect()
        })
        .collect()
}

/// Build seed sets of uniformly chosen non-isolated nodes.
///
/// Duplicate draws collapse, so a set may hold fewer than `seeds_per_set`
/// nodes.
pub fn pick_random_seeds(
    graph: &CompressedGraph,
    seeds_per_set: usize,
    set_count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<NodeSet>> {
    let candidates: Vec<u32> = (0..graph.node_count as u32)
        .filter(|&node| graph.degree(node) > 0)
        .collect();
    if candidates.is_empty() {
        return Err(Error::InvalidParameter(
            "graph has no node with positive degree".to_string(),
        ));
    }

    Ok((0..set_count)
        .map(|_| {
            let mut seed_set = NodeSet::new();
            for _ in 0..seeds_per_set {
                if let Some(&node) = candidates.choose(rng) {
                    seed_set.insert(node);
                }
            }
            seed_set
        })
        .collect())
}
