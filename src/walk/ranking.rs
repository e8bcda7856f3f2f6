//! Node rankings derived from diffusion snapshots

use std::cmp::Ordering;

use crate::graph::NodeSet;
use crate::walk::DiffusionState;

/// A node paired with its diffusion score
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNode<S> {
    pub node: u32,
    pub score: S,
}

/// Total order over diffusion scores.
///
/// `f64::total_cmp` keeps the comparison a strict weak ordering even in the
/// presence of exact ties, so sorts are reproducible for identical input.
pub trait ScoreOrd {
    fn score_cmp(&self, other: &Self) -> Ordering;

    /// Strictly-greater test used by the threshold policies
    fn exceeds(&self, other: &Self) -> bool {
        self.score_cmp(other) == Ordering::Greater
    }
}

impl ScoreOrd for f64 {
    fn score_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl ScoreOrd for Vec<f64> {
    /// Lexicographic: the first step decides, later steps break ties
    fn score_cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.iter().zip(other.iter()) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.len().cmp(&other.len())
    }
}

/// Sort descending by score; exact ties order by ascending node id so the
/// result is deterministic.
fn sort_ranking<S: ScoreOrd>(ranking: &mut [RankedNode<S>]) {
    ranking.sort_by(|a, b| b.score.score_cmp(&a.score).then(a.node.cmp(&b.node)));
}

/// Rank the non-seed support by final-step mass (PageRank variant)
pub fn scalar_ranking(state: &DiffusionState, seed_set: &NodeSet) -> Vec<RankedNode<f64>> {
    let mut ranking: Vec<RankedNode<f64>> = state
        .support
        .iter()
        .filter(|node| !seed_set.contains(*node))
        .map(|&node| RankedNode {
            node,
            score: state.final_mass(node),
        })
        .collect();
    sort_ranking(&mut ranking);
    ranking
}

/// Rank the non-seed support by per-step mass profile (LexRank/WalkSCAN)
pub fn vector_ranking(state: &DiffusionState, seed_set: &NodeSet) -> Vec<RankedNode<Vec<f64>>> {
    let mut ranking: Vec<RankedNode<Vec<f64>>> = state
        .support
        .iter()
        .filter(|node| !seed_set.contains(*node))
        .map(|&node| RankedNode {
            node,
            score: state.step_profile(node),
        })
        .collect();
    sort_ranking(&mut ranking);
    ranking
}
