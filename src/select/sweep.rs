//! Incremental-prefix sweeps over a node ranking

use crate::graph::{CompressedGraph, NodeSet};
use crate::scores::{conductance, f1_from_sizes, intersection_size};
use crate::walk::RankedNode;

/// Result of a prefix sweep: the retained community and its score
/// (F1 for the max-F1 sweep, conductance for the conductance sweep).
#[derive(Debug, Clone)]
pub struct SweepOutcome<S> {
    pub community: NodeSet,
    pub score: f64,

    /// Score of the node inserted at the last improvement; serves as a
    /// derived threshold for the scalar ranking
    pub threshold: Option<S>,
}

/// Walk the ranking, inserting one node at a time, and keep the prefix with
/// the best F1 against the ground truth.
///
/// Ties (`>=`) prefer the later, larger prefix. The scan stops the first
/// time the community exceeds twice the ground-truth size without having
/// just improved the best score.
pub fn max_f1_sweep<S: Clone>(
    ranking: &[RankedNode<S>],
    seed_set: &NodeSet,
    ground_truth: &NodeSet,
) -> SweepOutcome<S> {
    let truth_size = ground_truth.len();
    let mut community_size = seed_set.len();
    let mut intersection = intersection_size(seed_set, ground_truth);
    let mut best_score = f1_from_sizes(community_size, truth_size, intersection);
    let mut best_prefix = 0usize;
    let mut threshold = None;

    for (index, ranked) in ranking.iter().enumerate() {
        community_size += 1;
        if ground_truth.contains(&ranked.node) {
            intersection += 1;
        }
        let score = f1_from_sizes(community_size, truth_size, intersection);
        if score >= best_score {
            best_score = score;
            best_prefix = index + 1;
            threshold = Some(ranked.score.clone());
        } else if community_size > 2 * truth_size {
            break;
        }
    }

    let mut community = seed_set.clone();
    community.extend(ranking[..best_prefix].iter().map(|r| r.node));
    SweepOutcome {
        community,
        score: best_score,
        threshold,
    }
}

/// Walk the ranking and keep the prefix with minimum conductance.
///
/// Ties (`<=`) prefer the later prefix, mirroring the max-F1 sweep. The
/// ground truth is used only for the early-stop bound.
pub fn min_conductance_sweep<S>(
    graph: &CompressedGraph,
    ranking: &[RankedNode<S>],
    seed_set: &NodeSet,
    ground_truth: &NodeSet,
) -> SweepOutcome<S> {
    let truth_size = ground_truth.len();
    let mut community = seed_set.clone();
    let mut community_size = seed_set.len();

    let mut internal_edges: u64 = 0;
    let mut degree_sum: u64 = 0;
    for &node in seed_set {
        internal_edges += graph
            .neighbors(node)
            .iter()
            .filter(|neighbor| community.contains(*neighbor))
            .count() as u64;
        degree_sum += graph.degree(node) as u64;
    }
    let mut best_score = conductance(degree_sum, internal_edges);
    let mut best_prefix = 0usize;

    for (index, ranked) in ranking.iter().enumerate() {
        community.insert(ranked.node);
        community_size += 1;
        internal_edges += graph
            .neighbors(ranked.node)
            .iter()
            .filter(|neighbor| community.contains(*neighbor))
            .count() as u64;
        degree_sum += graph.degree(ranked.node) as u64;

        let score = conductance(degree_sum, internal_edges);
        if score <= best_score {
            best_score = score;
            best_prefix = index + 1;
        } else if community_size > 2 * truth_size {
            break;
        }
    }

    let mut best = seed_set.clone();
    best.extend(ranking[..best_prefix].iter().map(|r| r.node));
    SweepOutcome {
        community: best,
        score: best_score,
        threshold: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::scores::f1;

    fn ranked(nodes: &[u32]) -> Vec<RankedNode<f64>> {
        nodes
            .iter()
            .enumerate()
            .map(|(i, &node)| RankedNode {
                node,
                score: 1.0 - 0.1 * i as f64,
            })
            .collect()
    }

    #[test]
    fn sweep_finds_the_ground_truth_prefix() {
        let ranking = ranked(&[1, 2, 3, 9]);
        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1, 2, 3]);

        let outcome = max_f1_sweep(&ranking, &seeds, &truth);
        assert_eq!(outcome.community, truth);
        assert_eq!(outcome.score, 1.0);
        // the derived threshold is the score of the last inserted node
        assert_eq!(outcome.threshold, Some(0.8));
    }

    #[test]
    fn best_score_never_decreases_along_the_scan() {
        let ranking = ranked(&[1, 9, 2, 8, 3]);
        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1, 2, 3]);

        let mut last = 0.0;
        for prefix in 0..=ranking.len() {
            let outcome = max_f1_sweep(&ranking[..prefix], &seeds, &truth);
            assert!(outcome.score >= last);
            last = outcome.score;
        }
    }

    #[test]
    fn ties_prefer_the_larger_community() {
        // F1 dips over two misses, then returns to exactly the seed-only
        // value (2/3) on the third insertion; `>=` keeps the larger prefix
        let ranking = ranked(&[8, 9, 2]);
        let seeds = NodeSet::from([0, 1]);
        let truth = NodeSet::from([0, 1, 2, 3]);

        let outcome = max_f1_sweep(&ranking, &seeds, &truth);
        assert_eq!(outcome.community, NodeSet::from([0, 1, 2, 8, 9]));
        assert!((outcome.score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn scan_aborts_past_twice_the_truth_size() {
        // a long tail of misses after one hit
        let nodes: Vec<u32> = (1..=20).collect();
        let ranking = ranked(&nodes);
        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1]);

        let outcome = max_f1_sweep(&ranking, &seeds, &truth);
        assert_eq!(outcome.community, NodeSet::from([0, 1]));
        // communities larger than 2·|truth| were never retained
        assert!(outcome.community.len() <= 2 * truth.len());
    }

    #[test]
    fn seed_only_community_when_ranking_never_helps() {
        let ranking = ranked(&[7, 8, 9]);
        let seeds = NodeSet::from([0, 1]);
        let truth = NodeSet::from([0, 1]);

        let outcome = max_f1_sweep(&ranking, &seeds, &truth);
        assert_eq!(outcome.community, seeds);
        assert_eq!(outcome.score, 1.0);
        assert_eq!(outcome.threshold, None);
    }

    #[test]
    fn conductance_sweep_recovers_a_clique() {
        // clique 0-1-2-3, bridge 3-4, node 4 fanning out to leaves 5..=8;
        // once node 4 joins, its outward edges raise the conductance and
        // the early-stop bound (truth size 2) ends the scan
        let mut builder = GraphBuilder::new();
        for a in 0..4u32 {
            for b in (a + 1)..4 {
                builder.add_edge(a, b);
            }
        }
        builder.add_edge(3, 4);
        for leaf in 5..=8 {
            builder.add_edge(4, leaf);
        }
        let graph = builder.build();

        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1]);
        let ranking = ranked(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let outcome = min_conductance_sweep(&graph, &ranking, &seeds, &truth);
        // the whole clique is kept: its (truncated) cut is zero
        assert_eq!(outcome.community, NodeSet::from([0, 1, 2, 3]));
        assert_eq!(outcome.score, 0.0);
        assert!(f1(&outcome.community, &NodeSet::from([0, 1, 2, 3])) == 1.0);
    }
}
