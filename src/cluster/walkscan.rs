//! Embedding construction, outlier reattachment and cluster ranking

use std::collections::HashMap;

use ndarray::Array2;

use crate::cluster::{Cluster, EmbeddingClusterer};
use crate::error::{Error, Result};
use crate::graph::{CompressedGraph, NodeSet};
use crate::walk::{DiffusionState, RankedNode, ScoreOrd};

/// Cluster the top-ranked candidates and return the clusters ordered by
/// their center profiles.
///
/// The embedding takes the top-K ranked nodes; with a ground-truth size
/// hint, K is capped at twice that size. Noise-labeled nodes are reattached
/// to every cluster a direct graph neighbor belongs to, so membership may
/// overlap; noise with no clustered neighbor is dropped. Centers are the
/// per-step mean profiles of the final member sets and are used only for
/// ordering.
pub fn cluster_and_rank(
    graph: &CompressedGraph,
    state: &DiffusionState,
    ranking: &[RankedNode<Vec<f64>>],
    size_hint: Option<usize>,
    epsilon: f64,
    min_points: usize,
    clusterer: &dyn EmbeddingClusterer,
) -> Result<Vec<Cluster>> {
    let mut candidates = ranking.len();
    if let Some(hint) = size_hint {
        candidates = candidates.min(2 * hint);
    }
    if candidates == 0 {
        return Ok(Vec::new());
    }

    // Embedding matrix: one row per candidate, one column per walk step
    let mut embedding = Array2::zeros((candidates, state.steps));
    let mut node_list = Vec::with_capacity(candidates);
    for (row, ranked) in ranking.iter().take(candidates).enumerate() {
        for (column, &mass) in ranked.score.iter().enumerate() {
            embedding[[row, column]] = mass;
        }
        node_list.push(ranked.node);
    }

    let labels = clusterer.cluster(embedding.view(), epsilon, min_points)?;
    if labels.len() != candidates {
        return Err(Error::ClusterLabelMismatch {
            expected: candidates,
            got: labels.len(),
        });
    }

    // Group rows by label, keeping label numbering
    let mut sets: Vec<NodeSet> = Vec::new();
    let mut assigned: HashMap<u32, usize> = HashMap::new();
    let mut outliers = NodeSet::new();
    for (row, label) in labels.iter().enumerate() {
        let node = node_list[row];
        match label {
            Some(cluster_id) => {
                if *cluster_id >= sets.len() {
                    sets.resize_with(cluster_id + 1, NodeSet::new);
                }
                sets[*cluster_id].insert(node);
                assigned.insert(node, *cluster_id);
            }
            None => {
                outliers.insert(node);
            }
        }
    }

    reattach_outliers(graph, &mut sets, &assigned, &outliers);

    // Rank clusters by their center profiles; empty sets (possible only
    // under a non-contiguous labeling) are dropped
    let mut centered: Vec<(NodeSet, Vec<f64>)> = sets
        .into_iter()
        .filter(|members| !members.is_empty())
        .map(|members| {
            let center = center_profile(state, &members);
            (members, center)
        })
        .collect();
    centered.sort_by(|a, b| b.1.score_cmp(&a.1));

    Ok(centered
        .into_iter()
        .enumerate()
        .map(|(id, (members, _))| Cluster { id, members })
        .collect())
}

/// Add every noise node to the clusters of its direct graph neighbors.
///
/// Reattached nodes do not become attachment targets themselves, so a
/// second pass over the same assignment changes nothing.
fn reattach_outliers(
    graph: &CompressedGraph,
    sets: &mut [NodeSet],
    assigned: &HashMap<u32, usize>,
    outliers: &NodeSet,
) {
    for &node in outliers {
        for &neighbor in graph.neighbors(node) {
            if let Some(&cluster_id) = assigned.get(&neighbor) {
                sets[cluster_id].insert(node);
            }
        }
    }
}

/// Mean per-step mass profile of a member set
fn center_profile(state: &DiffusionState, members: &NodeSet) -> Vec<f64> {
    let size = members.len() as f64;
    let mut center = vec![0.0f64; state.steps];
    for &node in members {
        for (t, slot) in center.iter_mut().enumerate() {
            *slot += state.mass_at(t + 1, node) / size;
        }
    }
    center
}
