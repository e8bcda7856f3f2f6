//! Community selection from ranked WalkSCAN clusters

use crate::cluster::Cluster;
use crate::data::GroundTruth;
use crate::graph::NodeSet;
use crate::scores::{f1, f1_from_sizes, intersection_size};

/// Restrict a cluster list to its top-L entries (the "expert limit")
fn limited(clusters: &[Cluster], expert_limit: Option<usize>) -> &[Cluster] {
    match expert_limit {
        Some(limit) => &clusters[..clusters.len().min(limit)],
        None => clusters,
    }
}

/// Pick the single cluster whose union with the seed set scores best
/// against the ground truth.
///
/// Only strictly better scores replace the seed-only baseline; with no
/// improving cluster the community stays the seed set alone. The size
/// arithmetic treats the seed set as disjoint from the cluster and fully
/// inside the ground truth.
pub fn best_cluster_community(
    clusters: &[Cluster],
    seed_set: &NodeSet,
    ground_truth: &NodeSet,
    expert_limit: Option<usize>,
) -> (NodeSet, f64) {
    let seed_size = seed_set.len();
    let truth_size = ground_truth.len();
    let mut best_score = f1_from_sizes(seed_size, truth_size, seed_size);
    let mut best_members: Option<&NodeSet> = None;

    for cluster in limited(clusters, expert_limit) {
        let intersection = intersection_size(&cluster.members, ground_truth) + seed_size;
        let score = f1_from_sizes(cluster.size() + seed_size, truth_size, intersection);
        if score > best_score {
            best_score = score;
            best_members = Some(&cluster.members);
        }
    }

    let mut community = seed_set.clone();
    if let Some(members) = best_members {
        community.extend(members.iter().copied());
    }
    (community, best_score)
}

/// Two-stage selection: fix the best single cluster, then try unioning it
/// with each other candidate and keep the best pair if it strictly
/// improves on the single-cluster result.
pub fn best_cluster_pair(
    clusters: &[Cluster],
    seed_set: &NodeSet,
    ground_truth: &NodeSet,
    expert_limit: Option<usize>,
) -> (NodeSet, f64) {
    let (single, single_score) = best_cluster_community(clusters, seed_set, ground_truth, expert_limit);

    let truth_size = ground_truth.len();
    let mut best_score = single_score;
    let mut best_community = single.clone();

    for cluster in limited(clusters, expert_limit) {
        let mut union = single.clone();
        union.extend(cluster.members.iter().copied());
        let intersection = intersection_size(&union, ground_truth);
        let score = f1_from_sizes(union.len(), truth_size, intersection);
        if score > best_score {
            best_score = score;
            best_community = union;
        }
    }

    (best_community, best_score)
}

/// Seed set plus the highest-ranked cluster; the selection used when no
/// ground truth is available.
pub fn first_cluster_community(clusters: &[Cluster], seed_set: &NodeSet) -> NodeSet {
    let mut community = seed_set.clone();
    if let Some(first) = clusters.first() {
        community.extend(first.members.iter().copied());
    }
    community
}

/// Score the union of the top-L clusters against the union of all
/// ground-truth communities containing any seed.
pub fn top_cluster_union_f1(
    clusters: &[Cluster],
    seed_set: &NodeSet,
    truth: &GroundTruth,
    expert_limit: Option<usize>,
) -> f64 {
    let mut target = NodeSet::new();
    for &seed in seed_set {
        for &index in truth.memberships(seed) {
            target.extend(truth.communities[index as usize].iter().copied());
        }
    }

    let mut community = NodeSet::new();
    for cluster in limited(clusters, expert_limit) {
        community.extend(cluster.members.iter().copied());
    }

    f1(&community, &target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: usize, members: &[u32]) -> Cluster {
        Cluster {
            id,
            members: members.iter().copied().collect(),
        }
    }

    #[test]
    fn picks_the_best_matching_cluster() {
        let clusters = vec![
            cluster(0, &[8, 9]),
            cluster(1, &[1, 2, 3]),
        ];
        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1, 2, 3]);

        let (community, score) = best_cluster_community(&clusters, &seeds, &truth, None);
        assert_eq!(community, NodeSet::from([0, 1, 2, 3]));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn falls_back_to_the_seed_set() {
        let clusters = vec![cluster(0, &[8, 9])];
        let seeds = NodeSet::from([0, 1]);
        let truth = NodeSet::from([0, 1, 2]);

        let (community, score) = best_cluster_community(&clusters, &seeds, &truth, None);
        assert_eq!(community, seeds);
        assert_eq!(score, f1_from_sizes(2, 3, 2));
    }

    #[test]
    fn expert_limit_hides_later_clusters() {
        let clusters = vec![
            cluster(0, &[8, 9]),
            cluster(1, &[1, 2, 3]),
        ];
        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1, 2, 3]);

        let (community, _) = best_cluster_community(&clusters, &seeds, &truth, Some(1));
        // the matching cluster is out of reach behind the limit
        assert_eq!(community, seeds);
    }

    #[test]
    fn pair_stage_unions_two_clusters() {
        // the truth spans two clusters; neither alone reaches it
        let clusters = vec![
            cluster(0, &[1, 2]),
            cluster(1, &[3, 4]),
        ];
        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1, 2, 3, 4]);

        let (single, single_score) = best_cluster_community(&clusters, &seeds, &truth, None);
        assert!(single.len() < truth.len());

        let (paired, paired_score) = best_cluster_pair(&clusters, &seeds, &truth, None);
        assert_eq!(paired, truth);
        assert_eq!(paired_score, 1.0);
        assert!(paired_score > single_score);
    }

    #[test]
    fn empty_cluster_list_degenerates_to_seeds() {
        let seeds = NodeSet::from([0]);
        let truth = NodeSet::from([0, 1]);

        let (community, _) = best_cluster_community(&[], &seeds, &truth, None);
        assert_eq!(community, seeds);
        assert_eq!(first_cluster_community(&[], &seeds), seeds);
    }

    #[test]
    fn first_cluster_selection_ignores_ground_truth() {
        let clusters = vec![cluster(0, &[5, 6]), cluster(1, &[7])];
        let seeds = NodeSet::from([0]);
        assert_eq!(
            first_cluster_community(&clusters, &seeds),
            NodeSet::from([0, 5, 6])
        );
    }

    #[test]
    fn union_scoring_takes_raw_clusters() {
        let truth = GroundTruth::new(vec![NodeSet::from([0, 1, 2]), NodeSet::from([3, 4])], 4);
        let clusters = vec![cluster(0, &[1, 2]), cluster(1, &[4])];
        let seeds = NodeSet::from([0]);

        // seed 0 touches only the first community: target = {0, 1, 2};
        // the cluster union {1, 2, 4} is scored raw, without the seeds
        let score = top_cluster_union_f1(&clusters, &seeds, &truth, None);
        assert!((score - f1_from_sizes(3, 3, 2)).abs() < 1e-12);
    }
}
