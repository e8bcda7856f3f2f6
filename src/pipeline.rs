//! Batch drivers: one community per seed set, across all seed sets

use rayon::prelude::*;

use crate::cluster::{cluster_and_rank, Cluster, EmbeddingClusterer};
use crate::data::GroundTruth;
use crate::error::{Error, Result};
use crate::graph::{CompressedGraph, NodeSet};
use crate::scores::{average, f1, f1_per_seed, f1_seed_union};
use crate::select::{
    best_cluster_community, best_cluster_pair, find_best_threshold, first_cluster_community,
    max_f1_sweep, min_conductance_sweep, threshold_sweep,
};
use crate::walk::{diffuse, scalar_ranking, vector_ranking, WalkMode};

/// Algorithm variant driving the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Lazy walk, scalar final-mass ranking
    PageRank,
    /// Plain walk, per-step vector ranking
    LexRank,
    /// Plain walk, vector embedding + density clustering
    WalkScan,
}

/// Stopping criterion for the ranking-based variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoppingCriterion {
    MaxF1,
    Threshold,
    Conductance,
}

/// Parameters of one batch run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub algorithm: Algorithm,
    pub stopping: StoppingCriterion,
    pub steps: usize,
    pub alpha: f64,
    pub epsilon: f64,
    pub min_points: usize,
    pub expert_limit: Option<usize>,
    /// WalkSCAN: also try pairwise cluster unions
    pub paired: bool,
    /// WalkSCAN: cap the embedding at twice the ground-truth size
    pub use_size_hint: bool,
    /// Fixed threshold for runs without ground truth
    pub fixed_threshold: Option<f64>,
}

/// Output of a batch run over all seed sets
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// One community per seed set
    pub communities: Vec<NodeSet>,

    /// Per-seed-set quality scores, when ground truth was available
    /// (F1, or minimum conductance for the conductance criterion)
    pub scores: Vec<f64>,

    /// Average F1 across seed sets, when ground truth was available
    pub average_f1: Option<f64>,

    /// Winning value of the global threshold search
    pub best_threshold: Option<f64>,

    /// Average derived threshold from the scalar max-F1 sweep
    pub average_rank_threshold: Option<f64>,

    /// Aggregate scoring modes over the final communities
    pub per_seed_average_f1: Option<f64>,
    pub seed_union_average_f1: Option<f64>,
}

/// Validate seed sets and ground truth against the graph before any
/// diffusion starts.
fn validate_inputs(
    graph: &CompressedGraph,
    seed_sets: &[NodeSet],
    truth: Option<&GroundTruth>,
) -> Result<()> {
    for seed_set in seed_sets {
        if seed_set.is_empty() {
            return Err(Error::EmptySeedSet);
        }
        for &node in seed_set {
            if !graph.contains(node) {
                return Err(Error::NodeOutOfRange {
                    node,
                    max: graph.max_node_id(),
                });
            }
        }
    }
    if let Some(truth) = truth {
        for community in &truth.communities {
            for &node in community {
                if !graph.contains(node) {
                    return Err(Error::NodeOutOfRange {
                        node,
                        max: graph.max_node_id(),
                    });
                }
            }
        }
        if truth.communities.len() != seed_sets.len() {
            return Err(Error::InvalidParameter(format!(
                "{} seed sets but {} ground-truth communities",
                seed_sets.len(),
                truth.communities.len()
            )));
        }
    }
    Ok(())
}

fn require_truth() -> Error {
    Error::InvalidParameter(
        "this algorithm/criterion combination requires ground-truth communities".to_string(),
    )
}

/// Run one algorithm/criterion combination over every seed set.
///
/// Seed sets are processed in parallel; each owns its scratch state and
/// only the graph and ground truth are shared.
pub fn run(
    graph: &CompressedGraph,
    seed_sets: &[NodeSet],
    truth: Option<&GroundTruth>,
    options: &RunOptions,
    clusterer: &(dyn EmbeddingClusterer + Sync),
) -> Result<AnalysisReport> {
    validate_inputs(graph, seed_sets, truth)?;

    if truth.is_none() {
        let supported = options.algorithm == Algorithm::WalkScan
            || (options.stopping == StoppingCriterion::Threshold
                && options.fixed_threshold.is_some());
        if !supported {
            return Err(require_truth());
        }
    }

    let mut report = match options.algorithm {
        Algorithm::PageRank => run_pagerank(graph, seed_sets, truth, options)?,
        Algorithm::LexRank => run_lexrank(graph, seed_sets, truth, options)?,
        Algorithm::WalkScan => run_walkscan(graph, seed_sets, truth, options, clusterer)?,
    };

    if let Some(truth) = truth {
        report.per_seed_average_f1 = Some(average(&f1_per_seed(
            seed_sets,
            truth,
            &report.communities,
        )));
        report.seed_union_average_f1 = Some(average(&f1_seed_union(
            seed_sets,
            truth,
            &report.communities,
        )));
    }
    Ok(report)
}

fn run_pagerank(
    graph: &CompressedGraph,
    seed_sets: &[NodeSet],
    truth: Option<&GroundTruth>,
    options: &RunOptions,
) -> Result<AnalysisReport> {
    log::info!(
        "Computing PageRank rankings for {} seed sets ({} steps, alpha {})",
        seed_sets.len(),
        options.steps,
        options.alpha
    );
    let mode = WalkMode::Lazy {
        alpha: options.alpha,
    };
    let rankings = seed_sets
        .par_iter()
        .map(|seed_set| {
            diffuse(graph, seed_set, options.steps, mode)
                .map(|state| scalar_ranking(&state, seed_set))
        })
        .collect::<Result<Vec<_>>>()?;

    match options.stopping {
        StoppingCriterion::MaxF1 => {
            let truth = truth.ok_or_else(require_truth)?;
            let outcomes: Vec<_> = seed_sets
                .par_iter()
                .zip(rankings.par_iter())
                .enumerate()
                .map(|(i, (seed_set, ranking))| {
                    max_f1_sweep(ranking, seed_set, &truth.communities[i])
                })
                .collect();

            let thresholds: Vec<f64> = outcomes
                .iter()
                .map(|o| o.threshold.unwrap_or(1.0))
                .collect();
            let scores: Vec<f64> = outcomes.iter().map(|o| o.score).collect();
            Ok(AnalysisReport {
                communities: outcomes.into_iter().map(|o| o.community).collect(),
                average_f1: Some(average(&scores)),
                scores,
                best_threshold: None,
                average_rank_threshold: Some(average(&thresholds)),
                per_seed_average_f1: None,
                seed_union_average_f1: None,
            })
        }
        StoppingCriterion::Threshold => match truth {
            Some(truth) => {
                let search = find_best_threshold(
                    &rankings,
                    seed_sets,
                    &truth.communities,
                    |value| value,
                );
                log::info!("Best threshold: {:.6}", search.best_threshold);
                Ok(AnalysisReport {
                    communities: search.communities,
                    average_f1: Some(search.average_f1),
                    scores: search.f1_scores,
                    best_threshold: Some(search.best_threshold),
                    average_rank_threshold: None,
                    per_seed_average_f1: None,
                    seed_union_average_f1: None,
                })
            }
            None => {
                let value = options.fixed_threshold.ok_or_else(require_truth)?;
                let communities: Vec<NodeSet> = rankings
                    .iter()
                    .zip(seed_sets.iter())
                    .map(|(ranking, seed_set)| threshold_sweep(ranking, seed_set, &value))
                    .collect();
                Ok(no_truth_report(communities, Some(value)))
            }
        },
        StoppingCriterion::Conductance => {
            let truth = truth.ok_or_else(require_truth)?;
            conductance_report(graph, seed_sets, &rankings, truth)
        }
    }
}

fn run_lexrank(
    graph: &CompressedGraph,
    seed_sets: &[NodeSet],
    truth: Option<&GroundTruth>,
    options: &RunOptions,
) -> Result<AnalysisReport> {
    log::info!(
        "Computing LexRank rankings for {} seed sets ({} steps)",
        seed_sets.len(),
        options.steps
    );
    let rankings = seed_sets
        .par_iter()
        .map(|seed_set| {
            diffuse(graph, seed_set, options.steps, WalkMode::Plain)
                .map(|state| vector_ranking(&state, seed_set))
        })
        .collect::<Result<Vec<_>>>()?;

    let steps = options.steps;
    let lift = |value: f64| {
        let mut threshold = vec![0.0f64; steps];
        if let Some(first) = threshold.first_mut() {
            *first = value;
        }
        threshold
    };

    match options.stopping {
        StoppingCriterion::MaxF1 => {
            let truth = truth.ok_or_else(require_truth)?;
            let outcomes: Vec<_> = seed_sets
                .par_iter()
                .zip(rankings.par_iter())
                .enumerate()
                .map(|(i, (seed_set, ranking))| {
                    max_f1_sweep(ranking, seed_set, &truth.communities[i])
                })
                .collect();

            let scores: Vec<f64> = outcomes.iter().map(|o| o.score).collect();
            Ok(AnalysisReport {
                communities: outcomes.into_iter().map(|o| o.community).collect(),
                average_f1: Some(average(&scores)),
                scores,
                best_threshold: None,
                average_rank_threshold: None,
                per_seed_average_f1: None,
                seed_union_average_f1: None,
            })
        }
        StoppingCriterion::Threshold => match truth {
            Some(truth) => {
                let search =
                    find_best_threshold(&rankings, seed_sets, &truth.communities, lift);
                log::info!("Best threshold: {:.6}", search.best_threshold);
                Ok(AnalysisReport {
                    communities: search.communities,
                    average_f1: Some(search.average_f1),
                    scores: search.f1_scores,
                    best_threshold: Some(search.best_threshold),
                    average_rank_threshold: None,
                    per_seed_average_f1: None,
                    seed_union_average_f1: None,
                })
            }
            None => {
                let value = options.fixed_threshold.ok_or_else(require_truth)?;
                let threshold = lift(value);
                let communities: Vec<NodeSet> = rankings
                    .iter()
                    .zip(seed_sets.iter())
                    .map(|(ranking, seed_set)| threshold_sweep(ranking, seed_set, &threshold))
                    .collect();
                Ok(no_truth_report(communities, Some(value)))
            }
        },
        StoppingCriterion::Conductance => {
            let truth = truth.ok_or_else(require_truth)?;
            conductance_report(graph, seed_sets, &rankings, truth)
        }
    }
}

fn run_walkscan(
    graph: &CompressedGraph,
    seed_sets: &[NodeSet],
    truth: Option<&GroundTruth>,
    options: &RunOptions,
    clusterer: &(dyn EmbeddingClusterer + Sync),
) -> Result<AnalysisReport> {
    log::info!(
        "Computing WalkSCAN clusters for {} seed sets ({} steps, epsilon {}, min points {})",
        seed_sets.len(),
        options.steps,
        options.epsilon,
        options.min_points
    );
    let clusters_per_seed = seed_sets
        .par_iter()
        .enumerate()
        .map(|(i, seed_set)| {
            let state = diffuse(graph, seed_set, options.steps, WalkMode::Plain)?;
            let ranking = vector_ranking(&state, seed_set);
            let size_hint = match (options.use_size_hint, truth) {
                (true, Some(truth)) => Some(truth.communities[i].len()),
                _ => None,
            };
            cluster_and_rank(
                graph,
                &state,
                &ranking,
                size_hint,
                options.epsilon,
                options.min_points,
                clusterer,
            )
        })
        .collect::<Result<Vec<Vec<Cluster>>>>()?;

    match truth {
        Some(truth) => {
            let selected: Vec<(NodeSet, f64)> = seed_sets
                .iter()
                .zip(clusters_per_seed.iter())
                .enumerate()
                .map(|(i, (seed_set, clusters))| {
                    let community = &truth.communities[i];
                    if options.paired {
                        best_cluster_pair(clusters, seed_set, community, options.expert_limit)
                    } else {
                        best_cluster_community(clusters, seed_set, community, options.expert_limit)
                    }
                })
                .collect();

            let scores: Vec<f64> = selected.iter().map(|(_, score)| *score).collect();
            Ok(AnalysisReport {
                communities: selected.into_iter().map(|(community, _)| community).collect(),
                average_f1: Some(average(&scores)),
                scores,
                best_threshold: None,
                average_rank_threshold: None,
                per_seed_average_f1: None,
                seed_union_average_f1: None,
            })
        }
        None => {
            let communities: Vec<NodeSet> = seed_sets
                .iter()
                .zip(clusters_per_seed.iter())
                .map(|(seed_set, clusters)| first_cluster_community(clusters, seed_set))
                .collect();
            Ok(no_truth_report(communities, None))
        }
    }
}

fn conductance_report<S: Sync + Send>(
    graph: &CompressedGraph,
    seed_sets: &[NodeSet],
    rankings: &[Vec<crate::walk::RankedNode<S>>],
    truth: &GroundTruth,
) -> Result<AnalysisReport> {
    let outcomes: Vec<_> = seed_sets
        .par_iter()
        .zip(rankings.par_iter())
        .enumerate()
        .map(|(i, (seed_set, ranking))| {
            min_conductance_sweep(graph, ranking, seed_set, &truth.communities[i])
        })
        .collect();

    let f1_scores: Vec<f64> = outcomes
        .iter()
        .enumerate()
        .map(|(i, outcome)| f1(&outcome.community, &truth.communities[i]))
        .collect();
    Ok(AnalysisReport {
        communities: outcomes.into_iter().map(|o| o.community).collect(),
        average_f1: Some(average(&f1_scores)),
        scores: f1_scores,
        best_threshold: None,
        average_rank_threshold: None,
        per_seed_average_f1: None,
        seed_union_average_f1: None,
    })
}

fn no_truth_report(communities: Vec<NodeSet>, threshold: Option<f64>) -> AnalysisReport {
    AnalysisReport {
        scores: Vec::new(),
        average_f1: None,
        best_threshold: threshold,
        average_rank_threshold: None,
        per_seed_average_f1: None,
        seed_union_average_f1: None,
        communities,
    }
}
