use walkscan::cluster::Dbscan;
use walkscan::graph::{GraphBuilder, NodeSet};
use walkscan::pipeline::{run, Algorithm, RunOptions, StoppingCriterion};
use walkscan::scores;
use walkscan::walk::{diffuse, vector_ranking, WalkMode};

/// Two 4-cliques joined by the bridge edge 3-4
fn two_clique_graph() -> walkscan::CompressedGraph {
    let mut builder = GraphBuilder::new();
    for a in 0..4u32 {
        for b in (a + 1)..4 {
            builder.add_edge(a, b);
            builder.add_edge(a + 4, b + 4);
        }
    }
    builder.add_edge(3, 4);
    builder.build()
}

fn options(algorithm: Algorithm, stopping: StoppingCriterion) -> RunOptions {
    RunOptions {
        algorithm,
        stopping,
        steps: 2,
        alpha: 0.85,
        epsilon: 0.01,
        min_points: 2,
        expert_limit: None,
        paired: false,
        use_size_hint: true,
        fixed_threshold: None,
    }
}

#[test]
fn plain_and_lazy_walks_conserve_mass() {
    let graph = two_clique_graph();
    let seeds = NodeSet::from([0, 5]);

    for mode in [WalkMode::Plain, WalkMode::Lazy { alpha: 0.85 }] {
        let state = diffuse(&graph, &seeds, 4, mode).unwrap();
        for t in 0..=4 {
            let total = state.total_mass(t);
            assert!((total - 1.0).abs() < 1e-9, "{mode:?} step {t}: {total}");
        }
    }
}

#[test]
fn support_only_grows() {
    let graph = two_clique_graph();
    let seeds = NodeSet::from([0]);

    let mut previous = NodeSet::new();
    for steps in 0..4 {
        let state = diffuse(&graph, &seeds, steps, WalkMode::Plain).unwrap();
        assert!(previous.is_subset(&state.support), "steps {steps}");
        previous = state.support;
    }
}

#[test]
fn path_graph_walk_matches_the_worked_example() {
    // 0-1-2-3-4, seed {0}, T=2: mass moves to node 1 and bounces back
    let mut builder = GraphBuilder::new();
    for i in 0..4 {
        builder.add_edge(i, i + 1);
    }
    let graph = builder.build();
    let seeds = NodeSet::from([0]);

    let state = diffuse(&graph, &seeds, 2, WalkMode::Plain).unwrap();
    assert_eq!(state.mass_at(0, 0), 1.0);
    assert_eq!(state.mass_at(1, 1), 1.0);
    assert_eq!(state.mass_at(2, 0), 0.5);
    assert_eq!(state.mass_at(2, 2), 0.5);

    let ranking = vector_ranking(&state, &seeds);
    assert_eq!(ranking[0].node, 1);
    assert_eq!(ranking[0].score, vec![1.0, 0.0]);
    // the seed is excluded even though it regains mass
    assert!(ranking.iter().all(|ranked| ranked.node != 0));
}

#[test]
fn star_graph_ranking_is_a_deterministic_tie() {
    let mut builder = GraphBuilder::new();
    for leaf in 1..=4 {
        builder.add_edge(0, leaf);
    }
    let graph = builder.build();
    let seeds = NodeSet::from([0]);

    let first = vector_ranking(&diffuse(&graph, &seeds, 1, WalkMode::Plain).unwrap(), &seeds);
    let second = vector_ranking(&diffuse(&graph, &seeds, 1, WalkMode::Plain).unwrap(), &seeds);

    assert_eq!(first.len(), 4);
    for ranked in &first {
        assert_eq!(ranked.score, vec![0.25]);
    }
    assert_eq!(first, second);
}

#[test]
fn f1_of_equal_sized_sets_with_partial_overlap() {
    assert!((scores::f1_from_sizes(3, 3, 2) - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn lexrank_max_f1_recovers_both_cliques() {
    let graph = two_clique_graph();
    let seed_sets = vec![NodeSet::from([0]), NodeSet::from([5])];
    let truth = walkscan::data::GroundTruth::new(
        vec![NodeSet::from([0, 1, 2, 3]), NodeSet::from([4, 5, 6, 7])],
        7,
    );

    let report = run(
        &graph,
        &seed_sets,
        Some(&truth),
        &options(Algorithm::LexRank, StoppingCriterion::MaxF1),
        &Dbscan,
    )
    .unwrap();

    assert_eq!(report.communities[0], NodeSet::from([0, 1, 2, 3]));
    assert_eq!(report.communities[1], NodeSet::from([4, 5, 6, 7]));
    assert_eq!(report.average_f1, Some(1.0));
}

#[test]
fn walkscan_pipeline_recovers_a_clique() {
    // At epsilon 0.01 the embedding separates nodes 1 and 2 (identical
    // profiles) from the rest; node 3 reattaches through its clique edges
    // and the bridge node 4 is dropped with no clustered neighbor.
    let graph = two_clique_graph();
    let seed_sets = vec![NodeSet::from([0])];
    let truth =
        walkscan::data::GroundTruth::new(vec![NodeSet::from([0, 1, 2, 3])], 7);

    let mut opts = options(Algorithm::WalkScan, StoppingCriterion::MaxF1);
    opts.min_points = 1;

    let report = run(&graph, &seed_sets, Some(&truth), &opts, &Dbscan).unwrap();
    assert_eq!(report.communities[0], NodeSet::from([0, 1, 2, 3]));
    assert_eq!(report.average_f1, Some(1.0));
    assert_eq!(report.seed_union_average_f1, Some(1.0));
}

#[test]
fn conductance_sweep_scores_stay_bounded() {
    let graph = two_clique_graph();
    let seed_sets = vec![NodeSet::from([0]), NodeSet::from([5])];
    let truth = walkscan::data::GroundTruth::new(
        vec![NodeSet::from([0, 1, 2, 3]), NodeSet::from([4, 5, 6, 7])],
        7,
    );

    let report = run(
        &graph,
        &seed_sets,
        Some(&truth),
        &options(Algorithm::LexRank, StoppingCriterion::Conductance),
        &Dbscan,
    )
    .unwrap();

    for (seed_set, community) in seed_sets.iter().zip(report.communities.iter()) {
        assert!(seed_set.is_subset(community));
    }
    for score in &report.scores {
        assert!((0.0..=1.0).contains(score));
    }
}

#[test]
fn global_threshold_search_separates_the_bridge() {
    // Lazy walk from seed {0}: the bridge node 4 ends with mass ~0.0602,
    // every clique member with more; the first separating grid value wins.
    let graph = two_clique_graph();
    let seed_sets = vec![NodeSet::from([0])];
    let truth =
        walkscan::data::GroundTruth::new(vec![NodeSet::from([0, 1, 2, 3])], 7);

    let report = run(
        &graph,
        &seed_sets,
        Some(&truth),
        &options(Algorithm::PageRank, StoppingCriterion::Threshold),
        &Dbscan,
    )
    .unwrap();

    assert_eq!(report.communities[0], NodeSet::from([0, 1, 2, 3]));
    assert_eq!(report.average_f1, Some(1.0));
    let threshold = report.best_threshold.unwrap();
    assert!((threshold - 0.061).abs() < 1e-9, "threshold {threshold}");
}
