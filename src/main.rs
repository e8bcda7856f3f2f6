use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use walkscan::cluster::Dbscan;
use walkscan::config::Config;
use walkscan::data::{load_edge_list, load_node_sets, GroundTruth};
use walkscan::pipeline::{self, Algorithm, RunOptions, StoppingCriterion};
use walkscan::seeding;
use walkscan::storage;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    PageRank,
    LexRank,
    WalkScan,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StoppingArg {
    MaxF1,
    Threshold,
    Conductance,
}

#[derive(Parser, Debug)]
#[clap(
    name = "walkscan",
    about = "Local community detection around seed nodes via bounded random walks"
)]
struct Cli {
    /// Path to the graph file (whitespace-separated list of edges)
    #[clap(short = 'i', long)]
    graph: PathBuf,

    /// Output directory for results
    #[clap(short = 'o', long, default_value = "walkscan_results")]
    output_dir: String,

    /// File with ground-truth communities (one space-separated set per line)
    #[clap(short = 'c', long)]
    communities: Option<PathBuf>,

    /// File with seed sets; picked at random inside each ground-truth
    /// community when omitted
    #[clap(short = 's', long)]
    seeds: Option<PathBuf>,

    /// Length of the random walks
    #[clap(short = 't', long, default_value = "2")]
    steps: usize,

    /// Algorithm variant
    #[clap(short = 'a', long, value_enum, default_value = "page-rank")]
    algorithm: AlgorithmArg,

    /// Stopping criterion for the PageRank/LexRank variants
    #[clap(short = 'f', long, value_enum, default_value = "max-f1")]
    stopping: StoppingArg,

    /// Teleport probability of the lazy walk
    #[clap(long, default_value = "0.85")]
    alpha: f64,

    /// Neighborhood radius for density clustering
    #[clap(long, default_value = "0.01")]
    epsilon: f64,

    /// Minimum neighbors within epsilon for a core point
    #[clap(long, default_value = "2")]
    min_points: usize,

    /// Consider only the top-L WalkSCAN clusters (0 = no limit)
    #[clap(long, default_value = "0")]
    expert_limit: usize,

    /// Also try pairwise cluster unions in the WalkSCAN selection
    #[clap(long)]
    paired: bool,

    /// Do not cap the embedding at twice the ground-truth size
    #[clap(long)]
    no_size_hint: bool,

    /// Fixed rank threshold, required for threshold runs without ground truth
    #[clap(long)]
    threshold: Option<f64>,

    /// Fraction of each ground-truth community picked as seeds
    #[clap(long, default_value = "0.1")]
    seed_proportion: f64,

    /// RNG seed for reproducible seed picking
    #[clap(long)]
    rng_seed: Option<u64>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Graph file: {}", args.graph.display());
    let graph = load_edge_list(&args.graph)?;
    log::info!(
        "Loaded graph with {} nodes, {} edges ({} bytes)",
        graph.node_count,
        graph.edge_count(),
        graph.memory_usage()
    );

    let truth = match &args.communities {
        Some(path) => {
            log::info!("Ground-truth communities: {}", path.display());
            let communities = load_node_sets(path)?;
            Some(GroundTruth::new(communities, graph.max_node_id()))
        }
        None => {
            log::info!("No ground-truth communities supplied");
            None
        }
    };

    std::fs::create_dir_all(&args.output_dir)?;

    let seed_sets = match &args.seeds {
        Some(path) => {
            log::info!("Seed sets: {}", path.display());
            load_node_sets(path)?
        }
        None => {
            let truth = truth
                .as_ref()
                .context("picking random seeds requires ground-truth communities")?;
            let mut rng = match args.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            log::info!(
                "Picking random seeds in each ground-truth community (proportion {})",
                args.seed_proportion
            );
            let seed_sets = seeding::pick_seeds_in_communities(
                &truth.communities,
                args.seed_proportion,
                &mut rng,
            );
            let seeds_path = Path::new(&args.output_dir).join("seed_sets.txt");
            storage::write_node_sets(&seeds_path, &seed_sets)?;
            log::info!("Seed sets written to {}", seeds_path.display());
            seed_sets
        }
    };
    log::info!("Number of seed sets: {}", seed_sets.len());

    let defaults = Config::default();
    let options = RunOptions {
        algorithm: match args.algorithm {
            AlgorithmArg::PageRank => Algorithm::PageRank,
            AlgorithmArg::LexRank => Algorithm::LexRank,
            AlgorithmArg::WalkScan => Algorithm::WalkScan,
        },
        stopping: match args.stopping {
            StoppingArg::MaxF1 => StoppingCriterion::MaxF1,
            StoppingArg::Threshold => StoppingCriterion::Threshold,
            StoppingArg::Conductance => StoppingCriterion::Conductance,
        },
        steps: args.steps,
        alpha: args.alpha,
        epsilon: args.epsilon,
        min_points: args.min_points,
        expert_limit: match args.expert_limit {
            0 => defaults.expert_limit,
            limit => Some(limit),
        },
        paired: args.paired,
        use_size_hint: !args.no_size_hint,
        fixed_threshold: args.threshold,
    };

    let report = pipeline::run(&graph, &seed_sets, truth.as_ref(), &options, &Dbscan)
        .context("community detection failed")?;

    if let Some(average_f1) = report.average_f1 {
        log::info!("Average F1 score: {:.6}", average_f1);
    }
    if let Some(threshold) = report.average_rank_threshold {
        log::info!("Average rank threshold: {:.6}", threshold);
    }
    if let Some(per_seed) = report.per_seed_average_f1 {
        log::info!("Per-seed average F1: {:.6}", per_seed);
    }
    if let Some(seed_union) = report.seed_union_average_f1 {
        log::info!("Seed-union average F1: {:.6}", seed_union);
    }

    storage::save_results(&report, seed_sets.len(), &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
