//! Configuration for the community detection pipeline

/// Default parameters for the diffusion and clustering stages
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of random-walk steps
    pub walk_length: usize,

    /// Teleport probability for the lazy walk (PageRank variant)
    pub alpha: f64,

    /// Neighborhood radius for density clustering
    pub epsilon: f64,

    /// Minimum neighbors within epsilon for a core point
    pub min_points: usize,

    /// Fraction of each ground-truth community used as seeds
    pub seed_proportion: f64,

    /// Only the top-L clusters are considered by the WalkSCAN selection
    /// policies (None = no limit)
    pub expert_limit: Option<usize>,

    /// Cap the embedding at twice the ground-truth size
    pub use_size_hint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk_length: 2,
            alpha: 0.85,
            epsilon: 0.01,
            min_points: 2,
            seed_proportion: 0.1,
            expert_limit: None,
            use_size_hint: true,
        }
    }
}
