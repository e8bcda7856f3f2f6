//! Community selection policies

pub mod clusters;
pub mod sweep;
pub mod threshold;

pub use clusters::{
    best_cluster_community, best_cluster_pair, first_cluster_community, top_cluster_union_f1,
};
pub use sweep::{max_f1_sweep, min_conductance_sweep, SweepOutcome};
pub use threshold::{find_best_threshold, threshold_sweep, ThresholdSearch};
