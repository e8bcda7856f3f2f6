//! Embedding clustering module

pub mod dbscan;
pub mod walkscan;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::NodeSet;

/// A ranked cluster produced by the WalkSCAN stage.
///
/// Membership is not exclusive: outlier reattachment may add the same node
/// to several clusters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Rank of this cluster after center ordering (0 = best)
    pub id: usize,

    /// Member nodes, including reattached outliers
    pub members: NodeSet,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Density-clustering capability consumed by the WalkSCAN stage.
///
/// Given an embedding matrix (one row per candidate node), `epsilon` and
/// `min_points`, returns one label per row: `Some(cluster_id)` with ids
/// contiguous from 0 in discovery order, or `None` for noise. The core
/// never clusters on its own; tests substitute deterministic fakes.
pub trait EmbeddingClusterer {
    fn cluster(
        &self,
        points: ArrayView2<'_, f64>,
        epsilon: f64,
        min_points: usize,
    ) -> Result<Vec<Option<usize>>>;
}

pub use dbscan::Dbscan;
pub use walkscan::cluster_and_rank;
