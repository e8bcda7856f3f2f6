//! Bounded random-walk diffusion from a seed set

use crate::error::{Error, Result};
use crate::graph::{CompressedGraph, NodeSet};

/// Step rule applied at each walk iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalkMode {
    /// Every node pushes its whole mass uniformly to its neighbors
    Plain,

    /// Lazy walk: a node keeps `1 - alpha` of its mass and pushes the
    /// `alpha` share uniformly to its neighbors
    Lazy { alpha: f64 },
}

/// Per-step mass distributions and the set of nodes reached by the walk.
///
/// `support` records reachability: once a node has been touched it stays a
/// member even if its mass later returns to zero.
#[derive(Debug, Clone)]
pub struct DiffusionState {
    /// Number of walk steps taken
    pub steps: usize,

    /// Dense mass vector per step, `mass[t][node]`, for `t` in `0..=steps`
    mass: Vec<Vec<f64>>,

    /// Nodes ever reached by the walk
    pub support: NodeSet,
}

impl DiffusionState {
    /// Mass at a node after `step` walk steps
    pub fn mass_at(&self, step: usize, node: u32) -> f64 {
        self.mass[step][node as usize]
    }

    /// Mass at a node after the final step
    pub fn final_mass(&self, node: u32) -> f64 {
        self.mass[self.steps][node as usize]
    }

    /// Per-step profile `(mass[1][node], ..., mass[steps][node])`;
    /// the initial seed distribution is excluded
    pub fn step_profile(&self, node: u32) -> Vec<f64> {
        (1..=self.steps)
            .map(|t| self.mass[t][node as usize])
            .collect()
    }

    /// Total mass at a given step, for conservation checks
    pub fn total_mass(&self, step: usize) -> f64 {
        self.mass[step].iter().sum()
    }
}

/// Run a bounded random walk from a seed set.
///
/// The initial distribution puts `1 / |seeds|` on each seed. At each step,
/// every node in the support pushes mass along its edges according to the
/// walk mode; a degree-0 node contributes no outflow. The support is
/// extended by the neighbors of all current members at every step,
/// independently of the mass arithmetic.
pub fn diffuse(
    graph: &CompressedGraph,
    seed_set: &NodeSet,
    steps: usize,
    mode: WalkMode,
) -> Result<DiffusionState> {
    if seed_set.is_empty() {
        return Err(Error::EmptySeedSet);
    }
    for &seed in seed_set {
        if !graph.contains(seed) {
            return Err(Error::NodeOutOfRange {
                node: seed,
                max: graph.max_node_id(),
            });
        }
    }
    if let WalkMode::Lazy { alpha } = mode {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(Error::InvalidParameter(format!(
                "alpha must be in (0, 1], got {alpha}"
            )));
        }
    }

    let n = graph.node_count;
    // One dense vector per step, allocated up front for the whole call
    let mut mass = vec![vec![0.0f64; n]; steps + 1];
    let mut support = NodeSet::new();

    let seed_mass = 1.0 / seed_set.len() as f64;
    for &seed in seed_set {
        mass[0][seed as usize] = seed_mass;
        support.insert(seed);
    }

    for t in 0..steps {
        let mut next_support = support.clone();
        let (done, rest) = mass.split_at_mut(t + 1);
        let current = &done[t];
        let next = &mut rest[0];

        for &node in &support {
            let neighbors = graph.neighbors(node);
            let degree = neighbors.len();

            match mode {
                WalkMode::Plain => {
                    if degree > 0 {
                        let share = current[node as usize] / degree as f64;
                        for &neighbor in neighbors {
                            next[neighbor as usize] += share;
                            next_support.insert(neighbor);
                        }
                    }
                }
                WalkMode::Lazy { alpha } => {
                    next[node as usize] += (1.0 - alpha) * current[node as usize];
                    if degree > 0 {
                        let share = alpha * current[node as usize] / degree as f64;
                        for &neighbor in neighbors {
                            next[neighbor as usize] += share;
                            next_support.insert(neighbor);
                        }
                    }
                }
            }
        }
        support = next_support;
    }

    Ok(DiffusionState {
        steps,
        mass,
        support,
    })
}
