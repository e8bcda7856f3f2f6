//! Memory-efficient undirected graph representation

use std::mem;

use serde::{Deserialize, Serialize};

/// Compressed sparse representation of an undirected graph.
///
/// Adjacency is symmetric: for every loaded edge `(u, v)`, `v` appears in
/// `neighbors(u)` and `u` in `neighbors(v)`. Neighbor lists are sorted and
/// deduplicated, so duplicate input edges collapse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of node slots (`max_node_id + 1`); nodes may have degree 0
    pub node_count: usize,

    /// Offset array: index where each node's neighbor list begins
    /// offsets[i] to offsets[i+1] defines the range for node i
    pub offsets: Vec<u32>,

    /// Concatenated sorted neighbor lists
    pub edges: Vec<u32>,
}

impl CompressedGraph {
    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count),
        }
    }

    /// Largest valid node id
    pub fn max_node_id(&self) -> u32 {
        self.node_count.saturating_sub(1) as u32
    }

    /// Whether a node id is addressable in this graph
    pub fn contains(&self, node: u32) -> bool {
        (node as usize) < self.node_count
    }

    /// Get the neighbors of a node as a sorted slice
    pub fn neighbors(&self, node: u32) -> &[u32] {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        &self.edges[start..end]
    }

    /// Degree of a node
    pub fn degree(&self, node: u32) -> usize {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        end - start
    }

    /// Check whether an edge between two nodes exists
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Number of undirected edges (half-edges / 2)
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();

        base + offsets + edges
    }
}
