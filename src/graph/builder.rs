//! Graph construction module

use std::collections::BTreeSet;

use crate::graph::CompressedGraph;

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Adjacency sets, indexed by node id; sets deduplicate repeated edges
    adjacency: Vec<BTreeSet<u32>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            adjacency: Vec::new(),
        }
    }

    /// Create a builder with room for the given number of nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            adjacency: Vec::with_capacity(capacity),
        }
    }

    fn ensure_node(&mut self, node: u32) {
        let needed = node as usize + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize_with(needed, BTreeSet::new);
        }
    }

    /// Add an undirected edge; both endpoints gain the other as neighbor.
    /// Self-loops are kept as a single adjacency entry.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        self.ensure_node(a.max(b));
        self.adjacency[a as usize].insert(b);
        self.adjacency[b as usize].insert(a);
    }

    /// Number of node slots seen so far
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Build the compressed graph
    pub fn build(self) -> CompressedGraph {
        let node_count = self.adjacency.len();
        let edge_count: usize = self.adjacency.iter().map(|set| set.len()).sum();

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);

        let mut edges = Vec::with_capacity(edge_count);
        let mut offset = 0u32;
        for set in &self.adjacency {
            offset += set.len() as u32;
            offsets.push(offset);
            // BTreeSet iterates in ascending order, keeping lists sorted
            edges.extend(set.iter().copied());
        }

        CompressedGraph {
            node_count,
            offsets,
            edges,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
