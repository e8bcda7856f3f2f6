//! Text-file loaders for graphs and node sets

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::graph::{CompressedGraph, GraphBuilder, NodeSet};

/// Ground-truth communities with a per-node reverse index
#[derive(Debug, Clone)]
pub struct GroundTruth {
    /// One node set per community, in file order
    pub communities: Vec<NodeSet>,

    /// For each node id, the indices of the communities containing it
    pub node_memberships: Vec<Vec<u32>>,
}

impl GroundTruth {
    /// Build the reverse index for nodes in `[0, max_node_id]`
    pub fn new(communities: Vec<NodeSet>, max_node_id: u32) -> Self {
        let mut node_memberships = vec![Vec::new(); max_node_id as usize + 1];
        for (index, community) in communities.iter().enumerate() {
            for &node in community {
                if let Some(list) = node_memberships.get_mut(node as usize) {
                    list.push(index as u32);
                }
            }
        }
        Self {
            communities,
            node_memberships,
        }
    }

    /// Indices of the ground-truth communities containing a node
    pub fn memberships(&self, node: u32) -> &[u32] {
        self.node_memberships
            .get(node as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Load an undirected graph from a whitespace-separated edge list.
///
/// Each line holds two node ids. Duplicate edges and self-loops are kept as
/// the graph representation defines them (duplicates collapse, self-loops
/// become a single adjacency entry).
pub fn load_edge_list(path: &Path) -> Result<CompressedGraph> {
    let file = File::open(path).with_context(|| format!("opening graph file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut builder = GraphBuilder::new();
    let mut edges_read = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading graph file {}", path.display()))?;
        let mut fields = line.split_whitespace();
        let Some(first) = fields.next() else {
            continue; // blank line
        };
        let second = fields
            .next()
            .with_context(|| format!("{}:{}: expected two node ids", path.display(), lineno + 1))?;
        let a: u32 = first
            .parse()
            .with_context(|| format!("{}:{}: invalid node id {first:?}", path.display(), lineno + 1))?;
        let b: u32 = second
            .parse()
            .with_context(|| format!("{}:{}: invalid node id {second:?}", path.display(), lineno + 1))?;
        builder.add_edge(a, b);
        edges_read += 1;
    }

    let graph = builder.build();
    log::info!(
        "Loaded {} edge lines: {} nodes, {} unique edges",
        edges_read,
        graph.node_count,
        graph.edge_count()
    );
    Ok(graph)
}

/// Load node sets from a file with one whitespace-separated set per line.
///
/// Used for both ground-truth communities and seed sets. Blank lines are
/// skipped so an empty set cannot be produced by accident.
pub fn load_node_sets(path: &Path) -> Result<Vec<NodeSet>> {
    let file = File::open(path).with_context(|| format!("opening node set file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut sets = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading node set file {}", path.display()))?;
        let mut set = NodeSet::new();
        for field in line.split_whitespace() {
            let node: u32 = field.parse().with_context(|| {
                format!("{}:{}: invalid node id {field:?}", path.display(), lineno + 1)
            })?;
            set.insert(node);
        }
        if !set.is_empty() {
            sets.push(set);
        }
    }

    log::info!("Loaded {} node sets from {}", sets.len(), path.display());
    Ok(sets)
}
