//! Input loading module

pub mod edgelist;

pub use edgelist::{load_edge_list, load_node_sets, GroundTruth};
