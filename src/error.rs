//! Error types for the community detection core.

/// Errors surfaced by the library before or during a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A seed set was empty; the diffusion divides by the seed count.
    #[error("empty seed set")]
    EmptySeedSet,

    /// A seed or ground-truth node id exceeds the graph's max node id.
    #[error("node {node} exceeds max node id {max}")]
    NodeOutOfRange { node: u32, max: u32 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The clustering capability returned a label list that does not match
    /// the embedding matrix.
    #[error("clustering returned {got} labels for {expected} embedded nodes")]
    ClusterLabelMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
