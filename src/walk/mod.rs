//! Random-walk diffusion and ranking module

pub mod diffusion;
pub mod ranking;

pub use diffusion::{diffuse, DiffusionState, WalkMode};
pub use ranking::{scalar_ranking, vector_ranking, RankedNode, ScoreOrd};
