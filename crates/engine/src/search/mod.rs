//! Search: alpha-beta core and the iterative deepening driver

pub mod alphabeta;
pub mod iterative;

pub use alphabeta::{AlphaBetaEngine, DepthPolicy, LeafPolicy};
pub use iterative::{IterativeDriver, SearchProgress};
