//! # swarmchess engine
//!
//! Chess position model, pseudo-legal move generation, static evaluation and
//! alpha-beta search with pluggable leaf strategies. This crate is fully
//! synchronous; the distributed fan-out lives in `swarmchess-cluster` and
//! only ever calls in through [`Position`], [`AlphaBetaEngine`] and
//! [`IterativeDriver`].
//!
//! The board model is a padded 120-cell mailbox with copy-on-write
//! positions: applying a move yields an independent child snapshot, so
//! generation and evaluation are pure and the search needs no undo logic.

pub mod board;
pub mod constants;
pub mod error;
pub mod eval;
pub mod position;
pub mod search;

mod attack;
mod movegen;

pub use constants::{is_mate_score, Color, BLACK, DRAW_SCORE, MATE_SCORE, SCORE_INF, WHITE};
pub use error::{EngineError, EngineResult};
pub use eval::evaluate;
pub use position::{GameState, Position};
pub use search::{AlphaBetaEngine, DepthPolicy, IterativeDriver, LeafPolicy, SearchProgress};
