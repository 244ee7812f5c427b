//! Error types for the distributed coordinator and worker plumbing
//!
//! Worker silence, garbage responses and lapsed wait budgets are *not*
//! errors here; they are handled inline by local fallback. Only conditions
//! the caller must act on surface as `ClusterError`.

use engine::EngineError;
use thiserror::Error;

/// Errors surfaced by the cluster crate
#[derive(Error, Debug)]
pub enum ClusterError {
    /// The message bus rejected a publish or subscribe
    #[error("message bus failure on topic {topic}: {reason}")]
    Bus { topic: String, reason: String },

    /// Task payload could not be serialized
    #[error("wire serialization failed: {0}")]
    Wire(#[from] serde_json::Error),

    /// Invalid position material handed to the coordinator or worker
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The root position is terminal; there is nothing to choose
    #[error("no legal move from the root position")]
    NoLegalMove,
}

/// Result type alias for cluster operations
pub type ClusterResult<T> = Result<T, ClusterError>;
