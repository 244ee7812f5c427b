//! # swarmchess cluster
//!
//! Distributed move selection on top of the `swarmchess-engine` crate: a
//! coordinator splits the root's successors across a pool of workers reached
//! through a message bus, waits out a bounded budget, folds whatever values
//! came back into a distribution table and finishes with a local alpha-beta
//! pass whose leaves read that table. Workers run anytime iterative searches
//! and answer collect requests with their latest value. Everything degrades
//! to local computation: no workers, silent workers and garbage replies all
//! still produce a move.

pub mod bus;
pub mod coordinator;
pub mod error;
pub mod registry;
pub mod split;
pub mod table;
pub mod wire;
pub mod worker;

pub use bus::{InMemoryBus, MessageBus};
pub use coordinator::{CoordinatorConfig, DistributedCoordinator};
pub use error::{ClusterError, ClusterResult};
pub use registry::{StaticRegistry, WorkerRegistry};
pub use table::DistributionTable;
pub use wire::{TaskPayload, WorkerId};
pub use worker::WorkerNode;
