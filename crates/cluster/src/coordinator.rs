//! Distributed move selection
//!
//! One coordinated round: query the registry, split the root's successors
//! into a working set, dispatch one unit per worker over the bus, compute
//! the leftovers locally, sleep the wait budget, collect whatever values
//! arrived before the deadline into the distribution table, then run a final
//! local alpha-beta pass over the original successor set with a table-lookup
//! leaf policy. Every unit a worker never answered for is recomputed locally
//! by the leaf policy's fallback clause, so partial results are always
//! acceptable and the round returns a concrete move or `NoLegalMove`.
//!
//! Sign rule, applied uniformly: every unit is valued from its own
//! side-to-move's perspective (that is what workers maximize), and the value
//! is negated when that side differs from the side this coordinator
//! maximizes. The trailing marker of the unit's position string carries the
//! side, so normalization needs nothing beyond the wire key. Depth parity
//! follows the same rule: units whose side matches the maximizing side sit
//! one ply deeper in the tree, so mismatched units search one extra ply to
//! land their leaves on the same absolute ply.

use std::collections::HashSet;
use std::time::Duration;

use engine::{evaluate, AlphaBetaEngine, Color, DepthPolicy, LeafPolicy, Position};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::bus::MessageBus;
use crate::error::{ClusterError, ClusterResult};
use crate::registry::WorkerRegistry;
use crate::split::split_working_set;
use crate::table::DistributionTable;
use crate::wire::{
    normalize_value, parse_result, result_topic, side_of_key, task_topic, TaskPayload,
    COLLECT_REQUEST,
};

/// Hard stop for the final pass; lines always hit a working-set key within
/// two plies, so this only matters if a key set is somehow inconsistent.
const FINAL_PASS_DEPTH_CAP: u32 = 8;

/// Tunables for one coordinated round
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// How long dispatched workers get to make progress before collection
    pub wait_budget: Duration,
    /// Deadline for the collect fan-in after the wait budget lapses
    pub collect_timeout: Duration,
    /// Depth of the synchronous search for units no worker covers
    pub local_depth: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig {
            wait_budget: Duration::from_millis(1500),
            collect_timeout: Duration::from_millis(750),
            local_depth: 0,
        }
    }
}

/// Coordinates a pool of workers through the registry and bus
pub struct DistributedCoordinator<R, B> {
    registry: R,
    bus: B,
    config: CoordinatorConfig,
}

/// Synchronous value of one unit, normalized to `maximizing`'s perspective
fn local_unit_value(unit: &Position, maximizing: Color, depth: u32) -> i64 {
    let side = unit.side_to_move;
    let target = if side == maximizing { depth } else { depth + 1 };
    let policy = DepthPolicy {
        max_depth: target,
        maximizing: side,
    };
    let mut engine = AlphaBetaEngine::new(side, &policy);
    let value = engine.search(unit);
    normalize_value(value, side, maximizing)
}

/// Leaf policy for the final pass: stop at any previously-dispatched unit
/// and report its collected value, or recompute it locally when the worker
/// never answered
struct TableLookupPolicy<'a> {
    maximizing: Color,
    unit_keys: &'a HashSet<String>,
    table: &'a DistributionTable,
    fallback_depth: u32,
}

impl LeafPolicy for TableLookupPolicy<'_> {
    fn is_leaf(&self, position: &Position, depth: u32) -> bool {
        // The root itself can share a board string with a deeply-expanded
        // unit; it must still be searched, not valued as a leaf.
        depth >= FINAL_PASS_DEPTH_CAP
            || (depth > 0 && self.unit_keys.contains(&position.board_string()))
    }

    fn leaf_value(&self, position: &Position, _depth: u32) -> i64 {
        let key = position.board_string();
        if let Some(value) = self.table.get(&key) {
            return value;
        }
        if self.unit_keys.contains(&key) {
            debug!(%key, "unit absent from table, recomputing locally");
            return local_unit_value(position, self.maximizing, self.fallback_depth);
        }
        evaluate(position, self.maximizing)
    }
}

impl<R: WorkerRegistry, B: MessageBus> DistributedCoordinator<R, B> {
    pub fn new(registry: R, bus: B, config: CoordinatorConfig) -> Self {
        DistributedCoordinator {
            registry,
            bus,
            config,
        }
    }

    /// Run one coordinated round from `root` and return the chosen successor
    /// for the side to move.
    pub async fn choose_move(&self, root: &Position) -> ClusterResult<Position> {
        let maximizing = root.side_to_move;
        let successors = root.next_positions();
        if successors.is_empty() {
            return Err(ClusterError::NoLegalMove);
        }

        let workers = self.registry.list_available_workers().await;
        let units = split_working_set(successors, workers.len());
        let unit_keys: HashSet<String> = units.iter().map(|u| u.board_string()).collect();
        info!(
            workers = workers.len(),
            units = units.len(),
            "coordinated round starting"
        );

        let mut table = DistributionTable::new();
        let dispatched = self.dispatch(&units, &workers, maximizing).await?;
        let in_flight = dispatched.len();

        // Units no worker could take are searched right here.
        for unit in units.iter().skip(in_flight) {
            table.insert(
                unit.board_string(),
                local_unit_value(unit, maximizing, self.config.local_depth),
            );
        }

        if in_flight > 0 {
            tokio::time::sleep(self.config.wait_budget).await;
            self.collect(dispatched, maximizing, &mut table).await?;
        }
        debug!(collected = table.len(), "collection phase done");

        let policy = TableLookupPolicy {
            maximizing,
            unit_keys: &unit_keys,
            table: &table,
            fallback_depth: self.config.local_depth,
        };
        let mut engine = AlphaBetaEngine::new(maximizing, &policy);
        let value = engine.search(root);
        let chosen = engine
            .best_position()
            .cloned()
            .ok_or(ClusterError::NoLegalMove)?;
        info!(value, best = %chosen.last_move, "coordinated round finished");
        Ok(chosen)
    }

    /// Publish one unit per worker; returns the (worker, unit key, result
    /// receiver) triples actually dispatched. Result topics are subscribed
    /// before the task goes out so no reply can be missed.
    async fn dispatch(
        &self,
        units: &[Position],
        workers: &[String],
        maximizing: Color,
    ) -> ClusterResult<Vec<Dispatched>> {
        let mut dispatched = Vec::new();
        for (unit, worker) in units.iter().zip(workers.iter()) {
            let key = unit.board_string();
            let payload = serde_json::to_string(&TaskPayload::new(key.clone(), maximizing))?;
            let results = self.bus.subscribe(&result_topic(worker)).await?;
            self.bus.publish(&task_topic(worker), payload).await?;
            debug!(worker = %worker, %key, "unit dispatched");
            dispatched.push(Dispatched {
                worker: worker.clone(),
                key,
                results,
            });
        }
        Ok(dispatched)
    }

    /// Ask every dispatched worker for its current best value and fan the
    /// replies into the table until all units signal or the deadline lapses.
    /// Each per-unit reader carries the same deadline, so a silent worker
    /// cannot leave a blocked task behind after the round.
    async fn collect(
        &self,
        dispatched: Vec<Dispatched>,
        maximizing: Color,
        table: &mut DistributionTable,
    ) -> ClusterResult<()> {
        let (ready, mut replies) = mpsc::unbounded_channel();
        let deadline = self.config.collect_timeout;
        for unit in dispatched {
            self.bus
                .publish(&task_topic(&unit.worker), COLLECT_REQUEST.to_string())
                .await?;
            let ready = ready.clone();
            let Dispatched {
                worker,
                key,
                mut results,
            } = unit;
            tokio::spawn(async move {
                if let Ok(Some(raw)) = timeout(deadline, results.recv()).await {
                    let _ = ready.send((worker, key, raw));
                }
            });
        }
        drop(ready);

        let drain = async {
            while let Some((worker, key, raw)) = replies.recv().await {
                if let Some(value) = parse_result(&worker, &raw) {
                    let normalized = normalize_value(value, side_of_key(&key), maximizing);
                    table.insert(key, normalized);
                }
            }
        };
        if timeout(self.config.collect_timeout, drain).await.is_err() {
            warn!("collect deadline lapsed, proceeding with partial results");
        }
        Ok(())
    }
}

/// One unit in flight on a worker
struct Dispatched {
    worker: String,
    key: String,
    results: mpsc::UnboundedReceiver<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_local_units_use_static_evaluation_depths() {
        // Out of the box: matched side at depth 0 (plain static evaluation),
        // mismatched side one ply deeper and negated.
        assert_eq!(CoordinatorConfig::default().local_depth, 0);

        let child = Position::initial().apply("e2e4").unwrap();
        assert_eq!(
            local_unit_value(&child, engine::BLACK, 0),
            evaluate(&child, engine::BLACK)
        );

        // Mismatched side: one ply of the unit side's own replies, negated.
        let expected = -child
            .next_positions()
            .iter()
            .map(|reply| evaluate(reply, engine::BLACK))
            .max()
            .unwrap();
        assert_eq!(local_unit_value(&child, engine::WHITE, 0), expected);
    }

    #[test]
    fn final_pass_searches_a_root_whose_key_is_a_unit() {
        // A deep split can hand back a unit with the root's own board string;
        // the root must never be treated as a leaf.
        let root = Position::initial();
        let mut unit_keys: HashSet<String> = root
            .next_positions()
            .iter()
            .map(|p| p.board_string())
            .collect();
        unit_keys.insert(root.board_string());

        let table = DistributionTable::new();
        let policy = TableLookupPolicy {
            maximizing: root.side_to_move,
            unit_keys: &unit_keys,
            table: &table,
            fallback_depth: 0,
        };
        let mut engine = AlphaBetaEngine::new(root.side_to_move, &policy);
        engine.search(&root);
        assert!(engine.best_position().is_some());
    }
}
