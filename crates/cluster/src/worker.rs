//! Worker node: compute until asked
//!
//! A worker subscribes to its own task topic and serves two message kinds.
//! A JSON task starts an iterative deepening search for the task position,
//! maximizing that position's own side to move, on a blocking thread. The
//! literal collect request reads whatever the search has found so far and
//! publishes it as a decimal string on the result topic; if no iteration has
//! finished yet, the static evaluation stands in. Malformed tasks are logged
//! and skipped, never fatal.

use std::sync::{Arc, Mutex};

use engine::{evaluate, IterativeDriver, Position, SearchProgress};
use tracing::{debug, info, warn};

use crate::bus::MessageBus;
use crate::error::ClusterResult;
use crate::wire::{result_topic, task_topic, TaskPayload, WorkerId, COLLECT_REQUEST};

pub struct WorkerNode<B: MessageBus> {
    id: WorkerId,
    bus: B,
    max_depth: u32,
}

/// The search currently running (or finished) on this worker
struct ActiveTask {
    position: Position,
    progress: Arc<Mutex<SearchProgress>>,
}

impl ActiveTask {
    /// Best value so far from the task side's own perspective
    fn current_value(&self) -> i64 {
        let snapshot = self
            .progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if snapshot.best.is_some() || snapshot.completed {
            snapshot.value
        } else {
            evaluate(&self.position, self.position.side_to_move)
        }
    }
}

impl<B: MessageBus> WorkerNode<B> {
    pub fn new(id: WorkerId, bus: B, max_depth: u32) -> Self {
        WorkerNode { id, bus, max_depth }
    }

    /// Serve tasks until the task topic closes.
    pub async fn run(self) -> ClusterResult<()> {
        let mut tasks = self.bus.subscribe(&task_topic(&self.id)).await?;
        info!(worker = %self.id, "worker online");

        let mut active: Option<ActiveTask> = None;
        while let Some(message) = tasks.recv().await {
            if message == COLLECT_REQUEST {
                let reply = match &active {
                    Some(task) => task.current_value(),
                    None => {
                        warn!(worker = %self.id, "collect request before any task");
                        0
                    }
                };
                debug!(worker = %self.id, reply, "answering collect request");
                self.bus
                    .publish(&result_topic(&self.id), reply.to_string())
                    .await?;
                continue;
            }

            match self.start_task(&message) {
                Ok(task) => active = Some(task),
                Err(reason) => {
                    warn!(worker = %self.id, %reason, payload = %message, "dropping malformed task");
                }
            }
        }
        info!(worker = %self.id, "worker shutting down");
        Ok(())
    }

    /// Parse a task payload and kick off its search on a blocking thread.
    fn start_task(&self, message: &str) -> Result<ActiveTask, String> {
        let payload: TaskPayload =
            serde_json::from_str(message).map_err(|e| e.to_string())?;
        let position = Position::from_board_string(&payload.board).map_err(|e| e.to_string())?;

        // Values are reported self-relative; the coordinator reconciles the
        // perspective from the position string's side marker.
        let driver = IterativeDriver::new(position.side_to_move, self.max_depth);
        let progress = driver.progress();
        let search_root = position.clone();
        info!(worker = %self.id, board = %payload.board, "task accepted");
        tokio::task::spawn_blocking(move || driver.run(&search_root));

        Ok(ActiveTask { position, progress })
    }
}
