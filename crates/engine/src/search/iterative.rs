//! Iterative deepening driver
//!
//! Repeats fixed-depth alpha-beta searches at increasing depth, stepping by
//! two plies so the reported value keeps the same side-to-move parity. Every
//! iteration publishes elapsed wall-clock time, reached depth, value and best
//! successor into a shared snapshot that any thread may read at any moment,
//! making this an anytime search. The distributed worker relies on that: it
//! computes until asked and hands over whatever the latest iteration found.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::info;

use crate::constants::*;
use crate::position::Position;
use crate::search::alphabeta::{AlphaBetaEngine, DepthPolicy};

/// Latest state of a running (or finished) iterative search
#[derive(Debug, Clone, Default)]
pub struct SearchProgress {
    pub depth: u32,
    pub value: i64,
    pub best: Option<Position>,
    pub elapsed: Duration,
    pub completed: bool,
}

/// Anytime deepening search for one maximizing side
pub struct IterativeDriver {
    maximizing: Color,
    max_depth: u32,
    progress: Arc<Mutex<SearchProgress>>,
}

impl IterativeDriver {
    pub fn new(maximizing: Color, max_depth: u32) -> Self {
        IterativeDriver {
            maximizing,
            max_depth,
            progress: Arc::new(Mutex::new(SearchProgress::default())),
        }
    }

    /// Shared handle onto the progress snapshot; clones are cheap and stay
    /// valid after the driver is dropped
    pub fn progress(&self) -> Arc<Mutex<SearchProgress>> {
        Arc::clone(&self.progress)
    }

    /// Read the latest snapshot without waiting for the loop to finish
    pub fn latest(&self) -> SearchProgress {
        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Run the deepening loop to `max_depth`. Starts at depth 0 when the
    /// root's side to move is the maximized side, at 1 otherwise, and stops
    /// early once a forced mate is proven.
    pub fn run(&self, root: &Position) {
        let start = Instant::now();
        let mut depth = if root.side_to_move == self.maximizing {
            0
        } else {
            1
        };

        while depth <= self.max_depth {
            let policy = DepthPolicy {
                max_depth: depth,
                maximizing: self.maximizing,
            };
            let mut engine = AlphaBetaEngine::new(self.maximizing, &policy);
            let value = engine.search(root);
            let elapsed = start.elapsed();
            let best = engine.best_position().cloned();

            info!(
                depth,
                value,
                nodes = engine.nodes(),
                elapsed_ms = elapsed.as_millis() as u64,
                best = best
                    .as_ref()
                    .map(|p| p.last_move.as_str())
                    .unwrap_or("-"),
                "search iteration complete"
            );

            {
                let mut slot = self
                    .progress
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                slot.depth = depth;
                slot.value = value;
                slot.best = best;
                slot.elapsed = elapsed;
            }

            if is_mate_score(value) {
                break;
            }
            depth += 2;
        }

        self.progress
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_reports_progress_and_completes() {
        let root = Position::initial();
        let driver = IterativeDriver::new(WHITE, 2);
        driver.run(&root);

        let snapshot = driver.latest();
        assert!(snapshot.completed);
        assert_eq!(snapshot.depth, 2);
        assert!(snapshot.best.is_some(), "depth 2 must produce a move");
    }

    #[test]
    fn driver_starts_at_depth_one_for_the_other_side() {
        // Black to move, white maximized: iterations run at odd depths.
        let root = Position::initial().apply("e2e4").unwrap();
        let driver = IterativeDriver::new(WHITE, 3);
        driver.run(&root);
        assert_eq!(driver.latest().depth, 3);
    }

    #[test]
    fn snapshot_readable_from_another_handle_mid_run() {
        let root = Position::initial();
        let driver = IterativeDriver::new(WHITE, 2);
        let handle = driver.progress();
        driver.run(&root);
        let snapshot = handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        assert!(snapshot.completed);
    }

    #[test]
    fn mate_stops_the_deepening_loop() {
        // White mates in one; the loop must not grind to max depth.
        let mut board: Vec<char> = ".".repeat(64).chars().collect();
        board[63] = 'k';
        board[48] = 'Q';
        board[46] = 'K';
        let encoded: String = board.into_iter().chain(['w']).collect();
        let root = Position::from_board_string(&encoded).unwrap();
        let driver = IterativeDriver::new(WHITE, 40);
        driver.run(&root);
        let snapshot = driver.latest();
        assert!(is_mate_score(snapshot.value));
        assert!(snapshot.depth < 40);
    }
}
