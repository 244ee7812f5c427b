//! Wire formats and topic naming for the single-shot task protocol
//!
//! One coordinator round exchanges exactly two message kinds per worker:
//! a JSON task object `{"board": <65-char position>, "maximizing": "w"|"b"}`
//! published on the worker's task topic, later followed by the literal
//! collect request; the worker answers with a plain signed-integer string on
//! its result topic. Topics are namespaced by worker identifier.

use engine::{Color, WHITE};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identifier of a worker as reported by the registry
pub type WorkerId = String;

/// Control message asking a worker for its current best value
pub const COLLECT_REQUEST: &str = "collect";

/// Task delivery topic for one worker
pub fn task_topic(worker: &WorkerId) -> String {
    format!("swarm.task.{worker}")
}

/// Result delivery topic for one worker
pub fn result_topic(worker: &WorkerId) -> String {
    format!("swarm.result.{worker}")
}

/// One unit of work: a position to search and the side the requesting
/// coordinator is maximizing for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskPayload {
    /// 65-character standard position string (64 cells + side marker)
    pub board: String,
    /// Side marker of the coordinator's maximizing side, 'w' or 'b'
    pub maximizing: char,
}

impl TaskPayload {
    pub fn new(board: String, maximizing: Color) -> Self {
        TaskPayload {
            board,
            maximizing: if maximizing == WHITE { 'w' } else { 'b' },
        }
    }
}

/// Side to move encoded in the trailing marker of a 65-char board string.
/// Defaults to white on malformed input; callers validate separately.
pub fn side_of_key(key: &str) -> Color {
    match key.chars().last() {
        Some('b') => engine::BLACK,
        _ => WHITE,
    }
}

/// Normalize a value computed from `unit_side`'s perspective into the
/// coordinator's `maximizing` perspective. The single sign rule of the
/// protocol: self-relative values pass through, opponent-relative values
/// are negated.
pub fn normalize_value(value: i64, unit_side: Color, maximizing: Color) -> i64 {
    if unit_side == maximizing {
        value
    } else {
        -value
    }
}

/// Parse a worker result payload: a plain signed-integer string.
/// Malformed responses are logged and reported as absent.
pub fn parse_result(worker: &WorkerId, raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(worker = %worker, payload = %raw, "unparseable worker result, treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Position, BLACK};

    #[test]
    fn task_payload_round_trips_as_json() {
        let payload = TaskPayload::new(Position::initial().board_string(), WHITE);
        let json = serde_json::to_string(&payload).unwrap();
        let back: TaskPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.maximizing, 'w');
    }

    #[test]
    fn side_marker_drives_normalization() {
        let key = Position::initial().board_string();
        assert_eq!(side_of_key(&key), WHITE);
        assert_eq!(normalize_value(42, side_of_key(&key), WHITE), 42);
        assert_eq!(normalize_value(42, side_of_key(&key), BLACK), -42);
    }

    #[test]
    fn garbage_results_are_absent() {
        let worker = "w-0".to_string();
        assert_eq!(parse_result(&worker, " -1250 "), Some(-1250));
        assert_eq!(parse_result(&worker, "not-a-number"), None);
        assert_eq!(parse_result(&worker, ""), None);
    }

    #[test]
    fn topics_are_namespaced_per_worker() {
        let worker = "w-7".to_string();
        assert_eq!(task_topic(&worker), "swarm.task.w-7");
        assert_eq!(result_topic(&worker), "swarm.result.w-7");
        assert_ne!(task_topic(&worker), result_topic(&worker));
    }
}
