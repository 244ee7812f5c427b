//! Working-set split for worker dispatch
//!
//! The root's immediate successors rarely match the worker count, so the
//! split loop grows the set by replacing one unit with its own successors,
//! one level deeper, going around the set circularly until the size would
//! reach the target or nothing expands any further. The unit count is
//! monotonically non-decreasing and never ends below the original branching
//! factor; it may legitimately end below the target for thin trees.

use std::collections::{HashSet, VecDeque};

use engine::Position;
use tracing::debug;

/// Expand `successors` toward at least `target` units.
///
/// A target of zero (no workers) returns the successors untouched. Units
/// whose game is already decided, or whose expansion yields nothing new,
/// are rotated to the back and kept as-is; the loop stops once every
/// remaining unit has refused to expand.
pub fn split_working_set(successors: Vec<Position>, target: usize) -> Vec<Position> {
    let mut units: VecDeque<Position> = successors.into();
    if target == 0 {
        return units.into();
    }

    let mut refused = 0;
    while units.len() < target && refused < units.len() {
        let unit = match units.pop_front() {
            Some(unit) => unit,
            None => break,
        };
        if unit.white_lost || unit.black_lost {
            units.push_back(unit);
            refused += 1;
            continue;
        }

        let known: HashSet<String> = units.iter().map(|u| u.board_string()).collect();
        let mut fresh = Vec::new();
        let mut fresh_keys = HashSet::new();
        for child in unit.next_positions() {
            let key = child.board_string();
            if !known.contains(&key) && fresh_keys.insert(key) {
                fresh.push(child);
            }
        }

        if fresh.is_empty() {
            units.push_back(unit);
            refused += 1;
        } else {
            units.extend(fresh);
            refused = 0;
        }
    }

    debug!(units = units.len(), target, "working set split");
    units.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_target_leaves_the_set_alone() {
        let successors = Position::initial().next_positions();
        let units = split_working_set(successors.clone(), 0);
        assert_eq!(units.len(), successors.len());
        assert_eq!(units[0].board_string(), successors[0].board_string());
    }

    #[test]
    fn small_targets_need_no_expansion() {
        let successors = Position::initial().next_positions();
        assert_eq!(split_working_set(successors, 20).len(), 20);
    }

    #[test]
    fn expansion_grows_monotonically_past_the_branching_factor() {
        let successors = Position::initial().next_positions();
        let original = successors.len();
        let units = split_working_set(successors, 64);
        // One expansion step replaces a unit with its ~20 children.
        assert!(units.len() >= original);
        assert!(units.len() >= 64 || units.len() > original);
    }

    #[test]
    fn expanded_units_carry_no_duplicate_keys() {
        let successors = Position::initial().next_positions();
        let units = split_working_set(successors, 100);
        let keys: HashSet<String> = units.iter().map(|u| u.board_string()).collect();
        assert_eq!(keys.len(), units.len());
    }
}
