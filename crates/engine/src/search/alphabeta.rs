//! Alpha-beta search over positions
//!
//! Two mutually recursive procedures, `maximize` and `minimize`, implement
//! fail-hard alpha-beta from a single fixed perspective (the maximizing
//! side). Where recursion stops is not baked in: a [`LeafPolicy`] injected by
//! the caller decides both the leaf test and the leaf value. Local search
//! plugs in a fixed-depth heuristic policy; the distributed coordinator plugs
//! in a result-table lookup with local fallback.
//!
//! Semantics worth calling out:
//! - King-lost terminals return an extreme value offset by depth, so a mate
//!   closer to the root always compares strictly better for the winner.
//! - At the root only, a successor that fails `is_legal_board()` is assigned
//!   the worst possible value instead of being discarded; it can never be
//!   selected, but the move list is never silently shortened.
//! - If every root successor is illegal the root reports mate (king
//!   attacked) or a draw score, and exposes no best position.
//! - All values are integers; the evaluator truncates before returning, so
//!   no floating-point comparison happens inside the search loop.

use crate::constants::*;
use crate::eval::evaluate;
use crate::position::Position;

/// Injected rule deciding where recursion stops and what a stopped branch
/// reports
pub trait LeafPolicy {
    fn is_leaf(&self, position: &Position, depth: u32) -> bool;
    fn leaf_value(&self, position: &Position, depth: u32) -> i64;
}

/// Fixed-depth leaf policy: stop at `max_depth` plies and report the static
/// evaluation from the maximizing side's perspective
pub struct DepthPolicy {
    pub max_depth: u32,
    pub maximizing: Color,
}

impl LeafPolicy for DepthPolicy {
    fn is_leaf(&self, _position: &Position, depth: u32) -> bool {
        depth >= self.max_depth
    }

    fn leaf_value(&self, position: &Position, _depth: u32) -> i64 {
        evaluate(position, self.maximizing)
    }
}

/// Single-invocation alpha-beta driver. Runs strictly single-threaded;
/// any parallelism lives above it.
pub struct AlphaBetaEngine<'a, L: LeafPolicy> {
    maximizing: Color,
    leaf: &'a L,
    root_depth: u32,
    best: Option<Position>,
    nodes: u64,
}

impl<'a, L: LeafPolicy> AlphaBetaEngine<'a, L> {
    pub fn new(maximizing: Color, leaf: &'a L) -> Self {
        AlphaBetaEngine {
            maximizing,
            leaf,
            root_depth: 0,
            best: None,
            nodes: 0,
        }
    }

    /// The root successor chosen by the last `search` call, if any
    pub fn best_position(&self) -> Option<&Position> {
        self.best.as_ref()
    }

    /// Nodes visited by the last `search` call
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search from `root` and return its value for the maximizing side.
    /// The root enters at depth 0 when the maximizing side is to move, at
    /// depth 1 otherwise, keeping depth parity aligned with turn order.
    pub fn search(&mut self, root: &Position) -> i64 {
        self.best = None;
        self.nodes = 0;
        if root.side_to_move == self.maximizing {
            self.root_depth = 0;
            self.maximize(root, 0, -SCORE_INF, SCORE_INF)
        } else {
            self.root_depth = 1;
            self.minimize(root, 1, -SCORE_INF, SCORE_INF)
        }
    }

    /// Mate-band value when a king has already been captured
    fn terminal_value(&self, position: &Position, depth: u32) -> Option<i64> {
        let lost_side = if position.white_lost {
            Some(WHITE)
        } else if position.black_lost {
            Some(BLACK)
        } else {
            None
        };
        lost_side.map(|side| {
            if side == self.maximizing {
                -(MATE_SCORE - depth as i64)
            } else {
                MATE_SCORE - depth as i64
            }
        })
    }

    /// No legal continuation for the side to move: mate if the king is
    /// attacked, draw otherwise. `sign` is +1 when that side is the
    /// maximizing side's opponent (good for the maximizer).
    fn stuck_value(&self, position: &Position, depth: u32, sign: i64) -> i64 {
        if position.is_king_attacked(position.side_to_move) {
            sign * (MATE_SCORE - depth as i64)
        } else {
            DRAW_SCORE
        }
    }

    fn maximize(&mut self, position: &Position, depth: u32, mut alpha: i64, beta: i64) -> i64 {
        self.nodes += 1;
        if let Some(value) = self.terminal_value(position, depth) {
            return value;
        }
        if self.leaf.is_leaf(position, depth) {
            return self.leaf.leaf_value(position, depth);
        }
        let successors = position.next_positions();
        if successors.is_empty() {
            return self.stuck_value(position, depth, -1);
        }

        let at_root = depth == self.root_depth;
        let mut best = -SCORE_INF;
        for successor in &successors {
            let value = if at_root && !successor.is_legal_board() {
                // Worst possible value: kept in the list, never a candidate.
                -SCORE_INF
            } else {
                self.minimize(successor, depth + 1, alpha, beta)
            };
            if value > best {
                best = value;
                if at_root {
                    self.best = Some(successor.clone());
                }
            }
            if best > alpha {
                alpha = best;
            }
            if best >= beta {
                return best;
            }
        }
        if at_root && self.best.is_none() {
            // Every root move exposed the king.
            return self.stuck_value(position, depth, -1);
        }
        best
    }

    fn minimize(&mut self, position: &Position, depth: u32, alpha: i64, mut beta: i64) -> i64 {
        self.nodes += 1;
        if let Some(value) = self.terminal_value(position, depth) {
            return value;
        }
        if self.leaf.is_leaf(position, depth) {
            return self.leaf.leaf_value(position, depth);
        }
        let successors = position.next_positions();
        if successors.is_empty() {
            return self.stuck_value(position, depth, 1);
        }

        let at_root = depth == self.root_depth;
        let mut best = SCORE_INF;
        for successor in &successors {
            let value = if at_root && !successor.is_legal_board() {
                SCORE_INF
            } else {
                self.maximize(successor, depth + 1, alpha, beta)
            };
            if value < best {
                best = value;
                if at_root {
                    self.best = Some(successor.clone());
                }
            }
            if best < beta {
                beta = best;
            }
            if best <= alpha {
                return best;
            }
        }
        if at_root && self.best.is_none() {
            return self.stuck_value(position, depth, 1);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_best(position: &Position, depth: u32) -> (i64, Option<String>) {
        let side = position.side_to_move;
        let policy = DepthPolicy {
            max_depth: depth,
            maximizing: side,
        };
        let mut engine = AlphaBetaEngine::new(side, &policy);
        let value = engine.search(position);
        (
            value,
            engine.best_position().map(|p| p.last_move.clone()),
        )
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let position = Position::initial();
        let (value, best) = search_best(&position, 0);
        assert_eq!(value, evaluate(&position, WHITE));
        assert!(best.is_none());
    }

    #[test]
    fn hanging_queen_gets_captured() {
        // White queen can take an undefended black queen on d5.
        let mut board: Vec<char> = ".".repeat(64).chars().collect();
        board[4] = 'K'; // e1
        board[60] = 'k'; // e8
        board[3] = 'Q'; // d1
        board[35] = 'q'; // d5, undefended
        let encoded: String = board.into_iter().chain(['w']).collect();
        let position = Position::from_board_string(&encoded).unwrap();
        let (_, best) = search_best(&position, 2);
        assert_eq!(best.as_deref(), Some("d1d5"));
    }

    #[test]
    fn stalemate_reports_draw_class_value() {
        // Black to move: king a8, white queen c7 and king c6. No legal move,
        // no check.
        let mut board: Vec<char> = ".".repeat(64).chars().collect();
        board[56] = 'k'; // a8
        board[50] = 'Q'; // c7
        board[42] = 'K'; // c6
        let encoded: String = board.into_iter().chain(['b']).collect();
        let position = Position::from_board_string(&encoded).unwrap();
        assert_eq!(position.game_state(), crate::position::GameState::Draw);

        let (value, best) = search_best(&position, 2);
        assert_eq!(value, DRAW_SCORE);
        assert!(!is_mate_score(value));
        assert!(best.is_none());
    }

    #[test]
    fn checkmate_reports_mate_class_value() {
        // Black to move: king h8 mated by Qg7 supported by Kg6.
        let mut board: Vec<char> = ".".repeat(64).chars().collect();
        board[63] = 'k'; // h8
        board[54] = 'Q'; // g7
        board[46] = 'K'; // g6
        let encoded: String = board.into_iter().chain(['b']).collect();
        let position = Position::from_board_string(&encoded).unwrap();
        assert_eq!(position.game_state(), crate::position::GameState::Mate);

        let (value, best) = search_best(&position, 2);
        assert!(is_mate_score(value));
        assert!(value < 0, "mated side should see a losing value");
        assert!(best.is_none());
    }

    #[test]
    fn shallower_mate_is_preferred() {
        // Mate in one must score strictly better than any deeper line.
        // White: Kg6, Qg7xh8 ideas vs lone black king h8... instead compare
        // raw band values directly.
        assert!(MATE_SCORE - 1 > MATE_SCORE - 3);
        // And through the engine: a mate-in-1 position searched deeply still
        // reports the depth-1 offset.
        let mut board: Vec<char> = ".".repeat(64).chars().collect();
        board[63] = 'k'; // h8
        board[48] = 'Q'; // a7
        board[46] = 'K'; // g6
        let encoded: String = board.into_iter().chain(['w']).collect();
        let position = Position::from_board_string(&encoded).unwrap();
        let (value, best) = search_best(&position, 6);
        assert!(is_mate_score(value) && value > 0);
        let chosen = best.expect("a mating move exists");
        let successor = position.apply(&chosen).unwrap();
        assert_eq!(successor.game_state(), crate::position::GameState::Mate);
    }

    #[test]
    fn root_illegal_moves_are_never_chosen() {
        // White king pinned against a black rook: moving the blocking rook
        // off the file would be pseudo-legal but exposes the king.
        let mut board: Vec<char> = ".".repeat(64).chars().collect();
        board[4] = 'K'; // e1
        board[12] = 'R'; // e2, pinned
        board[60] = 'r'; // e8
        board[63] = 'k'; // h8
        let encoded: String = board.into_iter().chain(['w']).collect();
        let position = Position::from_board_string(&encoded).unwrap();
        let (_, best) = search_best(&position, 2);
        let chosen = best.expect("a legal move exists");
        let successor = position.apply(&chosen);
        assert!(successor.is_ok(), "chosen move {chosen} must be legal");
    }
}
