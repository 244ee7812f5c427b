//! Pseudo-legal move generation
//!
//! `next_positions()` enumerates every pseudo-legal successor of a position:
//! piece moves, pawn pushes and captures (each promotion choice yields its
//! own successor), the stored en-passant follow-ups, and castling. Moves that
//! leave the mover's own king in check are *not* filtered here; legality is
//! checked lazily with `is_legal_board()` only where it matters. That keeps
//! the generator on the hot path branch-light.

use crate::board::*;
use crate::constants::*;
use crate::position::{belongs_to, Position};

impl Position {
    /// Every pseudo-legal successor for the side to move
    pub fn next_positions(&self) -> Vec<Position> {
        let mut successors = Vec::with_capacity(40);
        let side = self.side_to_move;
        for square in 0..64 {
            let from = mailbox_of_square(square);
            let piece = self.cells[from];
            if !belongs_to(piece, side) {
                continue;
            }
            match piece.abs() {
                PAWN => self.generate_pawn(from, &mut successors),
                KNIGHT => self.generate_steps(from, &KNIGHT_JUMPS, &mut successors),
                KING => self.generate_steps(from, &ROYAL_DIRS, &mut successors),
                BISHOP => self.generate_slides(from, &BISHOP_DIRS, &mut successors),
                ROOK => self.generate_slides(from, &ROOK_DIRS, &mut successors),
                QUEEN => self.generate_slides(from, &ROYAL_DIRS, &mut successors),
                _ => {}
            }
        }
        self.generate_castling(&mut successors);
        successors.extend(self.en_passant_followups.iter().cloned());
        successors
    }

    /// Single-step movers: knights and the king
    fn generate_steps(&self, from: usize, deltas: &[i8], out: &mut Vec<Position>) {
        for &delta in deltas {
            let to = (from as i32 + delta as i32) as usize;
            let target = self.cells[to];
            if target == OUT || belongs_to(target, self.side_to_move) {
                continue;
            }
            out.push(self.child(from, to, None));
        }
    }

    /// Sliding movers: bishop, rook, queen
    fn generate_slides(&self, from: usize, deltas: &[i8], out: &mut Vec<Position>) {
        for &delta in deltas {
            let step = delta as i32;
            let mut to = from as i32 + step;
            loop {
                let target = self.cells[to as usize];
                if target == EMPTY {
                    out.push(self.child(from, to as usize, None));
                    to += step;
                    continue;
                }
                if belongs_to(target, -self.side_to_move) {
                    out.push(self.child(from, to as usize, None));
                }
                break;
            }
        }
    }

    fn generate_pawn(&self, from: usize, out: &mut Vec<Position>) {
        let side = self.side_to_move;
        let forward = if side == WHITE { NORTH } else { SOUTH } as i32;
        let start_rank = if side == WHITE { 1 } else { 6 };
        let promotion_rank = if side == WHITE { 7 } else { 0 };

        let one = (from as i32 + forward) as usize;
        if self.cells[one] == EMPTY {
            self.push_pawn_move(from, one, promotion_rank, out);
            if rank_of(from) == start_rank {
                let two = (one as i32 + forward) as usize;
                if self.cells[two] == EMPTY {
                    out.push(self.double_push_child(from, two, one));
                }
            }
        }
        for capture_delta in [forward - 1, forward + 1] {
            let to = (from as i32 + capture_delta) as usize;
            let target = self.cells[to];
            if target != OUT && belongs_to(target, -side) {
                self.push_pawn_move(from, to, promotion_rank, out);
            }
        }
    }

    /// A pawn arriving on the last rank fans out into the four promotion
    /// choices; anywhere else it is a single successor.
    fn push_pawn_move(
        &self,
        from: usize,
        to: usize,
        promotion_rank: usize,
        out: &mut Vec<Position>,
    ) {
        if rank_of(to) == promotion_rank {
            for kind in [KNIGHT, BISHOP, ROOK, QUEEN] {
                out.push(self.child(from, to, Some(kind)));
            }
        } else {
            out.push(self.child(from, to, None));
        }
    }

    /// Double pawn push; seeds the child's en-passant follow-up set with the
    /// capture-in-passing successors for each adjacent enemy pawn.
    fn double_push_child(&self, from: usize, to: usize, passed: usize) -> Position {
        let mut child = self.child(from, to, None);
        let capturer_pawn = PAWN * child.side_to_move;
        for neighbor in [to - 1, to + 1] {
            if child.cells[neighbor] != capturer_pawn {
                continue;
            }
            let mut followup = child.child(neighbor, passed, None);
            // The pawn that just double-pushed is captured in passing.
            followup.cells[to] = EMPTY;
            child.en_passant_followups.push(followup);
        }
        child
    }

    /// Castling both sides: rights intact, pieces on their home squares, the
    /// intervening squares empty, and neither the king's square nor any
    /// square it transits or lands on attacked by the opponent.
    fn generate_castling(&self, out: &mut Vec<Position>) {
        let side = self.side_to_move;
        let enemy = -side;
        if side == WHITE {
            if self.white_castle_kingside
                && self.cells[E1] == KING
                && self.cells[H1] == ROOK
                && self.cells[26] == EMPTY
                && self.cells[27] == EMPTY
                && !self.is_attacked(E1, enemy)
                && !self.is_attacked(26, enemy)
                && !self.is_attacked(27, enemy)
            {
                out.push(self.castle_child(E1, 27, H1, 26));
            }
            if self.white_castle_queenside
                && self.cells[E1] == KING
                && self.cells[A1] == ROOK
                && self.cells[22] == EMPTY
                && self.cells[23] == EMPTY
                && self.cells[24] == EMPTY
                && !self.is_attacked(E1, enemy)
                && !self.is_attacked(24, enemy)
                && !self.is_attacked(23, enemy)
            {
                out.push(self.castle_child(E1, 23, A1, 24));
            }
        } else {
            if self.black_castle_kingside
                && self.cells[E8] == -KING
                && self.cells[H8] == -ROOK
                && self.cells[96] == EMPTY
                && self.cells[97] == EMPTY
                && !self.is_attacked(E8, enemy)
                && !self.is_attacked(96, enemy)
                && !self.is_attacked(97, enemy)
            {
                out.push(self.castle_child(E8, 97, H8, 96));
            }
            if self.black_castle_queenside
                && self.cells[E8] == -KING
                && self.cells[A8] == -ROOK
                && self.cells[92] == EMPTY
                && self.cells[93] == EMPTY
                && self.cells[94] == EMPTY
                && !self.is_attacked(E8, enemy)
                && !self.is_attacked(94, enemy)
                && !self.is_attacked(93, enemy)
            {
                out.push(self.castle_child(E8, 93, A8, 94));
            }
        }
    }

    fn castle_child(
        &self,
        king_from: usize,
        king_to: usize,
        rook_from: usize,
        rook_to: usize,
    ) -> Position {
        let mut child = self.child(king_from, king_to, None);
        child.cells[rook_from] = EMPTY;
        child.cells[rook_to] = ROOK * self.side_to_move;
        child
    }
}
