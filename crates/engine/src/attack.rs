//! Attack queries
//!
//! The performance-critical inner loop of the engine: from the *target* cell,
//! scan outward along each piece's direction table until a piece or the
//! sentinel border stops the ray. Cost is O(directions x board span) per
//! query with no bounds checks, courtesy of the padded mailbox layout.

use crate::constants::*;
use crate::position::Position;

impl Position {
    /// Is `cell` attacked by any piece of `by`?
    pub fn is_attacked(&self, cell: usize, by: Color) -> bool {
        let cell = cell as i32;

        // Pawns attack diagonally forward, so the attacker sits one
        // diagonal step behind the target from its own point of view.
        let pawn_sources: [i32; 2] = if by == WHITE { [-9, -11] } else { [9, 11] };
        for delta in pawn_sources {
            if self.cells[(cell + delta) as usize] == PAWN * by {
                return true;
            }
        }

        for &delta in &KNIGHT_JUMPS {
            if self.cells[(cell + delta as i32) as usize] == KNIGHT * by {
                return true;
            }
        }

        for &delta in &ROYAL_DIRS {
            if self.cells[(cell + delta as i32) as usize] == KING * by {
                return true;
            }
        }

        self.ray_hits(cell, &ROOK_DIRS, ROOK * by, QUEEN * by)
            || self.ray_hits(cell, &BISHOP_DIRS, BISHOP * by, QUEEN * by)
    }

    /// Walk each ray from `cell` until a blocker; true when the blocker is
    /// one of the two attacker codes.
    fn ray_hits(&self, cell: i32, directions: &[i8], slider: i8, queen: i8) -> bool {
        for &delta in directions {
            let step = delta as i32;
            let mut probe = cell + step;
            loop {
                let found = self.cells[probe as usize];
                if found == EMPTY {
                    probe += step;
                    continue;
                }
                if found == slider || found == queen {
                    return true;
                }
                break;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::parse_square;

    #[test]
    fn initial_position_attack_map() {
        let position = Position::initial();
        // e3 is covered by white pawns d2/f2; f6 by black pawns and the g8 knight.
        assert!(position.is_attacked(parse_square("e3").unwrap(), WHITE));
        assert!(position.is_attacked(parse_square("f6").unwrap(), BLACK));
        // No black piece reaches into white's half at the start.
        assert!(!position.is_attacked(parse_square("e4").unwrap(), BLACK));
    }

    #[test]
    fn sliding_attacks_stop_at_blockers() {
        // The a1 rook is blocked by its own a2 pawn, so a4 is not covered.
        let position = Position::initial();
        assert!(!position.is_attacked(parse_square("a4").unwrap(), WHITE));
        // With the a2 pawn gone the file opens up.
        let mut encoded = position.board_string();
        encoded.replace_range(8..9, "."); // a2 is square index 8
        let open = Position::from_board_string(&encoded).unwrap();
        assert!(open.is_attacked(parse_square("a4").unwrap(), WHITE));
    }

    #[test]
    fn knight_attacks_jump_over_pieces() {
        let position = Position::initial();
        // g1 knight attacks f3 and h3 despite the pawn wall.
        assert!(position.is_attacked(parse_square("f3").unwrap(), WHITE));
        assert!(position.is_attacked(parse_square("h3").unwrap(), WHITE));
    }
}
