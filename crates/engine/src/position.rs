//! # Position - Immutable Per-Ply Board Snapshot
//!
//! A `Position` is one snapshot of the game: the padded 120-cell board, the
//! four castling-rights flags, the side to move, a ply counter, terminal
//! flags, and the notation of the move that produced it. Positions never
//! mutate in place; applying a move produces a fully independent child copy,
//! so move generation and evaluation are pure functions and the search needs
//! no locking or undo bookkeeping.
//!
//! ## Piece encoding
//!
//! Cells hold signed 8-bit codes: positive white, negative black, zero empty,
//! `OUT` in the border. Sign comparisons give piece ownership in a single
//! instruction and `abs()` gives the piece type.
//!
//! ## En-passant follow-ups
//!
//! When a double pawn push lands beside an enemy pawn, the resulting child
//! carries the capture-in-passing successor positions with it. The opponent's
//! `next_positions()` then yields them alongside the ordinary moves. The
//! follow-up set is transient bookkeeping and is excluded from equality and
//! hashing.
//!
//! ## Terminal flags
//!
//! `white_lost` / `black_lost` are set exactly when a king is captured during
//! move application. The search treats such positions as mate-band terminals;
//! generation below them is never needed.
//!
//! ## Canonical string
//!
//! `board_string()` encodes 64 cells row-major from a1 to h8 plus a trailing
//! side-to-move marker, 65 characters total. It is the equality key of the
//! distributed protocol and round-trips exactly through
//! `from_board_string()`.

use std::hash::{Hash, Hasher};

use crate::board::*;
use crate::constants::*;
use crate::error::{EngineError, EngineResult};

/// Classification of a position for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// At least one legal move exists
    Ongoing,
    /// No legal move and the king is not attacked (stalemate)
    Draw,
    /// No legal move and the king is attacked
    Mate,
}

/// One immutable snapshot of the board
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) cells: [i8; BOARD_CELLS],
    pub white_castle_kingside: bool,
    pub white_castle_queenside: bool,
    pub black_castle_kingside: bool,
    pub black_castle_queenside: bool,
    pub side_to_move: Color,
    /// Plies elapsed since the game root this position descends from
    pub ply: u32,
    pub white_lost: bool,
    pub black_lost: bool,
    /// Notation of the move that produced this position ("e2e4", "e7e8q");
    /// empty for a root or decoded position
    pub last_move: String,
    pub(crate) en_passant_followups: Vec<Position>,
}

/// True when `piece` is a real piece owned by `side` (sentinel excluded)
#[inline]
pub(crate) fn belongs_to(piece: i8, side: Color) -> bool {
    piece != OUT && piece * side > 0
}

fn empty_cells() -> [i8; BOARD_CELLS] {
    let mut cells = [OUT; BOARD_CELLS];
    for square in 0..64 {
        cells[mailbox_of_square(square)] = EMPTY;
    }
    cells
}

impl Position {
    /// The standard chess starting position, white to move
    pub fn initial() -> Position {
        let mut cells = empty_cells();
        const BACK_RANK: [i8; 8] = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            cells[mailbox(file, 0)] = kind;
            cells[mailbox(file, 7)] = -kind;
            cells[mailbox(file, 1)] = PAWN;
            cells[mailbox(file, 6)] = -PAWN;
        }
        Position {
            cells,
            white_castle_kingside: true,
            white_castle_queenside: true,
            black_castle_kingside: true,
            black_castle_queenside: true,
            side_to_move: WHITE,
            ply: 0,
            white_lost: false,
            black_lost: false,
            last_move: String::new(),
            en_passant_followups: Vec::new(),
        }
    }

    /// Cell content at a mailbox index
    #[inline]
    pub fn cell(&self, cell: usize) -> i8 {
        self.cells[cell]
    }

    /// Mailbox cell of the king of `side`, if exactly present
    pub fn king_cell(&self, side: Color) -> Option<usize> {
        (0..64)
            .map(mailbox_of_square)
            .find(|&cell| self.cells[cell] == KING * side)
    }

    fn king_count(&self, side: Color) -> usize {
        (0..64)
            .map(mailbox_of_square)
            .filter(|&cell| self.cells[cell] == KING * side)
            .count()
    }

    /// True when the king of `side` is missing or attacked by the opponent
    pub fn is_king_attacked(&self, side: Color) -> bool {
        match self.king_cell(side) {
            Some(cell) => self.is_attacked(cell, -side),
            None => true,
        }
    }

    /// Check that the side *not* to move has not left its own king in check,
    /// and that both kings exist exactly once. Pseudo-legal generation defers
    /// this test; it is applied lazily where legality actually matters.
    pub fn is_legal_board(&self) -> bool {
        if self.king_count(WHITE) != 1 || self.king_count(BLACK) != 1 {
            return false;
        }
        let mover = -self.side_to_move;
        match self.king_cell(mover) {
            Some(cell) => !self.is_attacked(cell, self.side_to_move),
            None => false,
        }
    }

    /// Classify the position for the side to move
    pub fn game_state(&self) -> GameState {
        if self.white_lost || self.black_lost {
            return GameState::Mate;
        }
        if self
            .next_positions()
            .iter()
            .any(|successor| successor.is_legal_board())
        {
            return GameState::Ongoing;
        }
        if self.is_king_attacked(self.side_to_move) {
            GameState::Mate
        } else {
            GameState::Draw
        }
    }

    /// Materialize the move named by `notation` against the pseudo-legal
    /// successor set. Rejects unknown notation and moves that expose the
    /// mover's own king.
    pub fn apply(&self, notation: &str) -> EngineResult<Position> {
        for successor in self.next_positions() {
            if successor.last_move == notation {
                if successor.is_legal_board() {
                    return Ok(successor);
                }
                return Err(EngineError::IllegalMove {
                    notation: notation.to_string(),
                });
            }
        }
        Err(EngineError::UnknownMove {
            notation: notation.to_string(),
        })
    }

    /// 65-character canonical encoding: 64 cells a1..h8 plus side marker
    pub fn board_string(&self) -> String {
        let mut encoded = String::with_capacity(65);
        for square in 0..64 {
            encoded.push(piece_to_char(self.cells[mailbox_of_square(square)]));
        }
        encoded.push(side_marker(self.side_to_move));
        encoded
    }

    /// Decode a 65-character board string. Castling rights are granted iff
    /// king and the corresponding rook still stand on their home squares;
    /// a missing king marks that side as lost.
    pub fn from_board_string(encoded: &str) -> EngineResult<Position> {
        let chars: Vec<char> = encoded.chars().collect();
        if chars.len() != 65 {
            return Err(EngineError::InvalidBoardString {
                reason: format!("expected 65 characters, got {}", chars.len()),
            });
        }
        let mut cells = empty_cells();
        for (square, &c) in chars[..64].iter().enumerate() {
            cells[mailbox_of_square(square)] = char_to_piece(c)?;
        }
        let side_to_move = parse_side_marker(chars[64])?;
        let mut position = Position {
            cells,
            white_castle_kingside: false,
            white_castle_queenside: false,
            black_castle_kingside: false,
            black_castle_queenside: false,
            side_to_move,
            ply: 0,
            white_lost: false,
            black_lost: false,
            last_move: String::new(),
            en_passant_followups: Vec::new(),
        };
        position.white_castle_kingside =
            position.cells[E1] == KING && position.cells[H1] == ROOK;
        position.white_castle_queenside =
            position.cells[E1] == KING && position.cells[A1] == ROOK;
        position.black_castle_kingside =
            position.cells[E8] == -KING && position.cells[H8] == -ROOK;
        position.black_castle_queenside =
            position.cells[E8] == -KING && position.cells[A8] == -ROOK;
        position.white_lost = position.king_count(WHITE) == 0;
        position.black_lost = position.king_count(BLACK) == 0;
        Ok(position)
    }

    /// Build the child position for moving `from` -> `to`, with an optional
    /// promotion piece type. Handles capture terminal flags, castling-rights
    /// maintenance and move notation; castling and en-passant specifics are
    /// layered on top by the generator.
    pub(crate) fn child(&self, from: usize, to: usize, promotion: Option<i8>) -> Position {
        let mover = self.cells[from];
        let captured = self.cells[to];

        let mut next = Position {
            cells: self.cells,
            white_castle_kingside: self.white_castle_kingside,
            white_castle_queenside: self.white_castle_queenside,
            black_castle_kingside: self.black_castle_kingside,
            black_castle_queenside: self.black_castle_queenside,
            side_to_move: -self.side_to_move,
            ply: self.ply + 1,
            white_lost: self.white_lost,
            black_lost: self.black_lost,
            last_move: String::new(),
            en_passant_followups: Vec::new(),
        };

        if captured == KING {
            next.white_lost = true;
        } else if captured == -KING {
            next.black_lost = true;
        }

        next.cells[from] = EMPTY;
        next.cells[to] = match promotion {
            Some(kind) => kind * self.side_to_move,
            None => mover,
        };

        if mover == KING {
            next.white_castle_kingside = false;
            next.white_castle_queenside = false;
        } else if mover == -KING {
            next.black_castle_kingside = false;
            next.black_castle_queenside = false;
        }
        // A rook leaving its corner, or the corner being captured into,
        // forfeits the corresponding right.
        for cell in [from, to] {
            match cell {
                A1 => next.white_castle_queenside = false,
                H1 => next.white_castle_kingside = false,
                A8 => next.black_castle_queenside = false,
                H8 => next.black_castle_kingside = false,
                _ => {}
            }
        }

        next.last_move = format!("{}{}", square_name(from), square_name(to));
        if let Some(kind) = promotion {
            next.last_move.push(promotion_letter(kind));
        }
        next
    }
}

// Equality and hashing cover the 64 playable cells plus the side to move:
// the same key the distributed protocol uses. Ply, notation, terminal flags
// and the transient en-passant set are deliberately excluded.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.side_to_move == other.side_to_move
            && (0..64)
                .map(mailbox_of_square)
                .all(|cell| self.cells[cell] == other.cells[cell])
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for square in 0..64 {
            self.cells[mailbox_of_square(square)].hash(state);
        }
        self.side_to_move.hash(state);
    }
}
