//! Static position evaluation
//!
//! Material balance plus positional terms: threatened pieces count at a
//! discount (a threatened king costs a flat penalty instead), central
//! occupation, the bishop pair, knights stuck on the rim, slider mobility
//! once the opening is over, pawn-structure weaknesses, and retained castling
//! rights while the opponent queen is still around.
//!
//! The accumulation is real-valued and white-positive; the result is flipped
//! for black, scaled by `EVAL_SCALE` and truncated, so everything downstream
//! of the evaluator stays integer-only. The function is pure: it reads the
//! position and mutates nothing.

use crate::board::*;
use crate::constants::*;
use crate::position::Position;

/// Static quality of `position` from the point of view of `side`
pub fn evaluate(position: &Position, side: Color) -> i64 {
    let mut white_score = 0.0_f64;
    let mut bishops = [0usize; 2];
    let mut queen_present = [false; 2];

    for square in 0..64 {
        let cell = mailbox_of_square(square);
        let piece = position.cell(cell);
        if piece == EMPTY {
            continue;
        }
        let color: Color = if piece > 0 { WHITE } else { BLACK };
        let kind = piece.abs();
        let threatened = position.is_attacked(cell, -color);

        let mut term = 0.0;
        if kind == KING {
            // The king carries no material weight; being attacked costs a
            // flat, deliberately small penalty.
            if threatened {
                term -= KING_THREAT_PENALTY;
            }
        } else {
            let weight = PIECE_WEIGHT[kind as usize];
            term += if threatened {
                weight * THREAT_FACTOR
            } else {
                weight
            };
        }

        if CENTER_CELLS.contains(&cell) {
            term += CENTER_BONUS;
        }
        if kind == KNIGHT {
            let file = file_of(cell);
            let rank = rank_of(cell);
            if file == 0 || file == 7 || rank == 0 || rank == 7 {
                term -= KNIGHT_EDGE_PENALTY;
            }
        }
        if matches!(kind, BISHOP | ROOK | QUEEN) && position.ply >= MOBILITY_MIN_PLY {
            term += MOBILITY_BONUS * slider_mobility(position, cell, kind) as f64;
        }

        let color_index = if color == WHITE { 0 } else { 1 };
        if kind == BISHOP {
            bishops[color_index] += 1;
        }
        if kind == QUEEN {
            queen_present[color_index] = true;
        }

        white_score += color as f64 * term;
    }

    if bishops[0] >= 2 {
        white_score += BISHOP_PAIR_BONUS;
    }
    if bishops[1] >= 2 {
        white_score -= BISHOP_PAIR_BONUS;
    }

    white_score += pawn_structure(position, WHITE);
    white_score -= pawn_structure(position, BLACK);

    // Keeping the option to castle matters while the opponent queen can
    // still punish a stuck king.
    if queen_present[1] {
        if position.white_castle_kingside {
            white_score += CASTLING_RIGHT_BONUS;
        }
        if position.white_castle_queenside {
            white_score += CASTLING_RIGHT_BONUS;
        }
    }
    if queen_present[0] {
        if position.black_castle_kingside {
            white_score -= CASTLING_RIGHT_BONUS;
        }
        if position.black_castle_queenside {
            white_score -= CASTLING_RIGHT_BONUS;
        }
    }

    let relative = if side == WHITE {
        white_score
    } else {
        -white_score
    };
    (relative * EVAL_SCALE) as i64
}

/// Count empty cells reachable by a slider along its direction table
fn slider_mobility(position: &Position, cell: usize, kind: i8) -> u32 {
    let directions: &[i8] = match kind {
        BISHOP => &BISHOP_DIRS,
        ROOK => &ROOK_DIRS,
        _ => &ROYAL_DIRS,
    };
    let mut reachable = 0;
    for &delta in directions {
        let step = delta as i32;
        let mut probe = cell as i32 + step;
        while position.cell(probe as usize) == EMPTY {
            reachable += 1;
            probe += step;
        }
    }
    reachable
}

/// Pawn-structure penalties for one color, as a (non-positive) white-agnostic
/// contribution: doubled pawns, isolated pawns, and a most-advanced pawn
/// that outran any possible support from neighboring files.
fn pawn_structure(position: &Position, color: Color) -> f64 {
    let pawn = PAWN * color;
    let mut ranks_per_file: [Vec<usize>; 8] = Default::default();
    for square in 0..64 {
        let cell = mailbox_of_square(square);
        if position.cell(cell) == pawn {
            ranks_per_file[file_of(cell)].push(rank_of(cell));
        }
    }

    let mut score = 0.0;
    for file in 0..8 {
        let ranks = &ranks_per_file[file];
        if ranks.is_empty() {
            continue;
        }
        if ranks.len() > 1 {
            score -= DOUBLED_PAWN_PENALTY * (ranks.len() - 1) as f64;
        }

        let left = file.checked_sub(1).map(|f| &ranks_per_file[f]);
        let right = (file < 7).then(|| &ranks_per_file[file + 1]);
        let has_neighbors = left.map_or(false, |r| !r.is_empty())
            || right.map_or(false, |r| !r.is_empty());
        if !has_neighbors {
            score -= ISOLATED_PAWN_PENALTY * ranks.len() as f64;
            continue;
        }

        // The most advanced pawn of the file, measured in its own direction
        // of travel; penalized when no neighboring pawn can ever defend it.
        let front = if color == WHITE {
            *ranks.iter().max().unwrap_or(&0)
        } else {
            *ranks.iter().min().unwrap_or(&7)
        };
        let supported = |neighbor: Option<&Vec<usize>>| {
            neighbor.map_or(false, |ranks| {
                ranks.iter().any(|&rank| {
                    if color == WHITE {
                        rank + 1 == front || rank == front
                    } else {
                        rank == front + 1 || rank == front
                    }
                })
            })
        };
        if !supported(left) && !supported(right) {
            score -= UNSUPPORTED_ADVANCE_PENALTY;
        }
    }
    score
}
