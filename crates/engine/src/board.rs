//! Board cell addressing and piece/character codecs
//!
//! Small helpers shared by move generation, evaluation and the position
//! string codec: mailbox index math, square naming, and the single-character
//! piece encoding (uppercase white, lowercase black, `.` empty).

use crate::constants::*;
use crate::error::{EngineError, EngineResult};

/// Mailbox cell for file `f` (0 = a) and rank `r` (0 = rank 1)
#[inline]
pub const fn mailbox(file: usize, rank: usize) -> usize {
    (rank + 2) * 10 + file + 1
}

/// File (0-7) of a playable mailbox cell
#[inline]
pub const fn file_of(cell: usize) -> usize {
    cell % 10 - 1
}

/// Rank (0-7) of a playable mailbox cell
#[inline]
pub const fn rank_of(cell: usize) -> usize {
    cell / 10 - 2
}

/// Mailbox cell for a square index 0-63 (a1 = 0, row-major to h8 = 63)
#[inline]
pub const fn mailbox_of_square(square: usize) -> usize {
    mailbox(square % 8, square / 8)
}

/// Square name such as "e2" for a playable mailbox cell
pub fn square_name(cell: usize) -> String {
    let file = (b'a' + file_of(cell) as u8) as char;
    let rank = (b'1' + rank_of(cell) as u8) as char;
    format!("{}{}", file, rank)
}

/// Parse a two-character square name into a mailbox cell
pub fn parse_square(name: &str) -> EngineResult<usize> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidSquare {
            name: name.to_string(),
        });
    }
    let file = bytes[0].wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file > 7 || rank > 7 {
        return Err(EngineError::InvalidSquare {
            name: name.to_string(),
        });
    }
    Ok(mailbox(file as usize, rank as usize))
}

/// One-character encoding of a cell for the 65-character board string
pub fn piece_to_char(piece: i8) -> char {
    let c = match piece.abs() {
        EMPTY => return '.',
        PAWN => 'p',
        KNIGHT => 'n',
        BISHOP => 'b',
        ROOK => 'r',
        QUEEN => 'q',
        KING => 'k',
        _ => return '?',
    };
    if piece > 0 {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

/// Decode one board-string character into a signed piece code
pub fn char_to_piece(c: char) -> EngineResult<i8> {
    let kind = match c.to_ascii_lowercase() {
        '.' => return Ok(EMPTY),
        'p' => PAWN,
        'n' => KNIGHT,
        'b' => BISHOP,
        'r' => ROOK,
        'q' => QUEEN,
        'k' => KING,
        other => {
            return Err(EngineError::InvalidBoardString {
                reason: format!("unexpected cell character '{}'", other),
            })
        }
    };
    Ok(if c.is_ascii_uppercase() { kind } else { -kind })
}

/// Promotion suffix letter for a piece type (always lowercase)
pub fn promotion_letter(kind: i8) -> char {
    match kind {
        KNIGHT => 'n',
        BISHOP => 'b',
        ROOK => 'r',
        _ => 'q',
    }
}

/// Side marker letter for the trailing board-string character
pub fn side_marker(side: Color) -> char {
    if side == WHITE {
        'w'
    } else {
        'b'
    }
}

/// Parse a trailing side marker
pub fn parse_side_marker(c: char) -> EngineResult<Color> {
    match c {
        'w' => Ok(WHITE),
        'b' => Ok(BLACK),
        other => Err(EngineError::InvalidBoardString {
            reason: format!("unexpected side marker '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_corners() {
        assert_eq!(mailbox(0, 0), A1);
        assert_eq!(mailbox(7, 0), H1);
        assert_eq!(mailbox(0, 7), A8);
        assert_eq!(mailbox(7, 7), H8);
    }

    #[test]
    fn square_names_round_trip() {
        for file in 0..8 {
            for rank in 0..8 {
                let cell = mailbox(file, rank);
                assert_eq!(parse_square(&square_name(cell)).unwrap(), cell);
            }
        }
    }

    #[test]
    fn rejects_bad_squares() {
        assert!(parse_square("i1").is_err());
        assert!(parse_square("a9").is_err());
        assert!(parse_square("e").is_err());
    }

    #[test]
    fn piece_chars_round_trip() {
        for piece in [-KING, -PAWN, EMPTY, PAWN, QUEEN, KING] {
            assert_eq!(char_to_piece(piece_to_char(piece)).unwrap(), piece);
        }
        assert!(char_to_piece('x').is_err());
    }
}
