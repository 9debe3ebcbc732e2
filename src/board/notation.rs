//! Textual coordinates ("H8" = column H, row 8)
//!
//! Column is a letter A-O, row is 1-based with no leading zero. Input is
//! case-insensitive; output is always uppercase.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::board::Board;
use super::{Pos, BOARD_SIZE};
use crate::error::{GameError, IllegalReason};

static COORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-o])(\d{1,2})$").expect("COORD_RE regex should be valid"));

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_bounds() {
            return write!(f, "({}, {})", self.row, self.col);
        }
        write!(f, "{}{}", (b'A' + self.col) as char, self.row as u32 + 1)
    }
}

impl FromStr for Pos {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let malformed = || GameError::MalformedCoordinate(trimmed.to_string());

        let caps = COORD_RE.captures(trimmed).ok_or_else(malformed)?;
        let col = caps[1].to_ascii_uppercase().as_bytes()[0] - b'A';
        let row: usize = caps[2].parse().map_err(|_| malformed())?;
        if row == 0 || row > BOARD_SIZE {
            return Err(malformed());
        }

        Ok(Pos::new((row - 1) as u8, col))
    }
}

/// What a line of user input asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Play(Pos),
    Quit,
}

/// Parse raw user input against the current board.
///
/// Accepts `quit` or a coordinate naming an empty cell.
pub fn validate_input(raw: &str, board: &Board) -> Result<InputCommand, GameError> {
    if raw.trim().eq_ignore_ascii_case("quit") {
        return Ok(InputCommand::Quit);
    }
    validate_move(raw, board).map(InputCommand::Play)
}

/// Parse a coordinate and require the cell to be empty
pub fn validate_move(text: &str, board: &Board) -> Result<Pos, GameError> {
    let pos: Pos = text.parse()?;
    if !board.is_empty(pos) {
        return Err(GameError::IllegalMove {
            pos,
            reason: IllegalReason::Occupied,
        });
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_display_uppercase_no_leading_zero() {
        assert_eq!(Pos::new(7, 7).to_string(), "H8");
        assert_eq!(Pos::new(0, 0).to_string(), "A1");
        assert_eq!(Pos::new(14, 14).to_string(), "O15");
        assert_eq!(Pos::new(9, 2).to_string(), "C10");
    }

    #[test]
    fn test_display_off_board_falls_back_to_pair() {
        assert_eq!(Pos { row: 15, col: 0 }.to_string(), "(15, 0)");
        assert_eq!(Pos { row: 255, col: 255 }.to_string(), "(255, 255)");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("h8".parse::<Pos>(), Ok(Pos::new(7, 7)));
        assert_eq!(" O15 ".parse::<Pos>(), Ok(Pos::new(14, 14)));
        assert_eq!("a1".parse::<Pos>(), Ok(Pos::new(0, 0)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "H", "8H", "P8", "H0", "H16", "H100", "HH8", "H-1", "Z3"] {
            assert!(
                matches!(bad.parse::<Pos>(), Err(GameError::MalformedCoordinate(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_input_quit_and_occupied() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);

        assert_eq!(validate_input("QUIT", &board), Ok(InputCommand::Quit));
        assert_eq!(
            validate_input("h9", &board),
            Ok(InputCommand::Play(Pos::new(8, 7)))
        );
        assert_eq!(
            validate_input("H8", &board),
            Err(GameError::IllegalMove {
                pos: Pos::new(7, 7),
                reason: IllegalReason::Occupied,
            })
        );
        assert!(matches!(
            validate_input("x1", &board),
            Err(GameError::MalformedCoordinate(_))
        ));
    }
}
