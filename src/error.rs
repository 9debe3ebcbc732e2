//! Error taxonomy for the analysis core and the advisor boundary

use thiserror::Error;

use crate::board::Pos;

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    Occupied,
    OutOfBounds,
    /// `Stone::Empty` was passed as the mover
    NoSide,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move at {pos}: {reason}")]
    IllegalMove { pos: Pos, reason: IllegalReason },
    #[error("malformed coordinate {0:?} (expected a column A-O followed by a row 1-15, e.g. H8)")]
    MalformedCoordinate(String),
    #[error("advisor unavailable: {0}")]
    AdvisorUnavailable(String),
    #[error("no empty cell left to play")]
    NoEmptyCell,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::Occupied => write!(f, "cell is already occupied"),
            IllegalReason::OutOfBounds => write!(f, "cell is off the board"),
            IllegalReason::NoSide => write!(f, "no side to place a stone for"),
        }
    }
}
