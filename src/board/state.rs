//! Immutable game snapshot handed to the analysis core

use super::board::Board;
use super::{Pos, Stone, TOTAL_CELLS};
use crate::error::{GameError, IllegalReason};

/// Game status tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    BlackWon,
    WhiteWon,
    Draw,
}

impl GameStatus {
    pub fn won_by(stone: Stone) -> Option<GameStatus> {
        match stone {
            Stone::Black => Some(GameStatus::BlackWon),
            Stone::White => Some(GameStatus::WhiteWon),
            Stone::Empty => None,
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// A board position plus turn bookkeeping.
///
/// Never mutated in place: `apply` returns a fresh successor, so a caller
/// holding an older snapshot keeps a stable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    to_move: Stone,
    status: GameStatus,
    history: Vec<Pos>,
    move_count: u32,
}

impl BoardState {
    /// Empty board, Black to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Stone::Black,
            status: GameStatus::InProgress,
            history: Vec::with_capacity(TOTAL_CELLS),
            move_count: 0,
        }
    }

    /// Replay alternating moves from an empty board, Black first
    pub fn replay<S: AsRef<str>>(moves: &[S]) -> Result<Self, GameError> {
        moves.iter().try_fold(Self::new(), |state, text| {
            let pos: Pos = text.as_ref().parse()?;
            let side = state.to_move;
            state.apply(pos, side)
        })
    }

    /// Successor state with `side`'s stone at `pos`.
    ///
    /// The status tag is left untouched; the turn loop settles it with
    /// [`crate::rules::game_status`].
    pub fn apply(&self, pos: Pos, side: Stone) -> Result<BoardState, GameError> {
        if side == Stone::Empty {
            return Err(GameError::IllegalMove {
                pos,
                reason: IllegalReason::NoSide,
            });
        }
        if !pos.in_bounds() {
            return Err(GameError::IllegalMove {
                pos,
                reason: IllegalReason::OutOfBounds,
            });
        }
        if !self.board.is_empty(pos) {
            return Err(GameError::IllegalMove {
                pos,
                reason: IllegalReason::Occupied,
            });
        }

        let mut board = self.board.clone();
        board.place_stone(pos, side);
        let mut history = self.history.clone();
        history.push(pos);

        Ok(BoardState {
            board,
            to_move: side.opponent(),
            status: self.status,
            history,
            move_count: self.move_count + 1,
        })
    }

    /// Same position with a different status tag
    pub fn with_status(&self, status: GameStatus) -> BoardState {
        BoardState {
            status,
            ..self.clone()
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Moves played so far, oldest first
    #[inline]
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
