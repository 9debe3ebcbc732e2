//! Game rules for fifteen-by-fifteen Gomoku
//!
//! This module implements the rule set:
//! - Line scanning along the four canonical directions
//! - Win condition (five in a row, overlines count) and game status

pub mod line;
pub mod win;

// Re-exports for convenient access
pub use line::{scan_line, Direction, Line, WIN_LENGTH};
pub use win::{check_winner, find_win, game_status, Win};
