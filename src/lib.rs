//! Gomoku analysis core with an advisor council
//!
//! Standard freestyle Gomoku on a 15x15 board: Black moves first, five or
//! more in a row wins, a full board with no five is a draw.
//!
//! # Architecture
//!
//! - [`board`]: Bitboard position, immutable [`BoardState`] snapshots, coordinates
//! - [`rules`]: Line scanning and win detection
//! - [`eval`]: Window-based pattern classifier and its text summary
//! - [`search`]: One-ply checkmate search, candidate moves, threat detection
//! - [`engine`]: Decision Arbiter over untrusted attack/defense advisors
//! - [`ui`]: egui front end driving the turn loop
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{analyze_patterns, check_winner, Arbiter, BoardState, Stone};
//!
//! let state = BoardState::replay(&["H8", "A1", "H9", "A2", "H10"]).unwrap();
//! assert!(check_winner(&state).is_none());
//! assert!(!analyze_patterns(&state).is_empty());
//!
//! let decision = Arbiter::local().decide(&state, Stone::White).unwrap();
//! println!("White plays {} ({:?})", decision.pos, decision.route);
//! ```
//!
//! # Decision Priority
//!
//! 1. Immediate win, then must-block (one ply)
//! 2. Advisor proposals that name an empty cell
//! 3. Commander between two valid proposals
//! 4. Random empty cell when nothing is usable

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, BoardState, GameStatus, Pos, Stone, BOARD_SIZE};
pub use config::{Config, ConfigError};
pub use engine::{Advisor, Arbiter, BoardInfo, Commander, Decision, Mode, Proposal, Route};
pub use error::GameError;
pub use eval::{analysis_text, analyze_patterns, Pattern, Shape};
pub use rules::{check_winner, game_status, Win};
pub use search::{candidate_moves, detect_threats, find_critical_move};
