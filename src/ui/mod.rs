//! GUI module for the Gomoku game
//!
//! A native egui/eframe front end that drives the turn loop: human moves by
//! click or typed coordinate, arbiter moves on a background thread.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{GameState, Report};
