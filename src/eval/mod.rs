//! Pattern analysis for Gomoku positions
//!
//! Every five-cell window on the board is classified into a named shape
//! (five, open/blocked four, open/blocked three) for each side. The result
//! is recomputed from scratch on every query and rendered as text for the
//! external advisors.

pub mod patterns;
pub mod summary;

pub use patterns::{analyze_patterns, Pattern, Shape};
pub use summary::analysis_text;
