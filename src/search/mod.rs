//! Move advisor queries
//!
//! Contains:
//! - One-ply checkmate / block-checkmate search
//! - Candidate generation around existing stones
//! - Gapped threat detection

pub mod candidates;
pub mod critical;
pub mod threat;

pub use candidates::{candidate_moves, DEFAULT_RANGE};
pub use critical::{find_critical_move, CriticalKind, CriticalMove};
pub use threat::{detect_threats, Threat, THREAT_MIN_RUN};
