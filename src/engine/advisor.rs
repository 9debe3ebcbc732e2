//! The message boundary to external advisors
//!
//! Advisors never see the grid as structured data. They receive a
//! [`BoardInfo`] (board render, stone lists, candidates, pattern text,
//! threat list) and answer with a [`Proposal`]. The final arbiter between
//! two valid proposals is a [`Commander`]. Both are black boxes: they may be
//! slow, wrong, or absent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{validate_move, Board, BoardState, Pos, Stone};
use crate::error::GameError;
use crate::eval::{analysis_text, analyze_patterns};
use crate::search::{candidate_moves, detect_threats};

/// Severity label attached to a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

/// An untrusted move suggestion.
///
/// Attack proposals leave `threat` empty; defense proposals name the threat
/// they answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "move")]
    pub mv: String,
    pub reason: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat: Option<String>,
}

impl Proposal {
    pub fn new(pos: Pos, reason: impl Into<String>, priority: Priority) -> Self {
        Self {
            mv: pos.to_string(),
            reason: reason.into(),
            priority,
            threat: None,
        }
    }

    pub fn with_threat(mut self, threat: impl Into<String>) -> Self {
        self.threat = Some(threat.into());
        self
    }

    /// Parse an advisor's JSON reply
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        serde_json::from_str(text)
            .map_err(|e| GameError::AdvisorUnavailable(format!("unparsable proposal: {e}")))
    }

    /// The proposed cell, if it is on the board and empty
    pub fn validate(&self, board: &Board) -> Result<Pos, GameError> {
        validate_move(&self.mv, board)
    }
}

/// Which proposal the final move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Attacker,
    Defender,
    /// The lone advisor in single mode
    Advisor,
    Own,
}

/// A commander's final answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "move")]
    pub mv: String,
    pub reason: String,
    #[serde(default)]
    pub comment: String,
    pub adopted_from: Source,
}

impl Verdict {
    pub fn from_json(text: &str) -> Result<Self, GameError> {
        serde_json::from_str(text)
            .map_err(|e| GameError::AdvisorUnavailable(format!("unparsable verdict: {e}")))
    }
}

/// Everything an advisor is told about the position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardInfo {
    /// Side the advice is for
    pub side: Stone,
    pub board_text: String,
    pub last_move: Option<String>,
    pub move_count: u32,
    pub black_stones: Vec<String>,
    pub white_stones: Vec<String>,
    pub candidate_moves: Vec<String>,
    pub analysis_text: String,
    /// The opponent's threats, "<coord>(<n>連)", most severe first
    pub threats: Vec<String>,
}

fn to_text(cells: &[Pos]) -> Vec<String> {
    cells.iter().map(Pos::to_string).collect()
}

impl BoardInfo {
    pub fn new(state: &BoardState, side: Stone, candidate_range: u8) -> Self {
        let board = state.board();
        let patterns = analyze_patterns(state);
        Self {
            side,
            board_text: board.to_string(),
            last_move: state.last_move().map(|pos| pos.to_string()),
            move_count: state.move_count(),
            black_stones: to_text(&board.stone_list(Stone::Black)),
            white_stones: to_text(&board.stone_list(Stone::White)),
            candidate_moves: to_text(&candidate_moves(state, candidate_range)),
            analysis_text: analysis_text(&patterns, side),
            threats: detect_threats(state, side.opponent())
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Rebuild a position from the stone lists, for in-process advisors
    pub fn reconstruct(&self) -> Result<BoardState, GameError> {
        let mut state = BoardState::new();
        for (stones, side) in [
            (&self.black_stones, Stone::Black),
            (&self.white_stones, Stone::White),
        ] {
            for text in stones {
                state = state.apply(text.parse()?, side)?;
            }
        }
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GameError::AdvisorUnavailable(format!("cannot encode request: {e}")))
    }

    /// Short human summary, used in logs
    pub fn headline(&self) -> String {
        format!(
            "move {} for {}, last {}, {} candidates, threats [{}]",
            self.move_count + 1,
            self.side.name(),
            self.last_move.as_deref().unwrap_or("none"),
            self.candidate_moves.len(),
            self.threats.join(", ")
        )
    }
}

/// An attack- or defense-oriented proposer
pub trait Advisor: Send + Sync {
    fn propose(&self, info: &BoardInfo) -> Result<Proposal, GameError>;
}

/// Both valid proposals plus the position, for the final arbiter
#[derive(Debug, Clone, Copy)]
pub struct MergeRequest<'a> {
    pub info: &'a BoardInfo,
    pub attack: &'a Proposal,
    pub defense: &'a Proposal,
}

/// Picks between two valid proposals (or names a better cell)
pub trait Commander: Send + Sync {
    fn decide(&self, request: &MergeRequest<'_>) -> Result<Verdict, GameError>;
}

impl<T: Advisor + ?Sized> Advisor for Box<T> {
    fn propose(&self, info: &BoardInfo) -> Result<Proposal, GameError> {
        (**self).propose(info)
    }
}

impl<T: Commander + ?Sized> Commander for Box<T> {
    fn decide(&self, request: &MergeRequest<'_>) -> Result<Verdict, GameError> {
        (**self).decide(request)
    }
}
