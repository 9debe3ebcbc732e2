//! Decision Arbiter
//!
//! Merges untrusted advisor proposals with the rule-based checkmate search.
//! The policy, in strict order:
//!
//! 1. **Checkmate**: a one-ply win or must-block is played unconditionally
//! 2. **Validation**: each proposal must name an on-board empty cell
//! 3. **Both invalid**: uniform random empty cell
//! 4. **One valid**: adopt it as-is
//! 5. **Both valid**: delegate to the [`Commander`]
//!
//! In [`Mode::Single`] one holistic advisor replaces the council: after the
//! checkmate search its proposal is validated and adopted, or a random empty
//! cell is played when it is unusable.
//!
//! # Example
//!
//! ```
//! use gomoku::{Arbiter, BoardState, Stone};
//!
//! let state = BoardState::replay(&["H8", "A1", "I8"]).unwrap();
//! let decision = Arbiter::local().decide(&state, Stone::White).unwrap();
//! assert!(state.board().is_empty(decision.pos));
//! ```

pub mod advisor;
pub mod local;

pub use advisor::{
    Advisor, BoardInfo, Commander, MergeRequest, Priority, Proposal, Source, Verdict,
};
pub use local::{HolisticAdvisor, PatternAttacker, SeverityCommander, ThreatDefender};

use std::thread;
use std::time::Instant;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::board::{validate_move, Board, BoardState, Pos, Stone};
use crate::error::GameError;
use crate::search::{find_critical_move, CriticalKind, CriticalMove, DEFAULT_RANGE};

/// Which branch of the policy produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CheckmateFound,
    BothInvalid,
    OneValid,
    BothValidDelegate,
    /// Both valid, but the commander failed; the defense proposal was kept
    CommanderFallback,
    /// Single mode: the advisor's proposal was adopted
    SingleAdvisor,
    /// Single mode: the proposal was unusable, random empty cell
    SingleInvalid,
}

/// How many advisors are consulted per move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Attacker and defender in parallel, merged by a commander
    #[default]
    Council,
    /// One advisor sees the whole position
    Single,
}

/// The arbiter's final answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub pos: Pos,
    pub reason: String,
    pub comment: String,
    pub adopted_from: Source,
    pub route: Route,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl Decision {
    fn checkmate(critical: CriticalMove, time_ms: u64) -> Self {
        let reason = match critical.kind {
            CriticalKind::Win => format!("{} completes five", critical.pos),
            CriticalKind::Block => format!("{} stops the opponent's five", critical.pos),
        };
        Self {
            pos: critical.pos,
            reason,
            comment: String::new(),
            adopted_from: Source::Own,
            route: Route::CheckmateFound,
            time_ms,
        }
    }

    fn random(pos: Pos, route: Route, time_ms: u64) -> Self {
        Self {
            pos,
            reason: "no usable proposal, random empty cell".to_string(),
            comment: String::new(),
            adopted_from: Source::Own,
            route,
            time_ms,
        }
    }

    fn adopt(
        pos: Pos,
        proposal: Proposal,
        adopted_from: Source,
        route: Route,
        time_ms: u64,
    ) -> Self {
        Self {
            pos,
            reason: proposal.reason,
            comment: proposal.threat.unwrap_or_default(),
            adopted_from,
            route,
            time_ms,
        }
    }
}

enum Panel {
    Council {
        attacker: Box<dyn Advisor>,
        defender: Box<dyn Advisor>,
        commander: Box<dyn Commander>,
    },
    Single(Box<dyn Advisor>),
}

/// Advisors behind one policy: a council of attacker, defender and
/// commander, or a single advisor
pub struct Arbiter {
    panel: Panel,
    candidate_range: u8,
}

impl Arbiter {
    #[must_use]
    pub fn new(
        attacker: impl Advisor + 'static,
        defender: impl Advisor + 'static,
        commander: impl Commander + 'static,
    ) -> Self {
        Self {
            panel: Panel::Council {
                attacker: Box::new(attacker),
                defender: Box::new(defender),
                commander: Box::new(commander),
            },
            candidate_range: DEFAULT_RANGE,
        }
    }

    /// Arbiter that asks one advisor per move
    #[must_use]
    pub fn single(advisor: impl Advisor + 'static) -> Self {
        Self {
            panel: Panel::Single(Box::new(advisor)),
            candidate_range: DEFAULT_RANGE,
        }
    }

    /// Arbiter backed by the in-process rule-based advisors
    #[must_use]
    pub fn local() -> Self {
        Self::new(PatternAttacker, ThreatDefender, SeverityCommander)
    }

    /// In-process arbiter for `mode`
    #[must_use]
    pub fn local_with_mode(mode: Mode) -> Self {
        match mode {
            Mode::Council => Self::local(),
            Mode::Single => Self::single(HolisticAdvisor),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.panel {
            Panel::Council { .. } => Mode::Council,
            Panel::Single(_) => Mode::Single,
        }
    }

    /// Chebyshev radius used for the candidate list sent to advisors
    #[must_use]
    pub fn with_candidate_range(mut self, range: u8) -> Self {
        self.candidate_range = range;
        self
    }

    /// Decide `side`'s move, drawing the random fallback from the thread RNG
    pub fn decide(&self, state: &BoardState, side: Stone) -> Result<Decision, GameError> {
        self.decide_with_rng(state, side, &mut rand::thread_rng())
    }

    /// Decide `side`'s move.
    ///
    /// Only fails with [`GameError::NoEmptyCell`], which the draw rule rules
    /// out for any game still in progress.
    pub fn decide_with_rng<R: Rng + ?Sized>(
        &self,
        state: &BoardState,
        side: Stone,
        rng: &mut R,
    ) -> Result<Decision, GameError> {
        let start = Instant::now();
        let elapsed = || start.elapsed().as_millis() as u64;
        let board = state.board();

        // 1. Checkmate overrides any proposal
        if let Some(critical) = find_critical_move(state, side) {
            info!(
                "checkmate found for {}: {:?} at {}",
                side.name(),
                critical.kind,
                critical.pos
            );
            return Ok(Decision::checkmate(critical, elapsed()));
        }

        let info = BoardInfo::new(state, side, self.candidate_range);
        debug!("consulting advisors: {}", info.headline());
        let decision = match &self.panel {
            Panel::Council {
                attacker,
                defender,
                commander,
            } => {
                let (attack, defense) = consult(attacker.as_ref(), defender.as_ref(), &info);
                Self::merge(&info, board, attack, defense, commander.as_ref(), rng, &elapsed)?
            }
            Panel::Single(advisor) => {
                match checked("single", joined_call(advisor.as_ref(), &info), board) {
                    Some((pos, proposal)) => Decision::adopt(
                        pos,
                        proposal,
                        Source::Advisor,
                        Route::SingleAdvisor,
                        elapsed(),
                    ),
                    None => {
                        let pos = random_cell(board, rng)?;
                        Decision::random(pos, Route::SingleInvalid, elapsed())
                    }
                }
            }
        };

        info!(
            "{} plays {} via {:?} (from {:?}): {}",
            side.name(),
            decision.pos,
            decision.route,
            decision.adopted_from,
            decision.reason
        );
        Ok(decision)
    }

    /// Council policy over the two raw proposals
    fn merge<R: Rng + ?Sized>(
        info: &BoardInfo,
        board: &Board,
        attack: Result<Proposal, GameError>,
        defense: Result<Proposal, GameError>,
        commander: &dyn Commander,
        rng: &mut R,
        elapsed: &dyn Fn() -> u64,
    ) -> Result<Decision, GameError> {
        // 2. Keep only legal proposals
        let attack = checked("attack", attack, board);
        let defense = checked("defense", defense, board);

        let decision = match (attack, defense) {
            // 3. Nothing usable
            (None, None) => {
                let pos = random_cell(board, rng)?;
                Decision::random(pos, Route::BothInvalid, elapsed())
            }
            // 4. Exactly one survives
            (Some((pos, proposal)), None) => {
                Decision::adopt(pos, proposal, Source::Attacker, Route::OneValid, elapsed())
            }
            (None, Some((pos, proposal))) => {
                Decision::adopt(pos, proposal, Source::Defender, Route::OneValid, elapsed())
            }
            // 5. Both valid
            (Some(attack), Some(defense)) => {
                let request = MergeRequest {
                    info,
                    attack: &attack.1,
                    defense: &defense.1,
                };
                let verdict = commander.decide(&request).and_then(|verdict| {
                    let pos = validate_move(&verdict.mv, board)?;
                    Ok((pos, verdict))
                });
                match verdict {
                    Ok((pos, verdict)) => Decision {
                        pos,
                        reason: verdict.reason,
                        comment: verdict.comment,
                        adopted_from: verdict.adopted_from,
                        route: Route::BothValidDelegate,
                        time_ms: elapsed(),
                    },
                    Err(err) => {
                        warn!("commander unavailable ({err}), keeping the defense proposal");
                        let (pos, proposal) = defense;
                        Decision::adopt(
                            pos,
                            proposal,
                            Source::Defender,
                            Route::CommanderFallback,
                            elapsed(),
                        )
                    }
                }
            }
        };
        Ok(decision)
    }
}

/// Ask both advisors at once and wait for both
fn consult(
    attacker: &dyn Advisor,
    defender: &dyn Advisor,
    info: &BoardInfo,
) -> (Result<Proposal, GameError>, Result<Proposal, GameError>) {
    thread::scope(|s| {
        let attack = s.spawn(|| attacker.propose(info));
        let defense = s.spawn(|| defender.propose(info));
        (joined(attack.join()), joined(defense.join()))
    })
}

/// One advisor call with a panic mapped to `AdvisorUnavailable`
fn joined_call(advisor: &dyn Advisor, info: &BoardInfo) -> Result<Proposal, GameError> {
    thread::scope(|s| joined(s.spawn(|| advisor.propose(info)).join()))
}

fn random_cell<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Pos, GameError> {
    let empties: Vec<Pos> = board.empty_cells().collect();
    empties.choose(rng).copied().ok_or(GameError::NoEmptyCell)
}

impl Default for Arbiter {
    fn default() -> Self {
        Self::local()
    }
}

fn joined(result: thread::Result<Result<Proposal, GameError>>) -> Result<Proposal, GameError> {
    result.unwrap_or_else(|_| Err(GameError::AdvisorUnavailable("advisor panicked".to_string())))
}

fn checked(
    role: &str,
    proposal: Result<Proposal, GameError>,
    board: &Board,
) -> Option<(Pos, Proposal)> {
    match proposal.and_then(|p| p.validate(board).map(|pos| (pos, p))) {
        Ok(valid) => Some(valid),
        Err(err) => {
            warn!("{role} proposal discarded: {err}");
            None
        }
    }
}
