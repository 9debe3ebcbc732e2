//! Turn loop state for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{validate_input, BoardState, InputCommand, Pos, Stone};
use crate::config::Config;
use crate::engine::{Arbiter, BoardInfo, Decision, Mode};
use crate::error::GameError;
use crate::rules::{check_winner, game_status, WIN_LENGTH};
use crate::search::{find_critical_move, CriticalMove};

/// Arbiter computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Result<Decision, GameError>>,
        start_time: Instant,
    },
}

/// What the side panel shows for the side to move
pub struct Report {
    pub info: BoardInfo,
    pub critical: Option<CriticalMove>,
}

impl Report {
    fn new(state: &BoardState, candidate_range: u8) -> Self {
        let side = state.to_move();
        Self {
            info: BoardInfo::new(state, side, candidate_range),
            critical: find_critical_move(state, side),
        }
    }
}

/// Main game state
pub struct GameState {
    pub state: BoardState,
    pub human_side: Stone,
    pub winning_line: Option<[Pos; WIN_LENGTH]>,
    pub last_decision: Option<Decision>,
    pub ai_state: AiState,
    pub ai_thinking_time: Option<Duration>,
    pub hint: Option<Pos>,
    pub message: Option<String>,
    pub report: Report,
    candidate_range: u8,
    mode: Mode,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: &Config) -> Self {
        let state = BoardState::new();
        Self {
            report: Report::new(&state, config.candidate_range),
            state,
            human_side: config.human_side,
            winning_line: None,
            last_decision: None,
            ai_state: AiState::Idle,
            ai_thinking_time: None,
            hint: None,
            message: None,
            candidate_range: config.candidate_range,
            mode: config.mode,
            rng: config.rng(),
        }
    }

    /// Fresh board; the human may switch sides
    pub fn reset(&mut self, human_side: Stone) {
        self.state = BoardState::new();
        self.human_side = human_side;
        self.winning_line = None;
        self.last_decision = None;
        self.ai_state = AiState::Idle;
        self.ai_thinking_time = None;
        self.hint = None;
        self.message = None;
        self.refresh_report();
    }

    #[inline]
    pub fn to_move(&self) -> Stone {
        self.state.to_move()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.state.status().is_over()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_over() && self.to_move() == self.human_side
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.to_move() != self.human_side
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Place the human's stone at `pos`
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() || !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Handle a typed line: a coordinate to play, or `quit`
    pub fn submit_text(&mut self, raw: &str) -> Result<InputCommand, String> {
        let command = validate_input(raw, self.state.board()).map_err(|e| e.to_string())?;
        if let InputCommand::Play(pos) = command {
            self.try_place_stone(pos)?;
        }
        Ok(command)
    }

    /// Apply a move for the side to move and settle the status
    fn execute_move(&mut self, pos: Pos) -> Result<(), GameError> {
        let side = self.to_move();
        let next = self.state.apply(pos, side)?;
        let status = game_status(&next);
        self.winning_line = check_winner(&next).map(|win| win.line);
        self.state = next.with_status(status);

        log::debug!("{} played {} (move {})", side.name(), pos, self.state.move_count());
        self.hint = None;
        self.message = None;
        self.refresh_report();
        Ok(())
    }

    fn refresh_report(&mut self) {
        self.report = Report::new(&self.state, self.candidate_range);
    }

    /// Hand the position to the arbiter on a background thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let state = self.state.clone();
        let side = self.to_move();
        let range = self.candidate_range;
        let mode = self.mode;
        let seed: u64 = self.rng.gen();

        let (tx, rx) = channel();
        thread::spawn(move || {
            let arbiter = Arbiter::local_with_mode(mode).with_candidate_range(range);
            let mut rng = StdRng::seed_from_u64(seed);
            let _ = tx.send(arbiter.decide_with_rng(&state, side, &mut rng));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Play the arbiter's move once it has arrived
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.ai_thinking_time = Some(elapsed);
            match result {
                Ok(decision) => {
                    let pos = decision.pos;
                    self.last_decision = Some(decision);
                    if let Err(err) = self.execute_move(pos) {
                        self.message = Some(err.to_string());
                    }
                }
                Err(err) => self.message = Some(err.to_string()),
            }
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Ask the arbiter what the human should play
    pub fn request_hint(&mut self) {
        if !self.is_human_turn() || self.is_ai_thinking() {
            return;
        }
        let arbiter = Arbiter::local_with_mode(self.mode).with_candidate_range(self.candidate_range);
        match arbiter.decide_with_rng(&self.state, self.to_move(), &mut self.rng) {
            Ok(decision) => {
                self.hint = Some(decision.pos);
                self.last_decision = Some(decision);
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Take back the last move pair (the human's move and the reply)
    pub fn undo(&mut self) {
        if self.state.history().is_empty() || self.is_ai_thinking() {
            return;
        }

        let history = self.state.history();
        let mut keep = history.len().saturating_sub(2);
        // Land on a human turn
        let side_at = |n: usize| if n % 2 == 0 { Stone::Black } else { Stone::White };
        if side_at(keep) != self.human_side && keep > 0 {
            keep -= 1;
        }

        let mut state = BoardState::new();
        for &pos in &history[..keep] {
            let side = state.to_move();
            match state.apply(pos, side) {
                Ok(next) => state = next,
                Err(err) => {
                    self.message = Some(err.to_string());
                    return;
                }
            }
        }

        self.state = state;
        self.winning_line = None;
        self.hint = None;
        self.message = None;
        self.refresh_report();
    }
}
