//! Rule-based advisors that run in-process
//!
//! They answer from the same [`BoardInfo`] an external advisor would get,
//! rebuilding the position from its stone lists.

use crate::board::{BoardState, Pos, Stone};
use crate::error::GameError;
use crate::eval::{analyze_patterns, Pattern, Shape};
use crate::search::detect_threats;

use super::advisor::{Advisor, BoardInfo, Commander, MergeRequest, Priority, Proposal, Source, Verdict};

/// Extends the side's own strongest shape
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternAttacker;

/// Answers the opponent's most severe threat
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreatDefender;

/// Picks the more urgent of two proposals, defense on ties
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityCommander;

/// Lone advisor for single mode: weighs its own chances against the
/// opponent's threats and answers whichever is more urgent
#[derive(Debug, Clone, Copy, Default)]
pub struct HolisticAdvisor;

/// `owner`'s patterns that still have a cell to play, most severe first
fn playable_patterns(state: &BoardState, owner: Stone) -> Vec<Pattern> {
    let mut patterns: Vec<Pattern> = analyze_patterns(state)
        .into_iter()
        .filter(|p| p.owner == owner && !p.recommended.is_empty())
        .collect();
    patterns.sort_by_key(|p| p.shape);
    patterns
}

fn shape_priority(shape: Shape) -> Priority {
    match shape {
        Shape::Five | Shape::OpenFour | Shape::BlockedFour => Priority::Critical,
        Shape::OpenThree => Priority::High,
        Shape::BlockedThree => Priority::Medium,
    }
}

fn first_candidate(info: &BoardInfo, state: &BoardState) -> Result<Pos, GameError> {
    for text in &info.candidate_moves {
        let pos: Pos = text.parse()?;
        if state.board().is_empty(pos) {
            return Ok(pos);
        }
    }
    Err(GameError::AdvisorUnavailable("no candidate moves".to_string()))
}

impl Advisor for PatternAttacker {
    fn propose(&self, info: &BoardInfo) -> Result<Proposal, GameError> {
        let state = info.reconstruct()?;

        if let Some(pattern) = playable_patterns(&state, info.side).first() {
            let pos = pattern.recommended[0];
            return Ok(Proposal::new(
                pos,
                format!("extend own {}: {}", pattern.shape, pattern.description),
                shape_priority(pattern.shape),
            ));
        }

        let pos = first_candidate(info, &state)?;
        Ok(Proposal::new(pos, "develop near existing stones", Priority::Low))
    }
}

impl Advisor for ThreatDefender {
    fn propose(&self, info: &BoardInfo) -> Result<Proposal, GameError> {
        let state = info.reconstruct()?;
        let opponent = info.side.opponent();

        if let Some(threat) = detect_threats(&state, opponent).first() {
            let priority = if threat.length >= 4 {
                Priority::Critical
            } else {
                Priority::High
            };
            return Ok(Proposal::new(
                threat.pos,
                format!("{} would make {} in a row here", opponent.name(), threat.length),
                priority,
            )
            .with_threat(threat.to_string()));
        }

        if let Some(pattern) = playable_patterns(&state, opponent).first() {
            return Ok(Proposal::new(
                pattern.recommended[0],
                format!("cut the {} {}", opponent.name(), pattern.shape),
                Priority::Medium,
            )
            .with_threat(pattern.description.clone()));
        }

        let pos = first_candidate(info, &state)?;
        Ok(Proposal::new(pos, "nothing to block", Priority::Low))
    }
}

impl Advisor for HolisticAdvisor {
    fn propose(&self, info: &BoardInfo) -> Result<Proposal, GameError> {
        let attack = PatternAttacker.propose(info)?;
        let defense = ThreatDefender.propose(info)?;
        Ok(if attack.priority < defense.priority {
            attack
        } else {
            defense
        })
    }
}

impl Commander for SeverityCommander {
    fn decide(&self, request: &MergeRequest<'_>) -> Result<Verdict, GameError> {
        let (attack, defense) = (request.attack, request.defense);
        let (chosen, adopted_from) = if attack.priority < defense.priority {
            (attack, Source::Attacker)
        } else {
            (defense, Source::Defender)
        };

        Ok(Verdict {
            mv: chosen.mv.clone(),
            reason: chosen.reason.clone(),
            comment: format!(
                "attack {} ({}) vs defense {} ({})",
                attack.mv, attack.priority, defense.mv, defense.priority
            ),
            adopted_from,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Black: H8 I8 J8 in a row. White: two stones in the corners.
    fn three_in_a_row() -> BoardState {
        BoardState::replay(&["H8", "A1", "I8", "O15", "J8"]).unwrap()
    }

    #[test]
    fn test_attacker_extends_own_three() {
        let state = three_in_a_row();
        let info = BoardInfo::new(&state, Stone::Black, 2);
        let proposal = PatternAttacker.propose(&info).unwrap();

        assert_eq!(proposal.priority, Priority::High);
        assert!(proposal.reason.contains("OpenThree"));
        let pos = proposal.validate(state.board()).unwrap();
        assert_eq!(pos.row, 7);
        assert_eq!(proposal.threat, None);
    }

    #[test]
    fn test_attacker_falls_back_to_candidates() {
        let state = BoardState::replay(&["H8"]).unwrap();
        let info = BoardInfo::new(&state, Stone::White, 2);
        let proposal = PatternAttacker.propose(&info).unwrap();

        assert_eq!(proposal.priority, Priority::Low);
        assert_eq!(proposal.mv, info.candidate_moves[0]);
    }

    #[test]
    fn test_defender_blocks_top_threat() {
        let state = three_in_a_row();
        let info = BoardInfo::new(&state, Stone::White, 2);
        let proposal = ThreatDefender.propose(&info).unwrap();

        assert_eq!(proposal.mv, "G8");
        assert_eq!(proposal.priority, Priority::High);
        assert_eq!(proposal.threat.as_deref(), Some("G8(3連)"));
    }

    #[test]
    fn test_defender_with_nothing_to_block() {
        let info = BoardInfo::new(&BoardState::new(), Stone::Black, 2);
        let proposal = ThreatDefender.propose(&info).unwrap();
        assert_eq!(proposal.mv, "H8");
        assert_eq!(proposal.priority, Priority::Low);
    }

    #[test]
    fn test_holistic_blocks_then_attacks() {
        let state = three_in_a_row();

        let info = BoardInfo::new(&state, Stone::White, 2);
        let proposal = HolisticAdvisor.propose(&info).unwrap();
        assert_eq!(proposal.mv, "G8");
        assert_eq!(proposal.threat.as_deref(), Some("G8(3連)"));

        let info = BoardInfo::new(&state, Stone::Black, 2);
        let proposal = HolisticAdvisor.propose(&info).unwrap();
        assert_eq!(proposal.priority, Priority::High);
        assert!(proposal.reason.contains("OpenThree"));
    }

    fn merge(attack: Priority, defense: Priority) -> Verdict {
        let info = BoardInfo::new(&BoardState::new(), Stone::Black, 2);
        let attack = Proposal::new(Pos::new(0, 0), "a", attack);
        let defense = Proposal::new(Pos::new(1, 1), "d", defense);
        SeverityCommander
            .decide(&MergeRequest {
                info: &info,
                attack: &attack,
                defense: &defense,
            })
            .unwrap()
    }

    #[test]
    fn test_commander_prefers_more_urgent() {
        let verdict = merge(Priority::Critical, Priority::Medium);
        assert_eq!(verdict.adopted_from, Source::Attacker);
        assert_eq!(verdict.mv, "A1");

        let verdict = merge(Priority::Low, Priority::High);
        assert_eq!(verdict.adopted_from, Source::Defender);
        assert_eq!(verdict.mv, "B2");
    }

    #[test]
    fn test_commander_ties_go_to_defense() {
        let verdict = merge(Priority::High, Priority::High);
        assert_eq!(verdict.adopted_from, Source::Defender);
        assert!(verdict.comment.contains("attack A1 (high)"));
    }
}
