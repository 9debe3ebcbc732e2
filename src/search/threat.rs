//! Threat detection anchored at empty cells
//!
//! For an empty cell, count the side's stones running away from it in both
//! directions of each axis. Because the two halves are counted separately
//! and summed, a single gap is tolerated: `X X . X X` scores 4 at the gap.

use std::fmt;

use crate::board::{Board, BoardState, Pos, Stone, TOTAL_CELLS};
use crate::rules::Direction;

/// Smallest combined run that counts as a threat
pub const THREAT_MIN_RUN: u8 = 3;

/// Stones counted on each side of the cell
const MAX_REACH: i32 = 4;

/// An empty cell whose occupation would give `length` stones in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    pub pos: Pos,
    pub length: u8,
}

impl fmt::Display for Threat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}連)", self.pos, self.length)
    }
}

/// Threats for `side`, most severe first.
///
/// Each cell appears once with its best direction. Equal severities keep
/// row-major order.
pub fn detect_threats(state: &BoardState, side: Stone) -> Vec<Threat> {
    let board = state.board();
    let mut threats = Vec::new();

    for idx in 0..TOTAL_CELLS {
        let pos = Pos::from_index(idx);
        if !board.is_empty(pos) {
            continue;
        }

        let best = Direction::ALL
            .iter()
            .map(|&dir| {
                let (dr, dc) = dir.delta();
                run_from(board, pos, -dr, -dc, side) + run_from(board, pos, dr, dc, side)
            })
            .max()
            .unwrap_or(0);

        if best >= THREAT_MIN_RUN {
            threats.push(Threat { pos, length: best });
        }
    }

    threats.sort_by(|a, b| b.length.cmp(&a.length));
    threats
}

/// Consecutive `side` stones stepping away from `pos`, not counting `pos`
fn run_from(board: &Board, pos: Pos, dr: i32, dc: i32, side: Stone) -> u8 {
    (1..=MAX_REACH)
        .take_while(|&step| {
            pos.offset(dr, dc, step)
                .is_some_and(|cell| board.get(cell) == side)
        })
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(side: Stone, cells: &[(u8, u8)]) -> BoardState {
        cells.iter().fold(BoardState::new(), |state, &(r, c)| {
            state.apply(Pos::new(r, c), side).unwrap()
        })
    }

    #[test]
    fn test_gapped_four_single_threat() {
        let state = state_with(Stone::Black, &[(7, 3), (7, 4), (7, 6), (7, 7)]);
        let threats = detect_threats(&state, Stone::Black);
        assert_eq!(threats, vec![Threat { pos: Pos::new(7, 5), length: 4 }]);
        assert_eq!(threats[0].to_string(), "F8(4連)");
    }

    #[test]
    fn test_open_three_threatens_both_ends() {
        let state = state_with(Stone::White, &[(2, 2), (3, 3), (4, 4)]);
        let threats = detect_threats(&state, Stone::White);
        let cells: Vec<Pos> = threats.iter().map(|t| t.pos).collect();
        assert_eq!(cells, vec![Pos::new(1, 1), Pos::new(5, 5)]);
        assert!(threats.iter().all(|t| t.length == 3));
    }

    #[test]
    fn test_only_counts_requested_side() {
        let state = state_with(Stone::Black, &[(0, 0), (0, 1), (0, 2)]);
        assert!(detect_threats(&state, Stone::White).is_empty());
        assert_eq!(detect_threats(&state, Stone::Black).len(), 1);
    }

    #[test]
    fn test_sorted_by_severity() {
        // A four on row 0 and a separate three on row 10
        let state = state_with(
            Stone::Black,
            &[(10, 5), (10, 6), (10, 7), (0, 0), (0, 1), (0, 2), (0, 3)],
        );
        let threats = detect_threats(&state, Stone::Black);
        assert_eq!(threats[0], Threat { pos: Pos::new(0, 4), length: 4 });
        assert!(threats[1..].iter().all(|t| t.length == 3));
        assert_eq!(threats.len(), 3);
    }

    #[test]
    fn test_opponent_stone_stops_count() {
        let state = state_with(Stone::Black, &[(5, 5), (5, 7), (5, 8)])
            .apply(Pos::new(5, 4), Stone::White)
            .unwrap();
        // Gap at (5, 6): one black to the left, two to the right
        let threats = detect_threats(&state, Stone::Black);
        assert_eq!(threats, vec![Threat { pos: Pos::new(5, 6), length: 3 }]);
    }
}
