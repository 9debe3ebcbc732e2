//! One-ply checkmate search
//!
//! Finds a move that wins on the spot, or failing that, the cell the
//! opponent would win on next turn. Deeper forcing sequences are left to
//! the advisors.

use crate::board::{BoardState, Pos, Stone};
use crate::rules::check_winner;

/// Why a move is critical
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalKind {
    /// Playing here completes a five for the mover
    Win,
    /// The opponent would complete a five here
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalMove {
    pub pos: Pos,
    pub kind: CriticalKind,
}

/// Search every empty cell, row-major: first a win for `mover`, then a
/// must-block against the opponent.
pub fn find_critical_move(state: &BoardState, mover: Stone) -> Option<CriticalMove> {
    let empties: Vec<Pos> = state.board().empty_cells().collect();

    if let Some(pos) = first_winning_cell(state, &empties, mover) {
        log::debug!("critical search: {} wins at {}", mover.name(), pos);
        return Some(CriticalMove {
            pos,
            kind: CriticalKind::Win,
        });
    }

    let opponent = mover.opponent();
    first_winning_cell(state, &empties, opponent).map(|pos| {
        log::debug!("critical search: {} must block at {}", mover.name(), pos);
        CriticalMove {
            pos,
            kind: CriticalKind::Block,
        }
    })
}

fn first_winning_cell(state: &BoardState, empties: &[Pos], side: Stone) -> Option<Pos> {
    empties.iter().copied().find(|&pos| {
        // Cells come from the empty list, so `apply` cannot reject them
        state
            .apply(pos, side)
            .ok()
            .and_then(|next| check_winner(&next))
            .is_some_and(|win| win.winner == side)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> BoardState {
        let mut state = BoardState::new();
        for &(r, c) in black {
            state = state.apply(Pos::new(r, c), Stone::Black).unwrap();
        }
        for &(r, c) in white {
            state = state.apply(Pos::new(r, c), Stone::White).unwrap();
        }
        state
    }

    #[test]
    fn test_no_critical_move_on_quiet_board() {
        let state = state_with(&[(7, 7)], &[(8, 8)]);
        assert_eq!(find_critical_move(&state, Stone::White), None);
        assert_eq!(find_critical_move(&BoardState::new(), Stone::Black), None);
    }

    #[test]
    fn test_gapped_four_gap_for_either_mover() {
        // X X . X X on row 5
        let state = state_with(&[(5, 3), (5, 4), (5, 6), (5, 7)], &[(0, 0)]);
        let gap = Pos::new(5, 5);

        assert_eq!(
            find_critical_move(&state, Stone::Black),
            Some(CriticalMove { pos: gap, kind: CriticalKind::Win })
        );
        assert_eq!(
            find_critical_move(&state, Stone::White),
            Some(CriticalMove { pos: gap, kind: CriticalKind::Block })
        );
    }

    #[test]
    fn test_win_preferred_over_block() {
        // White can win on column 0, Black threatens on row 10
        let state = state_with(
            &[(10, 5), (10, 6), (10, 7), (10, 8)],
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
        );
        let found = find_critical_move(&state, Stone::White).unwrap();
        assert_eq!(found, CriticalMove { pos: Pos::new(4, 0), kind: CriticalKind::Win });
    }

    #[test]
    fn test_first_cell_in_row_major_order() {
        // Open four: both ends win, the upper one comes first
        let state = state_with(&[(4, 9), (5, 9), (6, 9), (7, 9)], &[]);
        let found = find_critical_move(&state, Stone::Black).unwrap();
        assert_eq!(found.pos, Pos::new(3, 9));

        let next = state.apply(found.pos, Stone::Black).unwrap();
        assert_eq!(check_winner(&next).map(|w| w.winner), Some(Stone::Black));
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let state = state_with(&[(5, 3), (5, 4), (5, 6), (5, 7)], &[]);
        let before = state.clone();
        let _ = find_critical_move(&state, Stone::White);
        assert_eq!(state, before);
    }
}
