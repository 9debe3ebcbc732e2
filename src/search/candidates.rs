//! Candidate generation: empty cells near existing stones

use crate::board::{BoardState, Pos, TOTAL_CELLS};

/// Default Chebyshev radius around each stone
pub const DEFAULT_RANGE: u8 = 2;

/// Empty cells within Chebyshev distance `range` of any stone.
///
/// An empty board yields only the center. The list is ordered by textual
/// coordinate, so column letter first and then the row as text ("H10"
/// sorts before "H8").
pub fn candidate_moves(state: &BoardState, range: u8) -> Vec<Pos> {
    let board = state.board();
    if board.is_board_empty() {
        return vec![Pos::CENTER];
    }

    let reach = range as i32;
    let mut marked = [false; TOTAL_CELLS];
    for stone in board.black.iter_ones().chain(board.white.iter_ones()) {
        for dr in -reach..=reach {
            for dc in -reach..=reach {
                if let Some(pos) = stone.offset(dr, dc, 1) {
                    if board.is_empty(pos) {
                        marked[pos.to_index()] = true;
                    }
                }
            }
        }
    }

    let mut candidates: Vec<Pos> = (0..TOTAL_CELLS)
        .filter(|&idx| marked[idx])
        .map(Pos::from_index)
        .collect();
    candidates.sort_by_cached_key(|pos| pos.to_string());

    log::debug!("{} candidate moves within range {}", candidates.len(), range);
    candidates
}
