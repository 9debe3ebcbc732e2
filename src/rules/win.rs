//! Win condition checking
//!
//! A side wins with five or more stones in a row along any of the four
//! canonical directions. The scan is brute force over every stone: the
//! board is small and fixed.

use crate::board::{Board, BoardState, GameStatus, Pos, Stone, TOTAL_CELLS};

use super::line::{scan_line, Direction, WIN_LENGTH};

/// A completed five
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    pub winner: Stone,
    /// The five cells, starting from the stone the scan began at
    pub line: [Pos; WIN_LENGTH],
}

/// Find any five-in-a-row on the board.
///
/// Stones are visited row-major (black bitboard first, then white) and each
/// is scanned in the four canonical directions.
pub fn find_win(board: &Board) -> Option<Win> {
    for stone in [Stone::Black, Stone::White] {
        let stones = board.stones(stone)?;
        for pos in stones.iter_ones() {
            for dir in Direction::ALL {
                let line = scan_line(board, pos, dir);
                if line.is_five() {
                    let mut cells = [pos; WIN_LENGTH];
                    cells.copy_from_slice(&line.cells);
                    return Some(Win {
                        winner: stone,
                        line: cells,
                    });
                }
            }
        }
    }
    None
}

/// Check a snapshot for a winner
#[inline]
pub fn check_winner(state: &BoardState) -> Option<Win> {
    find_win(state.board())
}

/// Derive the status tag: a five wins, a full move count with no five is a draw
pub fn game_status(state: &BoardState) -> GameStatus {
    if let Some(win) = check_winner(state) {
        if let Some(status) = GameStatus::won_by(win.winner) {
            return status;
        }
    }
    if state.move_count() as usize >= TOTAL_CELLS {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stone: Stone, cells: impl IntoIterator<Item = (u8, u8)>) -> Board {
        let mut board = Board::new();
        for (r, c) in cells {
            board.place_stone(Pos::new(r, c), stone);
        }
        board
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let board = board_with(Stone::Black, (0..5).map(|i| (9, i)));
        let win = find_win(&board).unwrap();
        assert_eq!(win.winner, Stone::Black);
        assert_eq!(win.line[0], Pos::new(9, 0));
        assert_eq!(win.line[4], Pos::new(9, 4));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let board = board_with(Stone::White, (0..5).map(|i| (i, 9)));
        assert_eq!(find_win(&board).map(|w| w.winner), Some(Stone::White));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let board = board_with(Stone::White, (0..5).map(|i| (i, i)));
        assert_eq!(find_win(&board).map(|w| w.winner), Some(Stone::White));
    }

    #[test]
    fn test_diagonal_sw_five() {
        // Diagonal from (4, 8) to (8, 4)
        let board = board_with(Stone::Black, (0..5).map(|i| (4 + i, 8 - i)));
        let win = find_win(&board).unwrap();
        assert_eq!(win.line[0], Pos::new(4, 8));
        assert_eq!(win.line[4], Pos::new(8, 4));
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let board = board_with(Stone::Black, (0..6).map(|i| (9, i)));
        assert!(find_win(&board).is_some());
    }

    #[test]
    fn test_four_in_row_not_win() {
        let board = board_with(Stone::Black, (0..4).map(|i| (9, i)));
        assert!(find_win(&board).is_none());
    }

    #[test]
    fn test_broken_five_not_win() {
        let board = board_with(Stone::Black, [(3, 0), (3, 1), (3, 3), (3, 4), (3, 5)]);
        assert!(find_win(&board).is_none());
    }

    #[test]
    fn test_five_at_corner() {
        let board = board_with(Stone::White, (0..5).map(|i| (10 + i, 10 + i)));
        assert_eq!(find_win(&board).map(|w| w.line[4]), Some(Pos::new(14, 14)));
    }

    #[test]
    fn test_no_winner() {
        let state = BoardState::new();
        assert_eq!(check_winner(&state), None);
        assert_eq!(game_status(&state), GameStatus::InProgress);
    }

    #[test]
    fn test_game_status_win() {
        let state = BoardState::replay(&["A1", "O15", "B1", "O14", "C1", "O13", "D1", "O12", "E1"]).unwrap();
        assert_eq!(game_status(&state), GameStatus::BlackWon);
    }

    #[test]
    fn test_game_status_draw_at_full_count() {
        // Pairs of columns alternate owner and every row flips the pairing,
        // so no direction ever holds more than two in a row.
        let mut state = BoardState::new();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            let band = (pos.col as usize / 2 + pos.row as usize) % 2;
            let stone = if band == 0 { Stone::Black } else { Stone::White };
            state = state.apply(pos, stone).unwrap();
        }
        assert!(check_winner(&state).is_none());
        assert_eq!(game_status(&state), GameStatus::Draw);
    }
}
