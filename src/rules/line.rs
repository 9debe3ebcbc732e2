//! Line scanner: the directional primitive every analysis builds on

use crate::board::{Board, Pos, Stone};

/// Stones needed in a row to win
pub const WIN_LENGTH: usize = 5;

/// The four canonical line directions. Each covers both signs of its axis,
/// so a run is never counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
    /// Down-right
    Diagonal,
    /// Down-left
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// (row step, col step)
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
            Direction::Diagonal => "diagonal (down-right)",
            Direction::AntiDiagonal => "diagonal (down-left)",
        }
    }
}

/// Same-owner run produced by [`scan_line`], at most [`WIN_LENGTH`] long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub owner: Stone,
    pub cells: Vec<Pos>,
}

impl Line {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// A full-length run is a win
    #[inline]
    pub fn is_five(&self) -> bool {
        self.cells.len() == WIN_LENGTH
    }
}

/// Walk from `origin` along `dir`, collecting cells owned like the origin.
///
/// Stops at the first mismatch, the board edge, or after five cells. An
/// empty origin yields an empty line.
pub fn scan_line(board: &Board, origin: Pos, dir: Direction) -> Line {
    let owner = board.get(origin);
    let mut cells = Vec::with_capacity(WIN_LENGTH);
    if owner == Stone::Empty {
        return Line { owner, cells };
    }

    let (dr, dc) = dir.delta();
    for step in 0..WIN_LENGTH as i32 {
        match origin.offset(dr, dc, step) {
            Some(pos) if board.get(pos) == owner => cells.push(pos),
            _ => break,
        }
    }

    Line { owner, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stone: Stone, cells: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in cells {
            board.place_stone(Pos::new(r, c), stone);
        }
        board
    }

    #[test]
    fn test_scan_stops_at_mismatch() {
        let mut board = board_with(Stone::Black, &[(7, 3), (7, 4), (7, 5)]);
        board.place_stone(Pos::new(7, 6), Stone::White);

        let line = scan_line(&board, Pos::new(7, 3), Direction::Horizontal);
        assert_eq!(line.owner, Stone::Black);
        assert_eq!(line.cells, vec![Pos::new(7, 3), Pos::new(7, 4), Pos::new(7, 5)]);
        assert!(!line.is_five());
    }

    #[test]
    fn test_scan_caps_at_five() {
        let board = board_with(Stone::White, &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (2, 5), (2, 6)]);
        let line = scan_line(&board, Pos::new(2, 0), Direction::Horizontal);
        assert_eq!(line.len(), 5);
        assert!(line.is_five());
    }

    #[test]
    fn test_scan_stops_at_edge() {
        let board = board_with(Stone::Black, &[(12, 2), (13, 1), (14, 0)]);
        let line = scan_line(&board, Pos::new(12, 2), Direction::AntiDiagonal);
        assert_eq!(line.len(), 3);
        assert_eq!(line.cells.last(), Some(&Pos::new(14, 0)));
    }

    #[test]
    fn test_scan_from_empty_origin() {
        let board = Board::new();
        let line = scan_line(&board, Pos::new(7, 7), Direction::Vertical);
        assert!(line.is_empty());
        assert_eq!(line.owner, Stone::Empty);
    }
}
