//! Window-based shape classifier
//!
//! A window is five consecutive cells along one canonical direction. Windows
//! holding any opponent stone carry no shape and are skipped. The cells just
//! outside the window ("flanks") decide whether a shape is open or blocked; a
//! flank off the board counts as blocked.

use std::collections::HashSet;
use std::fmt;

use crate::board::{Board, BoardState, Pos, Stone, TOTAL_CELLS};
use crate::rules::{Direction, WIN_LENGTH};

/// Shape kinds, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    /// Five in the window: already won
    Five,
    /// Contiguous four, both flanks free: two ways to complete
    OpenFour,
    /// Four with one way to complete (one flank blocked, or a gap inside)
    BlockedFour,
    /// Three with both flanks free: becomes an open four
    OpenThree,
    /// Three with exactly one flank free
    BlockedThree,
}

impl Shape {
    pub fn label(self) -> &'static str {
        match self {
            Shape::Five => "Five",
            Shape::OpenFour => "OpenFour",
            Shape::BlockedFour => "BlockedFour",
            Shape::OpenThree => "OpenThree",
            Shape::BlockedThree => "BlockedThree",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub shape: Shape,
    pub owner: Stone,
    pub direction: Direction,
    /// The five window cells in line order
    pub window: [Pos; WIN_LENGTH],
    /// The owner's stones inside the window
    pub stones: Vec<Pos>,
    /// Empty cells that would complete or extend the shape, row-major
    pub recommended: Vec<Pos>,
    pub description: String,
}

impl Pattern {
    /// Order-independent identity used to drop repeat detections
    fn key(&self) -> (Shape, Stone, Vec<Pos>) {
        let mut stones = self.stones.clone();
        stones.sort();
        (self.shape, self.owner, stones)
    }
}

/// Classify every window for both sides, dropping duplicates.
///
/// Two detections are the same pattern when shape, owner and stone set match;
/// the first one found (Black before White, windows in row-major origin
/// order, directions in canonical order) is kept.
pub fn analyze_patterns(state: &BoardState) -> Vec<Pattern> {
    let board = state.board();
    let mut seen = HashSet::new();
    let mut patterns = Vec::new();

    for owner in [Stone::Black, Stone::White] {
        for idx in 0..TOTAL_CELLS {
            let origin = Pos::from_index(idx);
            for dir in Direction::ALL {
                let Some(pattern) = classify_window(board, origin, dir, owner) else {
                    continue;
                };
                if seen.insert(pattern.key()) {
                    patterns.push(pattern);
                }
            }
        }
    }

    log::debug!("pattern analysis found {} shapes", patterns.len());
    patterns
}

/// Cells of the window starting at `origin`, or None if it runs off the board
fn window_cells(origin: Pos, dir: Direction) -> Option<[Pos; WIN_LENGTH]> {
    let (dr, dc) = dir.delta();
    let mut cells = [origin; WIN_LENGTH];
    for (step, cell) in cells.iter_mut().enumerate() {
        *cell = origin.offset(dr, dc, step as i32)?;
    }
    Some(cells)
}

/// Flank cell if it is on the board and empty
fn open_flank(board: &Board, origin: Pos, dir: Direction, steps: i32) -> Option<Pos> {
    let (dr, dc) = dir.delta();
    origin
        .offset(dr, dc, steps)
        .filter(|&pos| board.is_empty(pos))
}

fn classify_window(board: &Board, origin: Pos, dir: Direction, owner: Stone) -> Option<Pattern> {
    let window = window_cells(origin, dir)?;

    let mut stones = Vec::with_capacity(WIN_LENGTH);
    let mut empties = Vec::with_capacity(WIN_LENGTH);
    for &cell in &window {
        match board.get(cell) {
            s if s == owner => stones.push(cell),
            Stone::Empty => empties.push(cell),
            _ => return None,
        }
    }

    let before = open_flank(board, origin, dir, -1);
    let after = open_flank(board, origin, dir, WIN_LENGTH as i32);
    let line = dir.name();

    let (shape, mut recommended, description) = match stones.len() {
        5 => (Shape::Five, Vec::new(), format!("five in a row on the {line} line, the game is won")),
        4 => {
            let gap = empties[0];
            let gap_at_start = gap == window[0];
            let gap_at_end = gap == window[WIN_LENGTH - 1];
            let contiguous = gap_at_start || gap_at_end;

            // Completion cells: the gap, plus the flank touching the run
            let mut recommended = vec![gap];
            if gap_at_start {
                recommended.extend(after);
            } else if gap_at_end {
                recommended.extend(before);
            }

            if contiguous && before.is_some() && after.is_some() {
                (
                    Shape::OpenFour,
                    recommended,
                    format!("open four on the {line} line, both ends free: it wins next move"),
                )
            } else {
                let detail = if contiguous { "one end blocked" } else { "with a gap" };
                (
                    Shape::BlockedFour,
                    recommended,
                    format!("four on the {line} line ({detail})"),
                )
            }
        }
        3 => {
            let shape = match (before.is_some(), after.is_some()) {
                (true, true) => Shape::OpenThree,
                (true, false) | (false, true) => Shape::BlockedThree,
                (false, false) => return None,
            };
            let mut recommended = empties.clone();
            recommended.extend(before);
            recommended.extend(after);
            let description = if shape == Shape::OpenThree {
                format!("open three on the {line} line, it can become an open four")
            } else {
                format!("three on the {line} line (one end blocked)")
            };
            (shape, recommended, description)
        }
        _ => return None,
    };

    recommended.sort();
    recommended.dedup();

    Some(Pattern {
        shape,
        owner,
        direction: dir,
        window,
        stones,
        recommended,
        description,
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

    fn shapes_of(patterns: &[Pattern], owner: Stone) -> Vec<Shape> {
        patterns
            .iter()
            .filter(|p| p.owner == owner)
            .map(|p| p.shape)
            .collect()
    }

    #[test]
    fn test_empty_board_has_no_patterns() {
        assert!(analyze_patterns(&BoardState::new()).is_empty());
    }

    #[test]
    fn test_open_four() {
        let state = state_with(&[(7, 3), (7, 4), (7, 5), (7, 6)], &[]);
        let patterns = analyze_patterns(&state);
        let four = patterns
            .iter()
            .find(|p| p.shape == Shape::OpenFour)
            .expect("open four");
        assert_eq!(four.owner, Stone::Black);
        assert_eq!(four.direction, Direction::Horizontal);
        assert_eq!(four.recommended, vec![Pos::new(7, 2), Pos::new(7, 7)]);
        assert!(!shapes_of(&patterns, Stone::Black).contains(&Shape::BlockedFour));
    }

    #[test]
    fn test_blocked_four_either_flank() {
        let stones = [(7, 3), (7, 4), (7, 5), (7, 6)];

        let left = analyze_patterns(&state_with(&stones, &[(7, 2)]));
        let right = analyze_patterns(&state_with(&stones, &[(7, 7)]));

        for patterns in [&left, &right] {
            let black = shapes_of(patterns, Stone::Black);
            assert!(black.contains(&Shape::BlockedFour));
            assert!(!black.contains(&Shape::OpenFour));
        }

        let rec = |patterns: &[Pattern]| {
            patterns
                .iter()
                .find(|p| p.shape == Shape::BlockedFour)
                .map(|p| p.recommended.clone())
        };
        assert_eq!(rec(left.as_slice()), Some(vec![Pos::new(7, 7)]));
        assert_eq!(rec(right.as_slice()), Some(vec![Pos::new(7, 2)]));
    }

    #[test]
    fn test_four_against_edge_is_blocked() {
        let state = state_with(&[(0, 0), (1, 0), (2, 0), (3, 0)], &[]);
        let patterns = analyze_patterns(&state);
        let black = shapes_of(&patterns, Stone::Black);
        assert!(black.contains(&Shape::BlockedFour));
        assert!(!black.contains(&Shape::OpenFour));
    }

    #[test]
    fn test_gapped_four_is_blocked_four() {
        let state = state_with(&[(4, 4), (4, 5), (4, 7), (4, 8)], &[]);
        let patterns = analyze_patterns(&state);
        let four = patterns
            .iter()
            .find(|p| p.shape == Shape::BlockedFour)
            .expect("gapped four");
        assert_eq!(four.recommended, vec![Pos::new(4, 6)]);
        assert!(four.description.contains("gap"));
    }

    #[test]
    fn test_five_recommends_nothing() {
        let state = state_with(&[(2, 2), (3, 3), (4, 4), (5, 5), (6, 6)], &[]);
        let patterns = analyze_patterns(&state);
        let five = patterns.iter().find(|p| p.shape == Shape::Five).unwrap();
        assert!(five.recommended.is_empty());
        assert_eq!(five.direction, Direction::Diagonal);
    }

    #[test]
    fn test_open_three_recommendations_include_flanks() {
        let state = state_with(&[], &[(5, 7), (6, 7), (7, 7)]);
        let patterns = analyze_patterns(&state);
        let three = patterns
            .iter()
            .find(|p| p.shape == Shape::OpenThree && p.owner == Stone::White)
            .unwrap();

        // Window H4..H8 is found first: internal empties H4, H5, flanks H3, H9
        assert_eq!(three.window[0], Pos::new(3, 7));
        assert_eq!(
            three.recommended,
            vec![Pos::new(2, 7), Pos::new(3, 7), Pos::new(4, 7), Pos::new(8, 7)]
        );
    }

    #[test]
    fn test_three_with_both_flanks_closed_is_ignored() {
        // Black three pinned between the board edge and a white stone
        let state = state_with(&[(0, 0), (0, 1), (0, 2)], &[(0, 5)]);
        let patterns = analyze_patterns(&state);
        let horizontal: Vec<_> = patterns
            .iter()
            .filter(|p| p.owner == Stone::Black && p.direction == Direction::Horizontal)
            .collect();
        assert!(horizontal.is_empty());
    }

    #[test]
    fn test_duplicates_collapse_by_stone_set() {
        // Windows starting at H4, H5 and H6 all see the same three stones
        let state = state_with(&[(5, 7), (6, 7), (7, 7)], &[]);
        let patterns = analyze_patterns(&state);
        let opens = patterns
            .iter()
            .filter(|p| p.shape == Shape::OpenThree)
            .count();
        assert_eq!(opens, 1);
    }

    #[test]
    fn test_mixed_windows_skipped() {
        let state = state_with(&[(7, 4), (7, 5), (7, 7)], &[(7, 6)]);
        let patterns = analyze_patterns(&state);
        assert!(shapes_of(&patterns, Stone::Black).is_empty());
    }

    #[test]
    fn test_shape_severity_order() {
        assert!(Shape::Five < Shape::OpenFour);
        assert!(Shape::OpenFour < Shape::BlockedFour);
        assert!(Shape::BlockedFour < Shape::OpenThree);
        assert!(Shape::OpenThree < Shape::BlockedThree);
    }
}
