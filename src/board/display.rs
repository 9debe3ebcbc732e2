//! Fixed-width text render of the board for advisors

use std::fmt;

use super::board::Board;
use super::{Pos, BOARD_SIZE};

impl fmt::Display for Board {
    /// Column letters as a header, 1-based row numbers as a left gutter:
    ///
    /// ```text
    ///    A B C D E F G H I J K L M N O
    ///  1 . . . . . . . . . . . . . . .
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", (b'A' + col as u8) as char)?;
        }
        for row in 0..BOARD_SIZE {
            write!(f, "\n{:>2}", row + 1)?;
            for col in 0..BOARD_SIZE {
                let stone = self.get(Pos::new(row as u8, col as u8));
                write!(f, " {}", stone.symbol())?;
            }
        }
        Ok(())
    }
}

/// Join positions as "A1, B2, ..."
pub fn join_coords<'a, I>(cells: I) -> String
where
    I: IntoIterator<Item = &'a Pos>,
{
    cells
        .into_iter()
        .map(Pos::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_render_header_and_gutter() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0), Stone::Black);
        board.place_stone(Pos::new(14, 14), Stone::White);

        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), BOARD_SIZE + 1);
        assert_eq!(lines[0], "   A B C D E F G H I J K L M N O");
        assert_eq!(lines[1], " 1 X . . . . . . . . . . . . . .");
        assert_eq!(lines[15], "15 . . . . . . . . . . . . . . O");
    }

    #[test]
    fn test_join_coords() {
        let cells = [Pos::new(7, 7), Pos::new(9, 0)];
        assert_eq!(join_coords(&cells), "H8, A10");
        assert_eq!(join_coords(&[]), "");
    }
}
