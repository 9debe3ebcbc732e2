//! Board rendering for the Gomoku GUI

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::rules::WIN_LENGTH;

use super::theme::*;

/// Overlays drawn on top of the stones
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlays {
    pub last_move: Option<Pos>,
    pub hint: Option<Pos>,
    /// Cell the side to move must play (win or block)
    pub critical: Option<Pos>,
    pub winning_line: Option<[Pos; WIN_LENGTH]>,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    cell_size: f32,
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
        }
    }
}

/// Translucent stone of `turn`'s color
fn ghost(turn: Stone, alpha: u8) -> Option<Color32> {
    match turn {
        Stone::Black => Some(Color32::from_rgba_unmultiplied(20, 20, 20, alpha)),
        Stone::White => Some(Color32::from_rgba_unmultiplied(240, 240, 240, alpha)),
        Stone::Empty => None,
    }
}

impl BoardView {
    /// Render the board and return the clicked empty cell, if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        turn: Stone,
        overlays: &Overlays,
        accepts_input: bool,
    ) -> Option<Pos> {
        let available = ui.available_size();
        let board_size = available.x.min(available.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_coordinates(&painter);

        for stone in [Stone::Black, Stone::White] {
            for pos in board.stone_list(stone) {
                self.draw_stone(&painter, pos, stone);
            }
        }

        if let Some(pos) = overlays.last_move {
            painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        if let Some(pos) = overlays.critical {
            let radius = self.stone_radius() + 2.0;
            painter.circle_stroke(self.board_to_screen(pos), radius, Stroke::new(2.0, CRITICAL_MARKER));
        }
        if let Some(line) = &overlays.winning_line {
            self.draw_winning_line(&painter, line);
        }
        if let Some(pos) = overlays.hint {
            self.draw_hint(&painter, pos, turn);
        }

        if !accepts_input {
            return None;
        }
        let pos = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        let is_empty = board.is_empty(pos);
        let preview = if is_empty { ghost(turn, 80) } else { Some(HOVER_INVALID) };
        if let Some(color) = preview {
            painter.circle_filled(self.board_to_screen(pos), self.stone_radius(), color);
        }

        (response.clicked() && is_empty).then_some(pos)
    }

    #[inline]
    fn stone_radius(&self) -> f32 {
        self.cell_size * STONE_RADIUS_RATIO
    }

    /// Grid lines plus star points
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (BOARD_SIZE as f32 - 1.0) * self.cell_size;
        let origin = self.board_rect.min + Vec2::splat(BOARD_MARGIN);

        for i in 0..BOARD_SIZE {
            let offset = i as f32 * self.cell_size;
            painter.line_segment(
                [origin + Vec2::new(offset, 0.0), origin + Vec2::new(offset, span)],
                stroke,
            );
            painter.line_segment(
                [origin + Vec2::new(0.0, offset), origin + Vec2::new(span, offset)],
                stroke,
            );
        }

        for (row, col) in STAR_POINTS {
            painter.circle_filled(self.board_to_screen(Pos::new(row, col)), STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Letters A-O above and below, row numbers 1-15 from the top on both sides
    fn draw_coordinates(&self, painter: &Painter) {
        let font = FontId::proportional(12.0);
        let rect = self.board_rect;

        for i in 0..BOARD_SIZE {
            let along = BOARD_MARGIN + i as f32 * self.cell_size;
            let letter = ((b'A' + i as u8) as char).to_string();
            let number = (i + 1).to_string();

            for y in [rect.min.y + 12.0, rect.max.y - 12.0] {
                painter.text(Pos2::new(rect.min.x + along, y), Align2::CENTER_CENTER, &letter, font.clone(), GRID_LINE);
            }
            for x in [rect.min.x + 12.0, rect.max.x - 12.0] {
                painter.text(Pos2::new(x, rect.min.y + along), Align2::CENTER_CENTER, &number, font.clone(), GRID_LINE);
            }
        }
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.stone_radius();
        let shadow_alpha = if stone == Stone::Black { 60 } else { 40 };
        painter.circle_filled(
            center + Vec2::splat(2.0),
            radius,
            Color32::from_rgba_unmultiplied(0, 0, 0, shadow_alpha),
        );

        match stone {
            Stone::Black => {
                painter.circle_filled(center, radius, BLACK_STONE);
                painter.circle_filled(center - Vec2::splat(radius * 0.3), radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_STONE_SHADOW));
            }
            Stone::Empty => {}
        }
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos; WIN_LENGTH]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        for pair in line.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }
        for &pos in line {
            painter.circle_stroke(self.board_to_screen(pos), self.stone_radius() + 3.0, stroke);
        }
    }

    fn draw_hint(&self, painter: &Painter, pos: Pos, turn: Stone) {
        let Some(color) = ghost(turn, 100) else {
            return;
        };
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, self.stone_radius(), color);
        let mark = if turn == Stone::Black { WHITE_STONE } else { BLACK_STONE };
        painter.text(center, Align2::CENTER_CENTER, "?", FontId::proportional(14.0), mark);
    }

    /// Screen point to the nearest intersection
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;
        Pos::is_valid(row, col).then(|| Pos::new(row as u8, col as u8))
    }

    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + pos.col as f32 * self.cell_size,
                BOARD_MARGIN + pos.row as f32 * self.cell_size,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> BoardView {
        BoardView {
            cell_size: 30.0,
            board_rect: Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::splat(500.0)),
        }
    }

    #[test]
    fn test_intersections_map_back() {
        let view = view();
        for pos in [Pos::new(0, 0), Pos::CENTER, Pos::new(14, 3)] {
            let screen = view.board_to_screen(pos);
            assert_eq!(view.screen_to_board(screen), Some(pos));
            assert_eq!(view.screen_to_board(screen + Vec2::new(12.0, -12.0)), Some(pos));
        }
    }

    #[test]
    fn test_row_one_is_on_top() {
        let view = view();
        let a1 = view.board_to_screen(Pos::new(0, 0));
        let a15 = view.board_to_screen(Pos::new(14, 0));
        assert!(a1.y < a15.y);
        assert_eq!(view.screen_to_board(Pos2::new(0.0, 0.0)), None);
    }
}
