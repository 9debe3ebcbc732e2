//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel};

use crate::board::{GameStatus, InputCommand, Stone};
use crate::config::Config;
use crate::engine::Route;
use crate::search::CriticalKind;

use super::board_view::{BoardView, Overlays};
use super::game_state::GameState;
use super::theme::*;

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    /// Coordinate typed in the side panel
    input: String,
    show_analysis: bool,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        Self {
            state: GameState::new(&config),
            board_view: BoardView::default(),
            input: String::new(),
            show_analysis: true,
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (play Black)").clicked() {
                        self.state.reset(Stone::Black);
                        ui.close_menu();
                    }
                    if ui.button("New Game (play White)").clicked() {
                        self.state.reset(Stone::White);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_analysis, "Analysis (A)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let side = self.state.human_side;
                    ui.label(format!("You: {} ({})", side.name(), side.symbol()));
                });
            });
        });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn card_title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(10.0).color(TEXT_MUTED));
        ui.add_space(6.0);
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(280.0)
            .max_width(340.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(10.0);

                    self.render_turn_card(ui);
                    ui.add_space(10.0);
                    self.render_input_card(ctx, ui);
                    ui.add_space(10.0);
                    self.render_actions_card(ui);
                    ui.add_space(10.0);
                    self.render_decision_card(ui);

                    if self.show_analysis {
                        ui.add_space(10.0);
                        self.render_analysis_card(ui);
                    }

                    if let Some(msg) = &self.state.message {
                        ui.add_space(10.0);
                        Frame::new()
                            .fill(egui::Color32::from_rgb(80, 60, 30))
                            .corner_radius(CornerRadius::same(8))
                            .inner_margin(10.0)
                            .show(ui, |ui| {
                                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                            });
                    }
                });
            });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let (headline, detail, color) = match self.state.state.status() {
                GameStatus::BlackWon => ("BLACK WINS".to_string(), "five in a row", WIN_HIGHLIGHT),
                GameStatus::WhiteWon => ("WHITE WINS".to_string(), "five in a row", WIN_HIGHLIGHT),
                GameStatus::Draw => ("DRAW".to_string(), "board is full", STATUS_WARNING),
                GameStatus::InProgress => {
                    let side = self.state.to_move();
                    let detail = if self.state.is_ai_thinking() {
                        "AI thinking..."
                    } else if self.state.is_human_turn() {
                        "Your turn"
                    } else {
                        "AI to move"
                    };
                    (format!("{} ({})", side.name().to_uppercase(), side.symbol()), detail, STATUS_OK)
                }
            };

            ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
            ui.label(RichText::new(detail).size(12.0).color(color));
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.state.move_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                ui.label(RichText::new(format!("{:.2}s", elapsed.as_secs_f32())).size(11.0).color(STATUS_WARNING));
            } else if let Some(time) = self.state.ai_thinking_time {
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Typed coordinate entry ("H8", or "quit")
    fn render_input_card(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "MOVE");
            ui.horizontal(|ui| {
                let edit = ui.add(egui::TextEdit::singleline(&mut self.input).desired_width(120.0).hint_text("e.g. H8"));
                let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Play").clicked() || entered {
                    match self.state.submit_text(&self.input) {
                        Ok(InputCommand::Quit) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                        Ok(InputCommand::Play(_)) => self.input.clear(),
                        Err(msg) => self.state.message = Some(msg),
                    }
                }
            });
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "ACTIONS");
            ui.horizontal(|ui| {
                if ui.add(egui::Button::new("Undo (U)").fill(BUTTON_BG)).clicked() {
                    self.state.undo();
                }
                if ui.add(egui::Button::new("Hint (H)").fill(BUTTON_BG)).clicked() {
                    self.state.request_hint();
                }
                if ui.add(egui::Button::new("New (N)").fill(BUTTON_BG)).clicked() {
                    let side = self.state.human_side;
                    self.state.reset(side);
                }
            });
        });
    }

    fn render_decision_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "LAST DECISION");
            let Some(decision) = &self.state.last_decision else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };

            let route_color = match decision.route {
                Route::CheckmateFound => WIN_HIGHLIGHT,
                Route::BothInvalid | Route::CommanderFallback | Route::SingleInvalid => {
                    STATUS_ALERT
                }
                Route::OneValid | Route::BothValidDelegate | Route::SingleAdvisor => STATUS_OK,
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new(decision.pos.to_string()).size(16.0).strong().color(TEXT_PRIMARY));
                ui.label(RichText::new(format!("{:?}", decision.route)).size(11.0).color(route_color));
            });
            ui.label(
                RichText::new(format!("from {:?}, {}ms", decision.adopted_from, decision.time_ms))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
            );
            ui.label(RichText::new(&decision.reason).size(11.0).color(TEXT_PRIMARY));
            if !decision.comment.is_empty() {
                ui.label(RichText::new(&decision.comment).size(10.0).color(TEXT_MUTED));
            }
        });
    }

    /// Pattern text, threats and the one-ply critical cell for the side to move
    fn render_analysis_card(&self, ui: &mut egui::Ui) {
        let report = &self.state.report;
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "ANALYSIS");

            if let Some(critical) = report.critical {
                let text = match critical.kind {
                    CriticalKind::Win => format!("{} wins on the spot", critical.pos),
                    CriticalKind::Block => format!("{} must be blocked", critical.pos),
                };
                ui.label(RichText::new(text).size(12.0).strong().color(CRITICAL_MARKER));
                ui.add_space(4.0);
            }

            if !report.info.threats.is_empty() {
                ui.label(
                    RichText::new(format!("Threats: {}", report.info.threats.join(", ")))
                        .size(11.0)
                        .color(STATUS_WARNING),
                );
                ui.add_space(4.0);
            }

            ui.label(RichText::new(&report.info.analysis_text).size(10.0).monospace().color(TEXT_SECONDARY));
        });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let overlays = Overlays {
                last_move: self.state.state.last_move(),
                hint: self.state.hint,
                critical: self
                    .show_analysis
                    .then(|| self.state.report.critical.map(|c| c.pos))
                    .flatten(),
                winning_line: self.state.winning_line,
            };
            let accepts_input = self.state.is_human_turn() && !self.state.is_ai_thinking();

            let clicked = self.board_view.show(
                ui,
                self.state.state.board(),
                self.state.to_move(),
                &overlays,
                accepts_input,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Keyboard shortcuts, ignored while typing a coordinate
    fn handle_input(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (undo, hint, new_game, analysis) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::A),
            )
        });

        if undo {
            self.state.undo();
        }
        if hint {
            self.state.request_hint();
        }
        if new_game {
            let side = self.state.human_side;
            self.state.reset(side);
        }
        if analysis {
            self.show_analysis = !self.show_analysis;
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
