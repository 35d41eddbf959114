// Toolbar, status bar and action-log panel rendering
use eframe::egui;
use std::time::Instant;

use crate::app::{ContentPane, Dekanat};
use crate::style;
use crate::view::UiAction;

impl Dekanat {
    pub(crate) fn render_toolbar(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let mut search_rect = None;

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.history.back_enabled(), egui::Button::new("⬅"))
                .on_hover_text("Back (Alt+Left)")
                .clicked()
            {
                actions.push(UiAction::Back);
            }
            if ui
                .add_enabled(self.history.forward_enabled(), egui::Button::new("➡"))
                .on_hover_text("Forward (Alt+Right)")
                .clicked()
            {
                actions.push(UiAction::Forward);
            }
            if ui
                .add_enabled(self.current_folder.is_some(), egui::Button::new("⬆"))
                .on_hover_text("Up (Backspace)")
                .clicked()
            {
                actions.push(UiAction::Up);
            }
            if ui
                .add_enabled(self.current_folder.is_some(), egui::Button::new("⟳"))
                .on_hover_text("Refresh")
                .clicked()
            {
                actions.push(UiAction::Refresh);
            }

            ui.separator();
            self.render_breadcrumb(ui, actions);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .selectable_label(self.show_logs, "📜")
                    .on_hover_text("Action log")
                    .clicked()
                {
                    actions.push(UiAction::ToggleLogs);
                }
                if ui.button("🗑").on_hover_text("Trash").clicked() {
                    actions.push(UiAction::OpenTrash);
                }
                if ui
                    .add_enabled(self.undo.can_redo(), egui::Button::new("↷"))
                    .on_hover_text("Redo")
                    .clicked()
                {
                    actions.push(UiAction::Redo);
                }
                if ui
                    .add_enabled(self.undo.can_undo(), egui::Button::new("↶"))
                    .on_hover_text("Undo")
                    .clicked()
                {
                    actions.push(UiAction::Undo);
                }

                ui.separator();

                if self.search.in_flight {
                    ui.spinner();
                }
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search.query)
                        .hint_text("Search students...")
                        .desired_width(style::SEARCH_BOX_WIDTH),
                );
                if response.changed() {
                    self.search.note_edited(Instant::now());
                }
                search_rect = Some(response.rect);
                ui.label("🔍");
            });
        });
        ui.add_space(4.0);

        if self.search.open {
            if let Some(rect) = search_rect {
                self.render_search_results(ui.ctx(), rect, actions);
            }
        }
    }

    fn render_breadcrumb(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        if self.breadcrumb.is_empty() {
            ui.weak("Select an item in the tree");
            return;
        }
        let last = self.breadcrumb.len() - 1;
        for (index, segment) in self.breadcrumb.iter().enumerate() {
            if index > 0 {
                ui.label("›");
            }
            if index == last {
                ui.strong(&segment.name);
            } else if ui.link(&segment.name).clicked() {
                actions.push(UiAction::Select(segment.item_type, segment.id));
            }
        }
    }

    fn render_search_results(
        &self,
        ctx: &egui::Context,
        anchor: egui::Rect,
        actions: &mut Vec<UiAction>,
    ) {
        let Some(results) = &self.search.results else {
            return;
        };

        egui::Area::new("search_results".into())
            .fixed_pos(anchor.left_bottom() + egui::vec2(0.0, 6.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(style::SEARCH_POPUP_WIDTH);
                    ui.set_max_height(style::SEARCH_POPUP_MAX_HEIGHT);

                    ui.horizontal(|ui| {
                        ui.strong(format!("Found: {}", results.total));
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.small_button("✕").clicked() {
                                    actions.push(UiAction::DismissSearch);
                                }
                            },
                        );
                    });
                    ui.separator();

                    if results.hits.is_empty() {
                        ui.weak("No matches");
                        return;
                    }

                    egui::ScrollArea::vertical()
                        .id_salt("search_scroll")
                        .show(ui, |ui| {
                            for hit in &results.hits {
                                let row = ui.horizontal(|ui| {
                                    ui.label("👤");
                                    ui.vertical(|ui| {
                                        ui.horizontal(|ui| {
                                            ui.label(&hit.full_name);
                                            if !hit.login.is_empty() {
                                                ui.weak(format!("({})", hit.login));
                                            }
                                            if hit.is_elder {
                                                style::badge(ui, "Elder", style::ELDER);
                                            }
                                            if !hit.is_active {
                                                style::badge(ui, "Inactive", style::INACTIVE);
                                            }
                                        });
                                        ui.weak(&hit.path);
                                    });
                                });
                                let response = row.response.interact(egui::Sense::click());
                                if response.clicked() {
                                    actions.push(UiAction::OpenSearchHit(hit.id));
                                }
                                ui.separator();
                            }
                        });
                });
            });
    }

    pub(crate) fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.content {
                ContentPane::Ready(content) => {
                    ui.label(format!("{} items", content.item_count()));
                }
                ContentPane::Loading => {
                    ui.label("Loading...");
                }
                _ => {
                    ui.label("Ready");
                }
            }
            if let Some(location) = self.history.current() {
                if let Some(utc) = chrono::DateTime::from_timestamp(location.timestamp, 0) {
                    let local = utc.with_timezone(&chrono::Local);
                    ui.weak(format!("visited {}", local.format("%H:%M")));
                }
            }
            if let Some((message, _)) = &self.info_message {
                ui.label("|");
                ui.colored_label(style::SUCCESS, message);
            } else if let Some((message, _)) = &self.error_message {
                ui.label("|");
                ui.colored_label(style::DANGER, message);
            }
        });
    }

    pub(crate) fn render_logs_panel(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading("Action log");
            if ui.button("⟳").on_hover_text("Reload").clicked() {
                actions.push(UiAction::ReloadLogs);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    actions.push(UiAction::ToggleLogs);
                }
            });
        });
        ui.separator();

        if self.logs_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading log entries...");
            });
            return;
        }
        if let Some(error) = &self.logs_error {
            ui.colored_label(style::DANGER, error);
            return;
        }
        let Some(logs) = &self.logs else {
            return;
        };
        if logs.is_empty() {
            ui.weak("No recorded actions");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("logs_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                use egui_extras::{Column, TableBuilder};
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(140.0))
                    .column(Column::initial(120.0).clip(true))
                    .column(Column::initial(90.0))
                    .column(Column::initial(90.0))
                    .column(Column::remainder().clip(true))
                    .column(Column::initial(100.0))
                    .header(style::HEADER_HEIGHT, |mut header| {
                        header.col(|ui| {
                            ui.label("Time");
                        });
                        header.col(|ui| {
                            ui.label("User");
                        });
                        header.col(|ui| {
                            ui.label("Action");
                        });
                        header.col(|ui| {
                            ui.label("Model");
                        });
                        header.col(|ui| {
                            ui.label("Details");
                        });
                        header.col(|ui| {
                            ui.label("IP");
                        });
                    })
                    .body(|body| {
                        body.rows(style::ROW_HEIGHT, logs.len(), |mut row| {
                            let entry = &logs[row.index()];
                            row.col(|ui| {
                                ui.label(&entry.time);
                            });
                            row.col(|ui| {
                                style::truncated_label(ui, &entry.user);
                            });
                            row.col(|ui| {
                                ui.label(&entry.action);
                            });
                            row.col(|ui| {
                                ui.label(&entry.model);
                            });
                            row.col(|ui| {
                                style::truncated_label(ui, entry.details_line());
                            });
                            row.col(|ui| {
                                ui.label(entry.ip.as_deref().unwrap_or(""));
                            });
                        });
                    });
            });
    }
}
