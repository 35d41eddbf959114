// Central pane rendering - folder grid, student table, placeholders
use eframe::egui;

use crate::app::{ContentPane, Dekanat};
use crate::model::{
    ContentPayload, DraggedItem, FolderChild, FolderContent, ItemType, StudentRow,
};
use crate::state::PendingDeletion;
use crate::style;
use crate::view::UiAction;

impl Dekanat {
    pub(crate) fn render_content_pane(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        match &self.content {
            ContentPane::Idle => {
                ui.centered_and_justified(|ui| {
                    ui.weak("Select an item in the tree to see its contents");
                });
            }
            ContentPane::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading data...");
                    });
                });
            }
            ContentPane::Failed(message) => {
                let message = message.clone();
                self.render_error_placeholder(ui, &message, actions);
            }
            ContentPane::Ready(content) => {
                let content = content.clone();
                self.render_ready_content(ui, &content, actions);
            }
        }
    }

    fn render_error_placeholder(
        &self,
        ui: &mut egui::Ui,
        message: &str,
        actions: &mut Vec<UiAction>,
    ) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("⚠").size(36.0).color(style::DANGER));
            ui.add_space(8.0);
            ui.colored_label(style::DANGER, "Failed to load content");
            ui.weak(message);
            ui.add_space(10.0);
            if self.current_folder.is_some() && ui.button("Try again").clicked() {
                actions.push(UiAction::Refresh);
            }
        });
    }

    fn render_ready_content(
        &mut self,
        ui: &mut egui::Ui,
        content: &FolderContent,
        actions: &mut Vec<UiAction>,
    ) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if content.title.is_empty() {
                ui.heading("Overview");
            } else {
                ui.heading(&content.title);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some((item_type, _)) = content.location() {
                    if let Some(child_type) = item_type.child_type() {
                        let label = format!("➕ Add {}", child_type.display_name());
                        if ui.button(label).clicked() {
                            actions.push(UiAction::OpenCreate {
                                item_type: child_type,
                                parent: content.location(),
                            });
                        }
                    }
                }
            });
        });
        ui.separator();

        match &content.payload {
            ContentPayload::Students { students } if students.is_empty() => {
                self.render_empty_placeholder(
                    ui,
                    "👥",
                    "No students in this group yet",
                    content,
                    actions,
                );
            }
            ContentPayload::Students { students } => {
                self.render_student_table(ui, students, content.location(), actions);
            }
            ContentPayload::Folder { children } if children.is_empty() => {
                self.render_empty_placeholder(ui, "📂", "This folder is empty", content, actions);
            }
            ContentPayload::Folder { children } => {
                self.render_folder_grid(ui, children, actions);
            }
        }
    }

    fn render_empty_placeholder(
        &self,
        ui: &mut egui::Ui,
        icon: &str,
        message: &str,
        content: &FolderContent,
        actions: &mut Vec<UiAction>,
    ) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(icon).size(40.0));
            ui.add_space(8.0);
            ui.label(message);
            if let Some((item_type, _)) = content.location() {
                if let Some(child_type) = item_type.child_type() {
                    ui.add_space(10.0);
                    let label = format!("➕ Add the first {}", child_type.display_name());
                    if ui.button(label).clicked() {
                        actions.push(UiAction::OpenCreate {
                            item_type: child_type,
                            parent: content.location(),
                        });
                    }
                }
            }
        });
    }

    fn render_student_table(
        &self,
        ui: &mut egui::Ui,
        students: &[StudentRow],
        group: Option<(ItemType, i64)>,
        actions: &mut Vec<UiAction>,
    ) {
        ui.horizontal(|ui| {
            ui.label(format!("Students: {}", students.len()));
        });
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_salt("students_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                use egui_extras::{Column, TableBuilder};
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(34.0))
                    .column(Column::auto().at_least(24.0))
                    .column(Column::remainder().clip(true))
                    .column(Column::initial(110.0).clip(true))
                    .column(Column::initial(170.0).clip(true))
                    .column(Column::initial(120.0).clip(true))
                    .column(Column::initial(84.0))
                    .column(Column::auto().at_least(60.0))
                    .header(style::HEADER_HEIGHT, |mut header| {
                        header.col(|ui| {
                            ui.label("#");
                        });
                        header.col(|ui| {
                            ui.label("");
                        });
                        header.col(|ui| {
                            ui.label("Name");
                        });
                        header.col(|ui| {
                            ui.label("Login");
                        });
                        header.col(|ui| {
                            ui.label("Email");
                        });
                        header.col(|ui| {
                            ui.label("Phone");
                        });
                        header.col(|ui| {
                            ui.label("Status");
                        });
                        header.col(|ui| {
                            ui.label("");
                        });
                    })
                    .body(|body| {
                        body.rows(style::ROW_HEIGHT, students.len(), |mut row| {
                            let index = row.index();
                            let student = &students[index];

                            row.col(|ui| {
                                ui.weak((index + 1).to_string());
                            });
                            row.col(|ui| {
                                let payload = DraggedItem {
                                    item_type: ItemType::Student,
                                    id: student.id,
                                    name: student.full_name.clone(),
                                    source: group,
                                };
                                let drag_id = egui::Id::new(("student_drag", student.id));
                                let drag =
                                    ui.dnd_drag_source(drag_id, payload.clone(), |ui| {
                                        ui.label("⠿");
                                    });
                                if drag.response.drag_started() {
                                    actions.push(UiAction::DragStarted(payload));
                                }
                            });
                            row.col(|ui| {
                                ui.label("👤");
                                style::truncated_label(ui, &student.full_name);
                                if student.is_elder {
                                    style::badge(ui, "Elder ⭐", style::ELDER);
                                }
                            });
                            row.col(|ui| {
                                ui.monospace(&student.login);
                            });
                            row.col(|ui| {
                                if student.email.is_empty() {
                                    ui.weak("—");
                                } else {
                                    style::truncated_label(ui, &student.email);
                                }
                            });
                            row.col(|ui| {
                                if student.phone.is_empty() {
                                    ui.weak("—");
                                } else {
                                    style::truncated_label(ui, &student.phone);
                                }
                            });
                            row.col(|ui| {
                                if student.is_active {
                                    style::badge(ui, "Active", style::SUCCESS);
                                } else {
                                    style::badge(ui, "Inactive", style::INACTIVE);
                                }
                            });
                            row.col(|ui| {
                                if ui.small_button("✏").on_hover_text("Edit").clicked() {
                                    actions.push(UiAction::OpenEdit(student.id));
                                }
                                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                                    actions.push(UiAction::OpenDelete(PendingDeletion {
                                        item_type: ItemType::Student,
                                        id: student.id,
                                        name: student.full_name.clone(),
                                    }));
                                }
                            });
                        });
                    });
            });
    }

    fn render_folder_grid(
        &mut self,
        ui: &mut egui::Ui,
        children: &[FolderChild],
        actions: &mut Vec<UiAction>,
    ) {
        egui::ScrollArea::vertical()
            .id_salt("folders_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(8.0);
                ui.horizontal_wrapped(|ui| {
                    for child in children {
                        self.render_folder_tile(ui, child, actions);
                    }
                });
            });
    }

    fn render_folder_tile(
        &mut self,
        ui: &mut egui::Ui,
        child: &FolderChild,
        actions: &mut Vec<UiAction>,
    ) {
        let item_type = child.item_type;
        let id = child.id;
        let editing = self
            .rename_edit
            .as_ref()
            .map_or(false, |edit| edit.matches(item_type, id));

        let inner = ui.allocate_ui(
            egui::vec2(style::TILE_WIDTH, style::TILE_HEIGHT),
            |ui| {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_size(egui::vec2(
                        style::TILE_WIDTH - 18.0,
                        style::TILE_HEIGHT - 18.0,
                    ));
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(item_type.icon()).size(30.0));

                        if editing {
                            if let Some(edit) = &mut self.rename_edit {
                                let response = ui.add(
                                    egui::TextEdit::singleline(&mut edit.buffer)
                                        .desired_width(style::TILE_WIDTH - 36.0),
                                );
                                if self.focus_input {
                                    response.request_focus();
                                    self.focus_input = false;
                                }
                                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                                    actions.push(UiAction::CancelRename);
                                } else if response.lost_focus() {
                                    actions.push(UiAction::CommitRename);
                                }
                            }
                        } else {
                            style::truncated_label(ui, &child.name);
                        }

                        ui.weak(format!("{} items", child.count));

                        ui.horizontal(|ui| {
                            if ui.small_button("✏").on_hover_text("Rename").clicked() {
                                actions.push(UiAction::BeginRename {
                                    item_type,
                                    id,
                                    name: child.name.clone(),
                                });
                            }
                            if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                                actions.push(UiAction::OpenDelete(PendingDeletion {
                                    item_type,
                                    id,
                                    name: child.name.clone(),
                                }));
                            }
                            if let Some(grandchild) = item_type.child_type() {
                                let hint = format!("Add {}", grandchild.display_name());
                                if ui.small_button("➕").on_hover_text(hint).clicked() {
                                    actions.push(UiAction::OpenCreate {
                                        item_type: grandchild,
                                        parent: Some((item_type, id)),
                                    });
                                }
                            }
                        });
                    });
                });
            },
        );

        let response = inner.response.interact(egui::Sense::click());
        if response.double_clicked() {
            actions.push(UiAction::Select(item_type, id));
        }

        if item_type.is_container() {
            if response.dnd_hover_payload::<DraggedItem>().is_some() {
                ui.painter().rect_filled(
                    response.rect,
                    egui::CornerRadius::same(4),
                    style::DROP_HIGHLIGHT,
                );
            }
            if let Some(payload) = response.dnd_release_payload::<DraggedItem>() {
                actions.push(UiAction::Drop {
                    item: (*payload).clone(),
                    target: (item_type, id),
                });
            }
        }
    }
}
