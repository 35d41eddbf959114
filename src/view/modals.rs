// Modal rendering (create/edit forms, delete confirmation, trash viewer)
use eframe::egui;

use crate::app::{Dekanat, Modal};
use crate::model::ItemType;
use crate::state::{CreateForm, EditStudentModal, PendingDeletion, TrashModal, USER_TYPES};
use crate::style;
use crate::view::UiAction;

impl Dekanat {
    pub(crate) fn render_modals(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        match &mut self.modal {
            Modal::None => {}
            Modal::Create(form) => {
                render_create_modal(ctx, form, &mut self.focus_input, actions)
            }
            Modal::EditStudent(modal) => {
                render_edit_modal(ctx, modal, &mut self.focus_input, actions)
            }
            Modal::ConfirmDelete {
                pending,
                submitting,
            } => render_delete_modal(ctx, pending, *submitting, actions),
            Modal::Trash(trash) => render_trash_modal(ctx, trash, actions),
        }
    }
}

fn form_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    focus_input: &mut bool,
) -> egui::Response {
    ui.label(label);
    let response = ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
    if *focus_input {
        response.request_focus();
        *focus_input = false;
    }
    ui.add_space(6.0);
    response
}

fn render_create_modal(
    ctx: &egui::Context,
    form: &mut CreateForm,
    focus_input: &mut bool,
    actions: &mut Vec<UiAction>,
) {
    egui::Window::new(format!("Create {}", form.item_type.display_name()))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(style::modal_width(ctx))
        .show(ctx, |ui| {
            ui.set_max_height(style::modal_max_height(ctx));

            match form.item_type {
                ItemType::Student => {
                    form_field(ui, "Full name", &mut form.full_name, focus_input);
                    form_field(ui, "Login", &mut form.login, &mut false);
                    form_field(ui, "Email", &mut form.email, &mut false);
                    form_field(ui, "Phone", &mut form.phone, &mut false);
                    ui.checkbox(&mut form.is_elder, "Designate as elder");
                    ui.add_space(6.0);
                    ui.weak("The password is generated on the server and issued to the student");
                }
                ItemType::Level | ItemType::Form => {
                    form_field(ui, "Name", &mut form.name, focus_input);
                    ui.label("Sort order");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.order).desired_width(60.0),
                    );
                    ui.weak("Lower numbers sort first");
                    ui.add_space(6.0);
                }
                ItemType::Course => {
                    ui.label("Course number");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut form.number).desired_width(60.0),
                    );
                    if *focus_input {
                        response.request_focus();
                        *focus_input = false;
                    }
                    ui.add_space(6.0);
                }
                ItemType::Group => {
                    form_field(ui, "Group name", &mut form.name, focus_input);
                }
                ItemType::Department | ItemType::Employee => {
                    ui.weak("Creation for this type is not available");
                }
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let enabled = form.is_valid() && !form.submitting;
                if ui
                    .add_enabled(enabled, egui::Button::new("Create"))
                    .clicked()
                {
                    actions.push(UiAction::SubmitCreate);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::CloseModal);
                }
                if form.submitting {
                    ui.spinner();
                }
            });
        });
}

fn render_edit_modal(
    ctx: &egui::Context,
    modal: &mut EditStudentModal,
    focus_input: &mut bool,
    actions: &mut Vec<UiAction>,
) {
    egui::Window::new("Edit student")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(style::modal_width(ctx))
        .show(ctx, |ui| {
            ui.set_max_height(style::modal_max_height(ctx));

            match modal {
                EditStudentModal::Loading { .. } => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading data...");
                    });
                    ui.add_space(8.0);
                    if ui.button("Cancel").clicked() {
                        actions.push(UiAction::CloseModal);
                    }
                }
                EditStudentModal::Failed { message, .. } => {
                    ui.colored_label(style::DANGER, "Failed to load the record");
                    ui.weak(message.as_str());
                    ui.add_space(8.0);
                    if ui.button("Close").clicked() {
                        actions.push(UiAction::CloseModal);
                    }
                }
                EditStudentModal::Ready(form) => {
                    if !form.group_name.is_empty() {
                        ui.weak(format!("Group: {}", form.group_name));
                    }
                    if !form.created_at.is_empty() {
                        ui.weak(format!("Registered: {}", form.created_at));
                    }
                    ui.add_space(6.0);

                    form_field(ui, "Full name", &mut form.full_name, focus_input);
                    form_field(ui, "Login", &mut form.login, &mut false);

                    ui.label("Password");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut form.password)
                                .password(!form.show_password)
                                .desired_width(180.0),
                        );
                        let eye = if form.show_password { "🙈" } else { "👁" };
                        if ui.small_button(eye).on_hover_text("Show or hide").clicked() {
                            form.show_password = !form.show_password;
                        }
                        if ui
                            .small_button("🎲 Generate")
                            .on_hover_text("Generate a new password on the server")
                            .clicked()
                        {
                            actions.push(UiAction::GeneratePassword(form.id));
                        }
                    });
                    ui.add_space(6.0);

                    form_field(ui, "Email", &mut form.email, &mut false);
                    form_field(ui, "Phone", &mut form.phone, &mut false);

                    ui.label("User type");
                    let current = USER_TYPES
                        .iter()
                        .find(|(value, _)| *value == form.user_type)
                        .map(|(_, label)| *label)
                        .unwrap_or(form.user_type.as_str());
                    egui::ComboBox::from_id_salt("user_type")
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            for (value, label) in USER_TYPES {
                                ui.selectable_value(
                                    &mut form.user_type,
                                    value.to_string(),
                                    *label,
                                );
                            }
                        });
                    ui.add_space(6.0);

                    ui.checkbox(&mut form.is_active, "Active");
                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        let enabled = form.is_valid() && !form.submitting;
                        if ui
                            .add_enabled(enabled, egui::Button::new("Save changes"))
                            .clicked()
                        {
                            actions.push(UiAction::SubmitEdit);
                        }
                        if ui.button("Cancel").clicked() {
                            actions.push(UiAction::CloseModal);
                        }
                        if form.submitting {
                            ui.spinner();
                        }
                    });
                }
            }
        });
}

fn render_delete_modal(
    ctx: &egui::Context,
    pending: &PendingDeletion,
    submitting: bool,
    actions: &mut Vec<UiAction>,
) {
    egui::Window::new("Confirm deletion")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Delete {} \"{}\"?",
                pending.item_type.display_name(),
                pending.name
            ));
            if pending.item_type == ItemType::Student {
                ui.weak("Deleted students can be restored from the trash");
            }
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let delete = egui::Button::new(
                    egui::RichText::new("Delete").color(egui::Color32::WHITE),
                )
                .fill(style::DANGER);
                if ui.add_enabled(!submitting, delete).clicked() {
                    actions.push(UiAction::DeleteConfirmed);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::CloseModal);
                }
                if submitting {
                    ui.spinner();
                }
            });
        });
}

fn render_trash_modal(ctx: &egui::Context, trash: &mut TrashModal, actions: &mut Vec<UiAction>) {
    egui::Window::new("Trash")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(style::modal_width(ctx))
        .show(ctx, |ui| {
            ui.set_max_height(style::modal_max_height(ctx));

            if trash.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading trash...");
                });
            } else if let Some(error) = &trash.error {
                ui.colored_label(style::DANGER, error);
            } else if trash.items.is_empty() {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.weak("Trash is empty");
                });
                ui.add_space(20.0);
            } else {
                egui::ScrollArea::vertical()
                    .id_salt("trash_scroll")
                    .show(ui, |ui| {
                        for item in &trash.items {
                            ui.horizontal(|ui| {
                                let icon = if item.item_type == "student" {
                                    "👤"
                                } else {
                                    "📁"
                                };
                                ui.label(icon);
                                ui.vertical(|ui| {
                                    ui.strong(item.display_name());
                                    ui.weak(format!(
                                        "Deleted: {} · by {}",
                                        item.deleted_at, item.deleted_by
                                    ));
                                    if !item.expires_at.is_empty() {
                                        ui.weak(format!("Expires: {}", item.expires_at));
                                    }
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("↩ Restore").clicked() {
                                            actions.push(UiAction::Restore(item.id));
                                        }
                                    },
                                );
                            });
                            ui.separator();
                        }
                    });
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Clear cache").clicked() {
                    trash.confirm_clear = true;
                }
                if ui.button("Close").clicked() {
                    actions.push(UiAction::CloseModal);
                }
            });
        });

    if trash.confirm_clear {
        egui::Window::new("Clear trash cache?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 40.0])
            .show(ctx, |ui| {
                ui.label("Restored entries older than thirty days will be purged.");
                ui.colored_label(
                    style::DANGER,
                    "Purged items can no longer be restored!",
                );
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let clear = egui::Button::new(
                        egui::RichText::new("Clear").color(egui::Color32::WHITE),
                    )
                    .fill(style::DANGER);
                    if ui.add(clear).clicked() {
                        actions.push(UiAction::ClearCache);
                    }
                    if ui.button("Cancel").clicked() {
                        trash.confirm_clear = false;
                    }
                });
            });
    }
}
