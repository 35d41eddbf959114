// Hierarchy tree panel - lazy children, persisted expansion, drop targets
use eframe::egui;

use crate::app::Dekanat;
use crate::model::{DraggedItem, FolderChild, ItemType};
use crate::state::node_key;
use crate::style;
use crate::view::UiAction;

impl Dekanat {
    pub(crate) fn render_tree_panel(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading("Structure");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button("➕")
                    .on_hover_text("New education level")
                    .clicked()
                {
                    actions.push(UiAction::OpenCreate {
                        item_type: ItemType::Level,
                        parent: None,
                    });
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("tree_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                match self.tree_roots.clone() {
                    Some(roots) if roots.is_empty() => {
                        ui.weak("No education levels yet");
                    }
                    Some(roots) => {
                        for child in &roots {
                            self.render_tree_node(ui, child, 0, actions);
                        }
                    }
                    None => {
                        if self.tree_loading.contains("root") {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label("Loading...");
                            });
                        } else if ui.button("⟳ Retry").clicked() {
                            self.request_tree_roots();
                        }
                    }
                }
            });
    }

    fn render_tree_node(
        &mut self,
        ui: &mut egui::Ui,
        child: &FolderChild,
        depth: usize,
        actions: &mut Vec<UiAction>,
    ) {
        let item_type = child.item_type;
        let id = child.id;
        // Only branches whose children are containers expand here;
        // group members live in the central pane, not the tree.
        let expandable = item_type.child_type().map_or(false, |c| c.is_container());
        let expanded = expandable && self.expanded.contains(item_type, id);
        let selected = self.selected_node == Some((item_type, id));

        let row = ui.horizontal(|ui| {
            ui.add_space(depth as f32 * style::TREE_INDENT);

            if expandable {
                let arrow = if expanded { "⏷" } else { "⏵" };
                if ui
                    .add(egui::Button::new(arrow).frame(false).small())
                    .clicked()
                {
                    let now_open = self.expanded.toggle(item_type, id);
                    self.expanded.save();
                    if now_open && !self.tree_children.contains_key(&node_key(item_type, id)) {
                        self.request_tree_children(item_type, id);
                    }
                }
            } else {
                ui.add_space(18.0);
            }

            if item_type == ItemType::Group {
                let payload = DraggedItem {
                    item_type,
                    id,
                    name: child.name.clone(),
                    source: None,
                };
                let drag_id = egui::Id::new(("tree_drag", item_type.wire_name(), id));
                let drag = ui.dnd_drag_source(drag_id, payload.clone(), |ui| {
                    ui.label("⠿");
                });
                if drag.response.drag_started() {
                    actions.push(UiAction::DragStarted(payload));
                }
            }

            let label = format!("{} {}", item_type.icon(), child.name);
            if ui.selectable_label(selected, label).clicked() {
                actions.push(UiAction::Select(item_type, id));
            }
            if child.count > 0 {
                ui.weak(child.count.to_string());
            }
        });

        if item_type.is_container() {
            let response = &row.response;
            if response.dnd_hover_payload::<DraggedItem>().is_some() {
                ui.painter().rect_filled(
                    response.rect,
                    egui::CornerRadius::same(2),
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

        if expanded {
            let key = node_key(item_type, id);
            match self.tree_children.get(&key).cloned() {
                Some(children) if children.is_empty() => {
                    ui.horizontal(|ui| {
                        ui.add_space((depth + 1) as f32 * style::TREE_INDENT + 18.0);
                        ui.weak("empty");
                    });
                }
                Some(children) => {
                    for nested in &children {
                        self.render_tree_node(ui, nested, depth + 1, actions);
                    }
                }
                None => {
                    if self.tree_loading.contains(&key) {
                        ui.horizontal(|ui| {
                            ui.add_space((depth + 1) as f32 * style::TREE_INDENT + 18.0);
                            ui.spinner();
                        });
                    }
                }
            }
        }
    }
}
