use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_mode(mode: &str) -> Self {
        if mode.eq_ignore_ascii_case("light") {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_visuals(match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        });
    }
}

// --- Sizing ---
pub const ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = 20.0;
pub const TREE_INDENT: f32 = 14.0;
pub const TILE_WIDTH: f32 = 156.0;
pub const TILE_HEIGHT: f32 = 116.0;
pub const SEARCH_BOX_WIDTH: f32 = 220.0;
pub const SEARCH_POPUP_WIDTH: f32 = 340.0;
pub const SEARCH_POPUP_MAX_HEIGHT: f32 = 380.0;

// --- Modals ---
pub const MODAL_MIN_WIDTH: f32 = 300.0;
pub const MODAL_MAX_WIDTH: f32 = 520.0;
pub const MODAL_WIDTH_RATIO: f32 = 0.5;
pub const MODAL_HEIGHT_RATIO: f32 = 0.8;

// --- Timing ---
pub const MESSAGE_TIMEOUT_SECS: u64 = 3;

// --- Colors ---
pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(90, 180, 120);
pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 90, 90);
pub const ELDER: egui::Color32 = egui::Color32::from_rgb(200, 160, 40);
pub const INACTIVE: egui::Color32 = egui::Color32::from_gray(120);
pub const DROP_HIGHLIGHT: egui::Color32 =
    egui::Color32::from_rgba_premultiplied(40, 70, 110, 80);

// --- Helper functions ---

pub fn modal_width(ctx: &egui::Context) -> f32 {
    let width = ctx.input(|i| i.viewport().inner_rect.map(|r| r.width()).unwrap_or(800.0));
    (width * MODAL_WIDTH_RATIO).clamp(MODAL_MIN_WIDTH, MODAL_MAX_WIDTH)
}

pub fn modal_max_height(ctx: &egui::Context) -> f32 {
    let height = ctx.input(|i| i.viewport().inner_rect.map(|r| r.height()).unwrap_or(600.0));
    height * MODAL_HEIGHT_RATIO
}

pub fn truncated_label(ui: &mut egui::Ui, text: impl Into<egui::WidgetText>) -> egui::Response {
    ui.add(egui::Label::new(text).truncate())
}

/// Small rounded status badge, used for active/elder markers and
/// child-count bubbles.
pub fn badge(ui: &mut egui::Ui, text: impl Into<String>, fill: egui::Color32) {
    egui::Frame::default()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(5, 1))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(text.into())
                    .size(10.5)
                    .color(egui::Color32::WHITE),
            );
        });
}
