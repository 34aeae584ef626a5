//! Dark slate theme for the hub: near-black panels, green snapshot text

use egui::Color32;

pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(2, 6, 23);          // #020617 - slate-950
    pub const BG_PANEL: Color32 = Color32::from_rgb(23, 23, 23);          // #171717 - neutral-900
    pub const BG_HOVER: Color32 = Color32::from_rgb(38, 38, 38);          // #262626 - neutral-800

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(163, 163, 163); // #A3A3A3 - neutral-400
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(115, 115, 115);     // #737373 - neutral-500

    // === Snapshot & status ===
    pub const SNAPSHOT: Color32 = Color32::from_rgb(74, 222, 128);        // #4ADE80 - green-400
    pub const STATUS_OPEN: Color32 = Color32::from_rgb(34, 197, 94);      // #22C55E - green-500
    pub const STATUS_PENDING: Color32 = Color32::from_rgb(245, 158, 11);  // #F59E0B - amber-500

    pub const BORDER: Color32 = Color32::from_rgb(38, 38, 38);
}

/// Status label colour: green when open, amber for every other state
pub fn status_color(open: bool) -> Color32 {
    if open {
        colors::STATUS_OPEN
    } else {
        colors::STATUS_PENDING
    }
}

pub fn hub_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_PANEL;
    visuals.faint_bg_color = BG_PANEL;
    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.noninteractive.bg_fill = BG_PRIMARY;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.inactive.bg_fill = BG_PRIMARY;
    visuals.widgets.inactive.weak_bg_fill = BG_PRIMARY;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);

    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
