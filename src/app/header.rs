//! Header bar with title and connection status

use eframe::egui;
use crate::theme::{colors, status_color};
use crate::ws_state::ReadyState;
use super::HubApp;

impl HubApp {
    pub(crate) fn render_header(&self, ui: &mut egui::Ui) {
        let ws_state = self
            .session
            .as_ref()
            .map(|s| s.ready_state())
            .unwrap_or(ReadyState::Uninstantiated);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Noetic Hub").color(colors::TEXT_PRIMARY));
            ui.label(
                egui::RichText::new("v0.1")
                    .color(colors::TEXT_SECONDARY)
                    .monospace()
                    .strong(),
            );

            // RIGHT: status (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(
                    status_color(ws_state.is_open()),
                    egui::RichText::new(ws_state.label()).monospace(),
                );
                ui.label(egui::RichText::new("Status:").color(colors::TEXT_MUTED));
            });
        });
    }
}
