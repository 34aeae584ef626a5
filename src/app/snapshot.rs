//! Central panel: the UI snapshot as pretty JSON, or a placeholder

use eframe::egui;
use crate::core::snapshot_text;
use crate::theme::colors;
use super::HubApp;

impl HubApp {
    pub(crate) fn render_snapshot(&self, ui: &mut egui::Ui) {
        let snapshot = self.session.as_ref().and_then(|s| s.snapshot());

        egui::Frame::new()
            .fill(colors::BG_PANEL)
            .stroke(egui::Stroke::new(1.0, colors::BORDER))
            .corner_radius(4.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_size(ui.available_size());

                match snapshot {
                    Some(ui_tree) => {
                        egui::ScrollArea::both()
                            .id_salt("snapshot")
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(snapshot_text(Some(ui_tree)))
                                        .monospace()
                                        .color(colors::SNAPSHOT),
                                );
                            });
                    }
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label(
                                egui::RichText::new(snapshot_text(None))
                                    .color(colors::TEXT_MUTED),
                            );
                        });
                    }
                }
            });
    }
}
