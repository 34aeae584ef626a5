//! Diagnostics line and raw frame mirror

use eframe::egui;
use crate::core::{format_age, SessionStats};
use crate::theme::colors;
use super::HubApp;

/// Format a count with human-readable suffix (1234 → "1234", 12345 → "12.3k", 5000000 → "5.0M")
fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// One-line counter summary shown under the controls
fn stats_line(stats: &SessionStats, age: &str) -> String {
    format!(
        "frames {} / ignored {} / rejected {} / snapshots {} / intents {} (dropped {}) / updated {} ago",
        format_count(stats.frames_received),
        format_count(stats.frames_ignored),
        format_count(stats.frames_rejected),
        format_count(stats.snapshots_applied),
        format_count(stats.intents_sent),
        format_count(stats.intents_dropped),
        age,
    )
}

impl HubApp {
    pub(crate) fn render_diagnostics(&self, ui: &mut egui::Ui) {
        let Some(session) = self.session.as_ref() else {
            ui.label(egui::RichText::new("no socket").color(colors::TEXT_MUTED));
            return;
        };
        let stats = session.stats();
        let age = session
            .snapshot_age()
            .map(format_age)
            .unwrap_or_else(|| "-".to_string());

        let line = stats_line(&stats, &age);
        ui.label(egui::RichText::new(line).color(colors::TEXT_MUTED).monospace().small());
    }

    pub(crate) fn render_raw_mirror(&self, ctx: &egui::Context) {
        let raw = self
            .session
            .as_ref()
            .and_then(|s| s.raw_message())
            .unwrap_or("(no frames yet)");

        egui::SidePanel::right("raw")
            .default_width(ctx.screen_rect().width() * 0.3)
            .min_width(200.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BG_PANEL).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Last frame:").color(colors::TEXT_MUTED));
                egui::ScrollArea::vertical()
                    .id_salt("raw")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(raw)
                                .monospace()
                                .color(colors::TEXT_SECONDARY),
                        );
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_suffixes() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(9_999), "9999");
        assert_eq!(format_count(12_345), "12.3k");
        assert_eq!(format_count(5_000_000), "5.0M");
    }

    #[test]
    fn stats_line_shows_drops() {
        let stats = SessionStats {
            frames_received: 12,
            frames_ignored: 3,
            frames_rejected: 1,
            snapshots_applied: 8,
            intents_sent: 4,
            intents_dropped: 2,
        };
        assert_eq!(
            stats_line(&stats, "4s"),
            "frames 12 / ignored 3 / rejected 1 / snapshots 8 / intents 4 (dropped 2) / updated 4s ago"
        );
    }
}
