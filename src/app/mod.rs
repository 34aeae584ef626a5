//! Hub egui app
//!
//! Runs on both native (desktop) and WASM (browser) platforms. The app owns the
//! [`EngineSession`]; dropping the app closes the socket.

mod diagnostics;
mod header;
mod snapshot;

use eframe::egui;
use std::time::Duration;
use tracing::info;

use crate::config::HubConfig;
use crate::core::{ping_payload, EngineSession};
use crate::theme::{colors, hub_visuals};

#[cfg(target_arch = "wasm32")]
use crate::websocket_wasm::WsClient as PlatformTransport;
#[cfg(not(target_arch = "wasm32"))]
use crate::websocket_native::NativeWsClient as PlatformTransport;

/// How often to repaint while idle so buffered socket events get drained
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Hub App - runs on both native and WASM
pub struct HubApp {
    /// `None` only if the browser refused to create a socket
    pub(crate) session: Option<EngineSession<PlatformTransport>>,
    /// Toggle raw frame mirror visibility
    pub(crate) show_raw: bool,
    /// Most recent intent ref_id, shown in the controls bar
    pub(crate) last_ref_id: Option<String>,
}

impl HubApp {
    /// Create new app for WASM platform
    #[cfg(target_arch = "wasm32")]
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(hub_visuals());

        let config = HubConfig::from_window();
        info!(url = %config.ws_url, "WebSocket URL resolved");
        let session = match PlatformTransport::connect(&config) {
            Ok(client) => Some(EngineSession::new(client)),
            Err(e) => {
                tracing::error!(?e, "Failed to create WebSocket");
                None
            }
        };

        Self {
            session,
            show_raw: false,
            last_ref_id: None,
        }
    }

    /// Create new app for native platform
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(cc: &eframe::CreationContext<'_>, config: HubConfig) -> Self {
        cc.egui_ctx.set_visuals(hub_visuals());
        let mut style = (*cc.egui_ctx.style()).clone();
        for (_text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size *= 1.25;
        }
        cc.egui_ctx.set_style(style);

        info!(url = %config.ws_url, "WebSocket URL resolved");
        let client = PlatformTransport::connect(&config);

        Self {
            session: Some(EngineSession::new(client)),
            show_raw: false,
            last_ref_id: None,
        }
    }

    /// Send the fixed Ping intent
    pub(crate) fn send_ping(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Some(ref_id) = session.send_intent(ping_payload()) {
                self.last_ref_id = Some(ref_id);
            }
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let ping = ui
                .button(egui::RichText::new("Ping ->").size(18.0))
                .on_hover_text("Send a test intent to the engine.");
            if ping.clicked() {
                self.send_ping();
            }

            if let Some(ref_id) = &self.last_ref_id {
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new(format!("last intent {}", ref_id))
                        .color(colors::TEXT_MUTED)
                        .monospace(),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let raw_text = if self.show_raw { "Raw <<<" } else { "Raw >>>" };
                if ui.button(egui::RichText::new(raw_text)).clicked() {
                    self.show_raw = !self.show_raw;
                }
            });
        });
    }
}

impl eframe::App for HubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Socket events arrive between frames; keep polling while idle
        ctx.request_repaint_after(POLL_INTERVAL);

        if let Some(session) = self.session.as_mut() {
            session.poll();
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(6.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        egui::TopBottomPanel::bottom("controls")
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(8.0))
            .show(ctx, |ui| {
                self.render_controls(ui);
                ui.add_space(4.0);
                self.render_diagnostics(ui);
            });

        // Raw mirror sidebar (must be shown before CentralPanel)
        if self.show_raw {
            self.render_raw_mirror(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(12.0))
            .show(ctx, |ui| {
                self.render_snapshot(ui);
            });
    }
}
