//! Noetic Hub - minimal front-end for a locally running engine
//!
//! Holds one WebSocket connection to the engine's ASP endpoint, keeps the latest
//! UI snapshot it streams, and sends user intents back. Three front-ends share
//! the same [`core::EngineSession`]:
//! - browser (`wasm` feature): egui on a canvas, `web-sys` socket
//! - desktop (`native` feature): the same egui view, tokio-tungstenite socket
//! - terminal (`cli` feature): `hub-cli` binary

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod time;
pub mod transport;
pub mod ws_state;

#[cfg(all(not(target_arch = "wasm32"), feature = "transport-native"))]
pub mod websocket_native;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod websocket_wasm;

#[cfg(any(all(target_arch = "wasm32", feature = "wasm"), feature = "native"))]
pub mod app;
#[cfg(any(all(target_arch = "wasm32", feature = "wasm"), feature = "native"))]
pub mod theme;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web {
    use crate::app::HubApp;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async {
            let canvas = web_sys::window()
                .expect("no window")
                .document()
                .expect("no document")
                .get_element_by_id("canvas")
                .expect("no canvas element")
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .expect("not a canvas element");

            eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(HubApp::new(cc)))),
                )
                .await
                .expect("Failed to start eframe");
        });
    }
}
