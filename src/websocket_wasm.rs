//! WASM WebSocket client for connecting to the engine
//!
//! Browser callbacks push [`WsEvent`]s into a shared buffer that the app drains in
//! `update()`. The CONNECT handshake is written from `onopen`, so it does not wait
//! for a repaint. On close the client schedules a reconnect with `setTimeout`
//! according to the configured [`ReconnectPolicy`].

use crate::config::HubConfig;
use crate::core::{OutboundMessage, ReconnectPolicy};
use crate::error::TransportError;
use crate::transport::Transport;
use crate::ws_state::{ReadyState, WsEvent};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

/// Shared event buffer — WS callbacks push, app drains in update()
pub type EventBuffer = Rc<RefCell<VecDeque<WsEvent>>>;

/// Callbacks attached to the current socket; dropped when the socket is replaced
struct Handlers {
    _on_open: Closure<dyn FnMut(JsValue)>,
    _on_msg: Closure<dyn FnMut(MessageEvent)>,
    _on_err: Closure<dyn FnMut(ErrorEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

struct Inner {
    url: String,
    policy: ReconnectPolicy,
    /// Serialized CONNECT envelope, written once per `onopen`
    handshake: String,
    events: EventBuffer,
    ws: RefCell<Option<WebSocket>>,
    handlers: RefCell<Option<Handlers>>,
    attempt: Cell<u32>,
    /// Pending `setTimeout` handle for the next reconnect
    timer: Cell<Option<i32>>,
    shut_down: Cell<bool>,
}

impl Inner {
    fn set_state(&self, next: ReadyState) {
        self.events.borrow_mut().push_back(WsEvent::State(next));
    }

    fn detach(&self) {
        if let Some(ws) = self.ws.borrow_mut().take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            if let Err(e) = ws.close() {
                debug!(?e, "Closing detached socket failed");
            }
        }
        self.handlers.borrow_mut().take();
    }
}

/// WASM WebSocket client
pub struct WsClient {
    inner: Rc<Inner>,
}

impl WsClient {
    /// Connect to the configured endpoint
    ///
    /// Events are buffered for the app to drain through [`Transport::poll_event`].
    pub fn connect(config: &HubConfig) -> Result<Self, JsValue> {
        let inner = Rc::new(Inner {
            url: config.ws_url.clone(),
            policy: config.reconnect,
            handshake: OutboundMessage::connect(&config.client_id, &config.protocol_version)
                .to_json(),
            events: Rc::new(RefCell::new(VecDeque::new())),
            ws: RefCell::new(None),
            handlers: RefCell::new(None),
            attempt: Cell::new(0),
            timer: Cell::new(None),
            shut_down: Cell::new(false),
        });

        open_socket(&inner)?;
        Ok(Self { inner })
    }
}

fn open_socket(inner: &Rc<Inner>) -> Result<(), JsValue> {
    info!(url = %inner.url, "Connecting to WebSocket");
    inner.detach();

    let ws = WebSocket::new(&inner.url)?;
    inner.set_state(ReadyState::Connecting);

    // On open - handshake on this socket, then reset the retry counter
    let weak = Rc::downgrade(inner);
    let opened = ws.clone();
    let on_open = Closure::wrap(Box::new(move |_| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        info!("WebSocket connected");
        match opened.send_with_str(&inner.handshake) {
            Ok(()) => debug!("Handshake sent"),
            Err(e) => error!(?e, "Failed to send handshake"),
        }
        inner.attempt.set(0);
        inner.set_state(ReadyState::Open);
    }) as Box<dyn FnMut(JsValue)>);
    ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

    // On message - push to buffer (processed in app update())
    let events = inner.events.clone();
    let on_msg = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() {
            let msg: String = txt.into();
            events.borrow_mut().push_back(WsEvent::Message(msg));
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));

    // On error - the browser always follows up with a close event
    let on_err = Closure::wrap(Box::new(move |e: ErrorEvent| {
        error!(error = %e.message(), "WebSocket error");
    }) as Box<dyn FnMut(ErrorEvent)>);
    ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));

    // On close
    let weak = Rc::downgrade(inner);
    let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
        warn!(code = e.code(), reason = %e.reason(), "WebSocket closed");
        if let Some(inner) = weak.upgrade() {
            inner.set_state(ReadyState::Closed);
            schedule_reconnect(&inner);
        }
    }) as Box<dyn FnMut(CloseEvent)>);
    ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    *inner.ws.borrow_mut() = Some(ws);
    *inner.handlers.borrow_mut() = Some(Handlers {
        _on_open: on_open,
        _on_msg: on_msg,
        _on_err: on_err,
        _on_close: on_close,
    });
    Ok(())
}

fn schedule_reconnect(inner: &Rc<Inner>) {
    if inner.shut_down.get() {
        return;
    }

    let attempt = inner.attempt.get() + 1;
    inner.attempt.set(attempt);
    let Some(delay) = inner.policy.next_delay(attempt) else {
        warn!(attempt, "Reconnect attempts exhausted");
        return;
    };
    let Some(window) = web_sys::window() else {
        error!("No window, cannot schedule reconnect");
        return;
    };

    debug!(attempt, delay_ms = delay.as_millis() as u64, "Scheduling reconnect");
    let weak: Weak<Inner> = Rc::downgrade(inner);
    // once_into_js frees the closure after it runs
    let callback = Closure::once_into_js(move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.timer.set(None);
        if inner.shut_down.get() {
            return;
        }
        if let Err(e) = open_socket(&inner) {
            error!(?e, "Failed to open WebSocket");
            inner.set_state(ReadyState::Closed);
            schedule_reconnect(&inner);
        }
    });

    let millis = delay.as_millis().min(i32::MAX as u128) as i32;
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        millis,
    ) {
        Ok(handle) => inner.timer.set(Some(handle)),
        Err(e) => error!(?e, "setTimeout failed"),
    }
}

impl Transport for WsClient {
    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        let ws = self.inner.ws.borrow();
        match ws.as_ref() {
            Some(ws) if ws.ready_state() == WebSocket::OPEN => ws
                .send_with_str(text)
                .map_err(|e| TransportError::Js(format!("{:?}", e))),
            _ => Err(TransportError::NotOpen),
        }
    }

    fn poll_event(&self) -> Option<WsEvent> {
        self.inner.events.borrow_mut().pop_front()
    }

    fn close(&self) {
        let inner = &self.inner;
        if inner.shut_down.replace(true) {
            return;
        }
        if let Some(handle) = inner.timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
        let had_socket = inner.ws.borrow().is_some();
        inner.detach();
        if had_socket {
            inner.set_state(ReadyState::Closed);
        }
        info!("WebSocket client closed");
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        self.close();
    }
}
