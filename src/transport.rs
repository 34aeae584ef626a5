//! Transport seam between the session and a concrete WebSocket client

use crate::error::TransportError;
use crate::ws_state::WsEvent;

/// A WebSocket-like connection that buffers inbound events until the owner drains them.
///
/// Implemented by the browser client (`web-sys`) and the native client
/// (tokio-tungstenite on a background thread). Implementations write the CONNECT
/// handshake on each new socket before reporting [`ReadyState::Open`].
///
/// [`ReadyState::Open`]: crate::ws_state::ReadyState::Open
pub trait Transport {
    /// Write one text frame. Fails with [`TransportError::NotOpen`] while disconnected;
    /// nothing is queued for later delivery.
    fn send_text(&self, text: &str) -> Result<(), TransportError>;

    /// Pop the next buffered event, if any
    fn poll_event(&self) -> Option<WsEvent>;

    /// Close the socket and cancel any pending reconnect
    fn close(&self);
}
