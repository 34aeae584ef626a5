//! Shared WebSocket connection state
//!
//! Used by both WASM and native WebSocket clients.

/// WebSocket ready state, mirroring the browser `WebSocket.readyState` values
/// plus an extra state for "no socket created yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadyState {
    #[default]
    Uninstantiated,
    Connecting,
    Open,
    Closing,
    Closed,
}

impl ReadyState {
    pub fn is_open(&self) -> bool {
        matches!(self, ReadyState::Open)
    }

    /// Human-readable status label shown by the views
    pub fn label(&self) -> &'static str {
        match self {
            ReadyState::Uninstantiated => "Uninstantiated",
            ReadyState::Connecting => "Connecting",
            ReadyState::Open => "Open",
            ReadyState::Closing => "Closing",
            ReadyState::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Event delivered from a transport to the session, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WsEvent {
    /// Transport moved to a new ready state
    State(ReadyState),
    /// Inbound text frame, unparsed
    Message(String),
}
