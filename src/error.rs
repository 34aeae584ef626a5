//! Error types for the transport and frame-decoding seams

use thiserror::Error;

/// Failure to hand an outbound frame to the transport
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("socket is not open")]
    NotOpen,
    #[error("transport worker has shut down")]
    ChannelClosed,
    #[error("browser websocket error: {0}")]
    Js(String),
}

/// Failure to decode an inbound frame into an envelope
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("envelope has no string `type` field")]
    MissingType,
}
