//! Platform-agnostic core - shared between the browser, desktop and CLI front-ends

pub mod parser;
pub mod protocol;
pub mod reconnect;
pub mod render;
pub mod session;

pub use parser::parse_frame;
pub use protocol::{ping_payload, InboundMessage, OutboundMessage};
pub use reconnect::ReconnectPolicy;
pub use render::{format_age, snapshot_text, SNAPSHOT_PLACEHOLDER};
pub use session::{EngineSession, FrameOutcome, SessionStats};
