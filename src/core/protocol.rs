//! Envelope types exchanged with the engine over the ASP socket
//!
//! Outbound: `CONNECT` handshake and `INTENT`.
//! Inbound: `STATE_UPDATE` carries the UI snapshot; `ACK` and `CONFIRMATION`
//! are engine acknowledgements that are only logged.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Inbound type that replaces the UI snapshot
pub const STATE_UPDATE: &str = "STATE_UPDATE";
/// Engine reply to the handshake
pub const ACK: &str = "ACK";
/// Engine reply to an intent
pub const CONFIRMATION: &str = "CONFIRMATION";

/// Messages sent from the hub to the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    /// Handshake, sent once per connection
    Connect { client_id: String, version: String },
    /// User-triggered action, fire-and-forget
    Intent { payload: Value, ref_id: String },
}

impl OutboundMessage {
    pub fn connect(client_id: &str, version: &str) -> Self {
        OutboundMessage::Connect {
            client_id: client_id.to_string(),
            version: version.to_string(),
        }
    }

    /// Wrap a payload with a freshly generated correlation id
    pub fn intent(payload: Value) -> Self {
        OutboundMessage::Intent {
            payload,
            ref_id: new_ref_id(),
        }
    }

    /// Correlation id of an intent; handshakes carry none
    pub fn ref_id(&self) -> Option<&str> {
        match self {
            OutboundMessage::Intent { ref_id, .. } => Some(ref_id),
            OutboundMessage::Connect { .. } => None,
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing a tagged enum of String/Value fields cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Decoded inbound envelope
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// `STATE_UPDATE`; `None` when `payload.ui` is missing or null
    StateUpdate(Option<Value>),
    Ack(Ack),
    Confirmation(Confirmation),
    /// Any other `type`, kept only for logging
    Other(String),
}

impl InboundMessage {
    pub fn kind(&self) -> &str {
        match self {
            InboundMessage::StateUpdate(_) => STATE_UPDATE,
            InboundMessage::Ack(_) => ACK,
            InboundMessage::Confirmation(_) => CONFIRMATION,
            InboundMessage::Other(kind) => kind,
        }
    }
}

/// `{"type":"ACK","status":"CONNECTED","server_time":0}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub server_time: Option<Value>,
}

/// `{"type":"CONFIRMATION","status":"RECEIVED","ref_id":"..."}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ref_id: Option<String>,
}

/// Fresh correlation id for an outbound intent
fn new_ref_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Payload sent by the Ping control
pub fn ping_payload() -> Value {
    json!({ "text": "Hello Engine" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_envelope_shape() {
        let msg = OutboundMessage::connect("web-hub", "1.0");
        let json: Value = serde_json::from_str(&msg.to_json()).unwrap();
        assert_eq!(
            json,
            json!({"type": "CONNECT", "client_id": "web-hub", "version": "1.0"})
        );
    }

    #[test]
    fn intent_envelope_shape() {
        let msg = OutboundMessage::intent(ping_payload());
        let json: Value = serde_json::from_str(&msg.to_json()).unwrap();
        assert_eq!(json["type"], "INTENT");
        assert_eq!(json["payload"], json!({"text": "Hello Engine"}));
        let ref_id = json["ref_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(ref_id).is_ok());
        assert_eq!(msg.ref_id(), Some(ref_id));
    }

    #[test]
    fn handshake_has_no_ref_id() {
        assert_eq!(OutboundMessage::connect("web-hub", "1.0").ref_id(), None);
    }

    #[test]
    fn intent_ref_ids_differ() {
        let a = OutboundMessage::intent(Value::Null);
        let b = OutboundMessage::intent(Value::Null);
        assert_ne!(a, b);
    }
}
