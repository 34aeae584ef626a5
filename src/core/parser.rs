//! Frame parser for engine WebSocket messages
//!
//! Accepts every text frame, decodes it as JSON and classifies it by its
//! `type` field. Filtering happens after decode, in the session.

use super::protocol::{Ack, Confirmation, InboundMessage, ACK, CONFIRMATION, STATE_UPDATE};
use crate::error::FrameError;
use serde_json::Value;
use tracing::trace;

/// Decode one inbound text frame
pub fn parse_frame(msg: &str) -> Result<InboundMessage, FrameError> {
    trace!(len = msg.len(), "Parsing frame");

    let mut json: Value = serde_json::from_str(msg)?;

    let kind = json
        .get("type")
        .and_then(Value::as_str)
        .ok_or(FrameError::MissingType)?
        .to_string();

    let message = match kind.as_str() {
        STATE_UPDATE => {
            let ui = json
                .get_mut("payload")
                .and_then(|payload| payload.get_mut("ui"))
                .map(Value::take)
                .filter(|ui| !ui.is_null());
            InboundMessage::StateUpdate(ui)
        }
        // Acknowledgements are informational; a malformed one degrades to the default
        ACK => InboundMessage::Ack(serde_json::from_value(json).unwrap_or_default()),
        CONFIRMATION => {
            InboundMessage::Confirmation(serde_json::from_value(json).unwrap_or_default())
        }
        _ => InboundMessage::Other(kind),
    };

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_state_update() {
        let msg = r#"{"type":"STATE_UPDATE","payload":{"ui":{"count":1}}}"#;
        let parsed = parse_frame(msg).unwrap();
        assert_eq!(parsed, InboundMessage::StateUpdate(Some(json!({"count": 1}))));
    }

    #[test]
    fn test_falsy_ui_values_are_applied() {
        let parsed = parse_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":0}}"#).unwrap();
        assert_eq!(parsed, InboundMessage::StateUpdate(Some(json!(0))));

        for ui in [json!(false), json!(""), json!([]), json!({})] {
            let frame = json!({"type": "STATE_UPDATE", "payload": {"ui": ui}}).to_string();
            assert_eq!(parse_frame(&frame).unwrap(), InboundMessage::StateUpdate(Some(ui)));
        }
    }

    #[test]
    fn test_state_update_without_ui() {
        let parsed = parse_frame(r#"{"type":"STATE_UPDATE","payload":{}}"#).unwrap();
        assert_eq!(parsed, InboundMessage::StateUpdate(None));

        let parsed = parse_frame(r#"{"type":"STATE_UPDATE"}"#).unwrap();
        assert_eq!(parsed, InboundMessage::StateUpdate(None));

        let parsed = parse_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":null}}"#).unwrap();
        assert_eq!(parsed, InboundMessage::StateUpdate(None));
    }

    #[test]
    fn test_parse_acknowledgements() {
        let ack = parse_frame(r#"{"type":"ACK","status":"CONNECTED","server_time":0}"#).unwrap();
        match ack {
            InboundMessage::Ack(ack) => {
                assert_eq!(ack.status.as_deref(), Some("CONNECTED"));
                assert_eq!(ack.server_time, Some(json!(0)));
            }
            other => panic!("expected ACK, got {:?}", other),
        }

        let conf =
            parse_frame(r#"{"type":"CONFIRMATION","status":"RECEIVED","ref_id":"abc"}"#).unwrap();
        match conf {
            InboundMessage::Confirmation(c) => assert_eq!(c.ref_id.as_deref(), Some("abc")),
            other => panic!("expected CONFIRMATION, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_other() {
        let parsed = parse_frame(r#"{"type":"PING"}"#).unwrap();
        assert_eq!(parsed, InboundMessage::Other("PING".into()));
        assert_eq!(parsed.kind(), "PING");
    }

    #[test]
    fn test_rejects_invalid_frames() {
        assert!(matches!(parse_frame("not-json"), Err(FrameError::Json(_))));
        assert!(matches!(parse_frame("[1,2,3]"), Err(FrameError::MissingType)));
        assert!(matches!(parse_frame(r#"{"type":7}"#), Err(FrameError::MissingType)));
    }
}
