//! Engine session: the single owner of connection state and the latest UI snapshot
//!
//! Views own one `EngineSession`, call [`EngineSession::poll`] once per frame and
//! read the exposed state. The transport writes the CONNECT handshake itself on
//! each new socket; the session only sends intents. Dropping the session drops
//! its transport, which closes the socket and cancels any pending reconnect.

use super::parser::parse_frame;
use super::protocol::{InboundMessage, OutboundMessage};
use crate::time::now_seconds;
use crate::transport::Transport;
use crate::ws_state::{ReadyState, WsEvent};
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

/// What happened to one inbound frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Snapshot replaced
    Applied,
    /// Decoded but not a usable `STATE_UPDATE`
    Ignored,
    /// Not valid JSON or no `type`
    Rejected,
}

/// Running counters for the diagnostics line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames_received: u64,
    pub frames_rejected: u64,
    pub frames_ignored: u64,
    pub snapshots_applied: u64,
    pub intents_sent: u64,
    pub intents_dropped: u64,
}

pub struct EngineSession<T: Transport> {
    transport: T,
    state: ReadyState,
    snapshot: Option<Value>,
    raw_message: Option<String>,
    last_snapshot_at: Option<f64>,
    stats: SessionStats,
}

impl<T: Transport> EngineSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: ReadyState::Uninstantiated,
            snapshot: None,
            raw_message: None,
            last_snapshot_at: None,
            stats: SessionStats::default(),
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.state
    }

    /// Latest UI tree from the engine
    pub fn snapshot(&self) -> Option<&Value> {
        self.snapshot.as_ref()
    }

    /// Last inbound frame verbatim, decoded or not
    pub fn raw_message(&self) -> Option<&str> {
        self.raw_message.as_deref()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Seconds since the snapshot was last replaced
    pub fn snapshot_age(&self) -> Option<f64> {
        self.last_snapshot_at.map(|at| now_seconds() - at)
    }

    #[cfg(test)]
    fn transport(&self) -> &T {
        &self.transport
    }

    /// Drain all buffered transport events. Returns how many were handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.transport.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: WsEvent) {
        match event {
            WsEvent::State(state) => self.set_state(state),
            WsEvent::Message(text) => {
                self.apply_frame(&text);
            }
        }
    }

    fn set_state(&mut self, next: ReadyState) {
        if next == self.state {
            return;
        }
        info!(from = %self.state, to = %next, "Connection state changed");
        self.state = next;
    }

    /// Process one raw inbound frame. Never panics on bad input.
    pub fn apply_frame(&mut self, text: &str) -> FrameOutcome {
        self.stats.frames_received += 1;
        self.raw_message = Some(text.to_string());

        let message = match parse_frame(text) {
            Ok(message) => message,
            Err(e) => {
                error!(error = %e, len = text.len(), "Failed to parse ASP message");
                self.stats.frames_rejected += 1;
                return FrameOutcome::Rejected;
            }
        };
        trace!(kind = message.kind(), "Dispatching ASP message");

        match message {
            InboundMessage::StateUpdate(Some(ui)) => {
                trace!("Setting UI state");
                self.snapshot = Some(ui);
                self.last_snapshot_at = Some(now_seconds());
                self.stats.snapshots_applied += 1;
                FrameOutcome::Applied
            }
            InboundMessage::StateUpdate(None) => {
                debug!("STATE_UPDATE without payload.ui ignored");
                self.stats.frames_ignored += 1;
                FrameOutcome::Ignored
            }
            InboundMessage::Ack(ack) => {
                debug!(status = ?ack.status, server_time = ?ack.server_time, "Engine acknowledged handshake");
                self.stats.frames_ignored += 1;
                FrameOutcome::Ignored
            }
            InboundMessage::Confirmation(conf) => {
                debug!(ref_id = ?conf.ref_id, status = ?conf.status, "Engine confirmed intent");
                self.stats.frames_ignored += 1;
                FrameOutcome::Ignored
            }
            InboundMessage::Other(_) => {
                self.stats.frames_ignored += 1;
                FrameOutcome::Ignored
            }
        }
    }

    /// Send an intent. Returns the generated `ref_id` when the frame reached the
    /// transport; sends while disconnected are dropped and logged.
    pub fn send_intent(&mut self, payload: Value) -> Option<String> {
        let intent = OutboundMessage::intent(payload);
        let ref_id = intent.ref_id().unwrap_or_default().to_string();

        match self.transport.send_text(&intent.to_json()) {
            Ok(()) => {
                self.stats.intents_sent += 1;
                debug!(ref_id = %ref_id, "Intent sent");
                Some(ref_id)
            }
            Err(e) => {
                self.stats.intents_dropped += 1;
                warn!(ref_id = %ref_id, error = %e, "Intent dropped");
                None
            }
        }
    }

    /// Close the transport and stop reconnecting
    pub fn close(&mut self) {
        self.transport.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocol::ping_payload;
    use crate::error::TransportError;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashSet, VecDeque};

    /// In-memory transport recording every frame written to it
    #[derive(Default)]
    struct MockTransport {
        pub sent: RefCell<Vec<String>>,
        pub events: RefCell<VecDeque<WsEvent>>,
        pub state: Cell<ReadyState>,
        pub closed: Cell<bool>,
    }

    impl MockTransport {
        pub fn push(&self, event: WsEvent) {
            if let WsEvent::State(state) = event {
                self.state.set(state);
            }
            self.events.borrow_mut().push_back(event);
        }

        pub fn sent_json(&self) -> Vec<Value> {
            self.sent
                .borrow()
                .iter()
                .map(|s| serde_json::from_str(s).unwrap())
                .collect()
        }
    }

    impl Transport for MockTransport {
        fn send_text(&self, text: &str) -> Result<(), TransportError> {
            if !self.state.get().is_open() {
                return Err(TransportError::NotOpen);
            }
            self.sent.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn poll_event(&self) -> Option<WsEvent> {
            self.events.borrow_mut().pop_front()
        }

        fn close(&self) {
            self.closed.set(true);
            self.state.set(ReadyState::Closed);
        }
    }

    fn session() -> EngineSession<MockTransport> {
        EngineSession::new(MockTransport::default())
    }

    fn open_session() -> EngineSession<MockTransport> {
        let mut s = session();
        s.transport().push(WsEvent::State(ReadyState::Connecting));
        s.transport().push(WsEvent::State(ReadyState::Open));
        s.poll();
        s
    }

    #[test]
    fn state_update_replaces_snapshot() {
        let mut s = session();
        let outcome = s.apply_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":{"count":1,"items":[1,2]}}}"#);
        assert_eq!(outcome, FrameOutcome::Applied);
        assert_eq!(s.snapshot(), Some(&json!({"count": 1, "items": [1, 2]})));

        // Replacement, not merge
        s.apply_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":{"other":true}}}"#);
        assert_eq!(s.snapshot(), Some(&json!({"other": true})));
        assert_eq!(s.stats().snapshots_applied, 2);
        assert!(s.snapshot_age().is_some());
    }

    #[test]
    fn scenario_ping_and_garbage_keep_snapshot() {
        let mut s = session();
        s.apply_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":{"count":1}}}"#);
        assert_eq!(s.snapshot(), Some(&json!({"count": 1})));

        assert_eq!(s.apply_frame(r#"{"type":"PING"}"#), FrameOutcome::Ignored);
        assert_eq!(s.snapshot(), Some(&json!({"count": 1})));

        assert_eq!(s.apply_frame("not-json"), FrameOutcome::Rejected);
        assert_eq!(s.snapshot(), Some(&json!({"count": 1})));
        assert_eq!(s.raw_message(), Some("not-json"));

        let stats = s.stats();
        assert_eq!(stats.frames_received, 3);
        assert_eq!(stats.frames_ignored, 1);
        assert_eq!(stats.frames_rejected, 1);
    }

    #[test]
    fn state_update_without_ui_is_ignored() {
        let mut s = session();
        s.apply_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":{"count":1}}}"#);
        assert_eq!(
            s.apply_frame(r#"{"type":"STATE_UPDATE","payload":{}}"#),
            FrameOutcome::Ignored
        );
        assert_eq!(s.snapshot(), Some(&json!({"count": 1})));
    }

    #[test]
    fn acknowledgements_do_not_touch_snapshot() {
        let mut s = session();
        s.apply_frame(r#"{"type":"ACK","status":"CONNECTED","server_time":0}"#);
        s.apply_frame(r#"{"type":"CONFIRMATION","status":"RECEIVED","ref_id":"x"}"#);
        assert!(s.snapshot().is_none());
        assert_eq!(s.stats().frames_ignored, 2);
    }

    #[test]
    fn state_changes_write_nothing() {
        let mut s = open_session();
        assert_eq!(s.ready_state(), ReadyState::Open);

        // Stale and repeated transitions drained late must not touch the socket
        s.transport().push(WsEvent::State(ReadyState::Open));
        s.transport().push(WsEvent::State(ReadyState::Closed));
        s.transport().push(WsEvent::State(ReadyState::Connecting));
        s.transport().push(WsEvent::State(ReadyState::Open));
        assert_eq!(s.poll(), 4);
        assert_eq!(s.ready_state(), ReadyState::Open);
        assert!(s.transport().sent.borrow().is_empty());
    }

    #[test]
    fn intents_have_unique_ref_ids() {
        let mut s = open_session();
        let mut ids = HashSet::new();
        for _ in 0..50 {
            let id = s.send_intent(ping_payload()).unwrap();
            assert!(ids.insert(id));
        }

        let sent = s.transport().sent_json();
        // one envelope per intent
        assert_eq!(sent.len(), 50);
        for envelope in &sent {
            assert_eq!(envelope["type"], "INTENT");
            assert_eq!(envelope["payload"], json!({"text": "Hello Engine"}));
            assert!(ids.contains(envelope["ref_id"].as_str().unwrap()));
        }
        assert_eq!(s.stats().intents_sent, 50);
    }

    #[test]
    fn intent_dropped_when_not_open() {
        let mut s = session();
        assert_eq!(s.send_intent(json!({"text": "hi"})), None);
        assert!(s.transport().sent.borrow().is_empty());
        assert_eq!(s.stats().intents_dropped, 1);
    }

    #[test]
    fn poll_routes_messages() {
        let mut s = open_session();
        s.transport().push(WsEvent::Message(
            r#"{"type":"STATE_UPDATE","payload":{"ui":[1,2,3]}}"#.into(),
        ));
        assert_eq!(s.poll(), 1);
        assert_eq!(s.snapshot(), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn close_reaches_transport() {
        let mut s = open_session();
        s.close();
        assert!(s.transport().closed.get());
    }

    #[test]
    fn falsy_ui_replaces_snapshot() {
        let mut s = session();
        s.apply_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":{"count":1}}}"#);
        let outcome = s.apply_frame(r#"{"type":"STATE_UPDATE","payload":{"ui":0}}"#);
        assert_eq!(outcome, FrameOutcome::Applied);
        assert_eq!(s.snapshot(), Some(&json!(0)));
    }
}
