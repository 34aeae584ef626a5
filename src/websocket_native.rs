//! Native WebSocket client for connecting to the engine
//!
//! Uses tokio-tungstenite in a background thread, with channel-based message passing.
//! The worker reconnects according to the configured [`ReconnectPolicy`] until the
//! client is closed or dropped. Every established connection gets exactly one
//! CONNECT handshake, written before `Open` is reported.

use crate::config::HubConfig;
use crate::core::{OutboundMessage, ReconnectPolicy};
use crate::error::TransportError;
use crate::transport::Transport;
use crate::ws_state::{ReadyState, WsEvent};
use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::{mpsc as tokio_mpsc, watch};
use tracing::{debug, error, info, warn};

/// Outbound frame sender for the currently open connection
type Outbound = Arc<Mutex<Option<tokio_mpsc::UnboundedSender<String>>>>;

/// Native WebSocket client that runs in a background thread
pub struct NativeWsClient {
    /// Receiver for transport events
    rx: Receiver<WsEvent>,
    /// Shared connection state
    state: Arc<Mutex<ReadyState>>,
    /// Writer for the live connection, `None` while disconnected
    outbound: Outbound,
    /// Flipped to `true` to stop the worker
    shutdown: watch::Sender<bool>,
    worker: Option<JoinHandle<()>>,
}

impl NativeWsClient {
    /// Connect to the configured endpoint
    ///
    /// Spawns a background thread with a tokio runtime to handle the connection.
    /// Events are delivered through [`Transport::poll_event`].
    pub fn connect(config: &HubConfig) -> Self {
        let (tx, rx): (Sender<WsEvent>, Receiver<WsEvent>) = mpsc::channel();
        let state = Arc::new(Mutex::new(ReadyState::Uninstantiated));
        let outbound: Outbound = Arc::new(Mutex::new(None));
        let (shutdown, shutdown_rx) = watch::channel(false);

        let url = config.ws_url.clone();
        let policy = config.reconnect;
        let worker = Worker {
            tx,
            state: state.clone(),
            outbound: outbound.clone(),
            handshake: OutboundMessage::connect(&config.client_id, &config.protocol_version)
                .to_json(),
        };

        let handle = std::thread::Builder::new()
            .name("hub-ws".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!(error = %e, "Failed to create tokio runtime");
                        worker.set_state(ReadyState::Closed);
                        return;
                    }
                };
                rt.block_on(worker.run(&url, policy, shutdown_rx));
            });

        let worker = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!(error = %e, "Failed to spawn WebSocket thread");
                *state.lock() = ReadyState::Closed;
                None
            }
        };

        Self {
            rx,
            state,
            outbound,
            shutdown,
            worker,
        }
    }
}

impl Transport for NativeWsClient {
    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        if !self.state.lock().is_open() {
            return Err(TransportError::NotOpen);
        }
        match &*self.outbound.lock() {
            Some(tx) => tx
                .send(text.to_string())
                .map_err(|_| TransportError::ChannelClosed),
            None => Err(TransportError::NotOpen),
        }
    }

    fn poll_event(&self) -> Option<WsEvent> {
        self.rx.try_recv().ok()
    }

    fn close(&self) {
        // send_replace never fails even if the worker is gone
        self.shutdown.send_replace(true);
    }
}

impl Drop for NativeWsClient {
    fn drop(&mut self) {
        self.close();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("WebSocket thread panicked");
            }
        }
    }
}

/// State owned by the background thread
struct Worker {
    tx: Sender<WsEvent>,
    state: Arc<Mutex<ReadyState>>,
    outbound: Outbound,
    /// Serialized CONNECT envelope
    handshake: String,
}

impl Worker {
    fn set_state(&self, next: ReadyState) {
        *self.state.lock() = next;
        // Receiver gone means the client is being dropped
        let _ = self.tx.send(WsEvent::State(next));
    }

    async fn run(self, url: &str, policy: ReconnectPolicy, mut shutdown: watch::Receiver<bool>) {
        let mut attempt = 0u32;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let stop = self.run_connection(url, &mut attempt, &mut shutdown).await;
            if stop {
                break;
            }

            attempt += 1;
            let Some(delay) = policy.next_delay(attempt) else {
                warn!(attempt, "Reconnect attempts exhausted");
                break;
            };
            debug!(attempt, delay_ms = delay.as_millis() as u64, "Scheduling reconnect");

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        *self.outbound.lock() = None;
        if *self.state.lock() != ReadyState::Closed {
            self.set_state(ReadyState::Closed);
        }
        info!("WebSocket worker stopped");
    }

    /// One connection lifetime. Returns `true` when the worker should stop.
    async fn run_connection(
        &self,
        url: &str,
        attempt: &mut u32,
        shutdown: &mut watch::Receiver<bool>,
    ) -> bool {
        use futures_util::{SinkExt, StreamExt};
        use tokio_tungstenite::{connect_async, tungstenite::Message};

        info!(url, "Connecting to WebSocket");
        self.set_state(ReadyState::Connecting);

        let connected = tokio::select! {
            res = connect_async(url) => res,
            _ = shutdown.changed() => return true,
        };

        let ws_stream = match connected {
            Ok((stream, _)) => {
                info!("WebSocket connected");
                *attempt = 0;
                stream
            }
            Err(e) => {
                error!(error = %e, "Failed to connect");
                self.set_state(ReadyState::Closed);
                return false;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        // Handshake goes out before any queued intent can reach this socket
        if let Err(e) = write.send(Message::Text(self.handshake.clone().into())).await {
            error!(error = %e, "Failed to send handshake");
            self.set_state(ReadyState::Closed);
            return false;
        }
        debug!("Handshake sent");

        let (out_tx, mut out_rx) = tokio_mpsc::unbounded_channel::<String>();
        *self.outbound.lock() = Some(out_tx);
        self.set_state(ReadyState::Open);

        let stop = loop {
            tokio::select! {
                msg = read.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        if self.tx.send(WsEvent::Message(text.to_string())).is_err() {
                            // Receiver dropped, exit
                            break true;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        warn!(?frame, "WebSocket closed by server");
                        break false;
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "WebSocket error");
                        break false;
                    }
                    None => {
                        warn!("WebSocket stream ended");
                        break false;
                    }
                    _ => {}
                },
                Some(text) = out_rx.recv() => {
                    if let Err(e) = write.send(Message::Text(text.into())).await {
                        error!(error = %e, "Failed to send frame");
                        break false;
                    }
                }
                _ = shutdown.changed() => {
                    self.set_state(ReadyState::Closing);
                    if let Err(e) = write.send(Message::Close(None)).await {
                        debug!(error = %e, "Close frame not delivered");
                    }
                    break true;
                }
            }
        };

        *self.outbound.lock() = None;
        self.set_state(ReadyState::Closed);
        stop
    }
}
