use crate::{
    BroadcastRelay, ConnectionConfig, ConnectionId, Metrics, Result as WsErrorResult,
    ShutdownGuard, WsError, create_connection_span,
};

use relay_core::ClientEvent;

use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, close_code};
use error_location::ErrorLocation;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::Instrument;

/// How long the writer task may keep flushing after the connection ends
const SEND_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Manages a single subscriber connection
pub struct WebSocketConnection {
    relay: BroadcastRelay,
    config: ConnectionConfig,
    metrics: Metrics,
}

impl WebSocketConnection {
    pub fn new(relay: BroadcastRelay, config: ConnectionConfig, metrics: Metrics) -> Self {
        Self {
            relay,
            config,
            metrics,
        }
    }

    /// Handle the connection lifecycle: register, serve until close or shutdown, unregister
    pub async fn handle(
        self,
        socket: WebSocket,
        origin: String,
        shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let (mut ws_sender, ws_receiver) = socket.split();

        // Bounded outbound queue; the relay never waits on it
        let (tx, rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let connection_id = match self.relay.on_connect(origin.clone(), tx.clone()).await {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Refusing connection from {origin}: {e}");
                let code = match e {
                    WsError::ConnectionLimitExceeded { .. } => close_code::AGAIN,
                    _ => close_code::ERROR,
                };
                let _ = ws_sender
                    .send(Message::Close(Some(CloseFrame {
                        code,
                        reason: Utf8Bytes::from_static(e.error_code()),
                    })))
                    .await;
                return Err(e);
            }
        };

        let span = create_connection_span(&connection_id, &origin);
        self.serve(connection_id, ws_sender, ws_receiver, tx, rx, shutdown_guard)
            .instrument(span)
            .await
    }

    async fn serve(
        self,
        connection_id: ConnectionId,
        mut ws_sender: SplitSink<WebSocket, Message>,
        mut ws_receiver: SplitStream<WebSocket>,
        tx: mpsc::Sender<Message>,
        mut rx: mpsc::Receiver<Message>,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        self.metrics.connection_established();

        let send_task = tokio::spawn(
            async move {
                while let Some(msg) = rx.recv().await {
                    let closing = matches!(msg, Message::Close(_));
                    if ws_sender.send(msg).await.is_err() || closing {
                        break;
                    }
                }
                let _ = ws_sender.close().await;
            }
            .in_current_span(),
        );

        let timeout = Duration::from_secs(self.config.heartbeat_timeout_secs);
        let period = Duration::from_secs(self.config.heartbeat_interval_secs);
        let mut heartbeat = interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_seen = Instant::now();

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(msg)) => {
                            last_seen = Instant::now();
                            if matches!(msg, Message::Close(_)) {
                                log::debug!("Received close frame from connection {connection_id}");
                                break Ok(());
                            }
                            self.handle_client_message(connection_id, msg).await;
                        }
                        Some(Err(e)) => {
                            log::warn!("WebSocket error on connection {connection_id}: {e}");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {e}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            log::debug!("Connection {connection_id} closed by client");
                            break Ok(());
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > timeout {
                        log::warn!(
                            "Connection {connection_id} silent for over {}s, dropping",
                            timeout.as_secs()
                        );
                        break Err(WsError::HeartbeatTimeout {
                            timeout_secs: timeout.as_secs(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    // A full queue already means the peer is behind; skip this ping
                    let _ = tx.try_send(Message::Ping(Default::default()));
                }

                _ = shutdown_guard.wait() => {
                    log::debug!("Shutting down connection {connection_id} gracefully");
                    let _ = tx.try_send(Message::Close(Some(CloseFrame {
                        code: close_code::AWAY,
                        reason: Utf8Bytes::from_static("server shutting down"),
                    })));
                    break Ok(());
                }
            }
        };

        // Unregister first so the registry drops its sender clone
        self.relay.on_disconnect(connection_id).await;
        drop(tx);

        let abort = send_task.abort_handle();
        if tokio::time::timeout(SEND_DRAIN_TIMEOUT, send_task).await.is_err() {
            log::warn!("Writer for connection {connection_id} did not drain in time, aborting");
            abort.abort();
        }

        let reason = match &result {
            Ok(()) => "normal",
            Err(WsError::HeartbeatTimeout { .. }) => "timeout",
            Err(_) => "error",
        };
        self.metrics.connection_closed(reason);

        result
    }

    /// Handle a frame from the subscriber. Bad frames are logged and ignored.
    async fn handle_client_message(&self, connection_id: ConnectionId, msg: Message) {
        match msg {
            Message::Text(text) => match ClientEvent::parse(text.as_str()) {
                Ok(event) => {
                    self.metrics.message_received(event.as_str());
                    match event {
                        ClientEvent::HeartbeatProbe => {
                            if let Err(e) = self.relay.on_heartbeat_probe(connection_id).await {
                                log::error!(
                                    "Failed to answer heartbeat probe on {connection_id}: {e}"
                                );
                                self.metrics.error_occurred("heartbeat_reply");
                            }
                        }
                    }
                }
                Err(e) => {
                    log::debug!("Ignoring client frame on {connection_id}: {e}");
                    self.metrics.error_occurred("invalid_message");
                }
            },
            Message::Binary(data) => {
                log::debug!(
                    "Ignoring binary frame ({} bytes) from connection {connection_id}",
                    data.len()
                );
                self.metrics.message_received("binary");
            }
            // Pongs are answered by the transport; any frame counts as activity
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) => {}
        }
    }
}
