#![allow(dead_code)]

use relay_core::{ConnectionStatus, RelayEvent};

use axum_test::{TestServer, TestWebSocket};
use serde_json::json;

/// WebSocket test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect to the subscriber endpoint without consuming any frames
    pub async fn connect_raw(server: &TestServer) -> Self {
        let ws = server.get_websocket("/ws").await.into_websocket().await;
        Self { ws }
    }

    /// Connect, read any catch-up update and the status frame.
    /// Once this returns the server has registered the connection.
    pub async fn connect(server: &TestServer) -> (Self, Option<RelayEvent>, ConnectionStatus) {
        let mut client = Self::connect_raw(server).await;

        let first = client.receive_event().await;
        match first {
            RelayEvent::Status(status) => (client, None, status),
            update @ RelayEvent::Update(_) => match client.receive_event().await {
                RelayEvent::Status(status) => (client, Some(update), status),
                other => panic!("expected status after catch-up, got {other:?}"),
            },
            other => panic!("unexpected first event {other:?}"),
        }
    }

    pub async fn receive_event(&mut self) -> RelayEvent {
        self.ws.receive_json::<RelayEvent>().await
    }

    pub async fn send_probe(&mut self) {
        self.ws.send_json(&json!({"event": "heartbeat-probe"})).await;
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Connect `count` subscribers, each fully registered
pub async fn connect_clients(server: &TestServer, count: usize) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        let (client, _, _) = WsTestClient::connect(server).await;
        clients.push(client);
    }
    clients
}
