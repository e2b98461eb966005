use relay_config::WebSocketConfig;

/// Configuration for WebSocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Send buffer size (bounded; overflow drops messages for that subscriber)
    pub send_buffer_size: usize,
    /// Heartbeat interval in seconds
    pub heartbeat_interval_secs: u64,
    /// Heartbeat timeout in seconds
    pub heartbeat_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from(&WebSocketConfig::default())
    }
}

impl From<&WebSocketConfig> for ConnectionConfig {
    fn from(websocket: &WebSocketConfig) -> Self {
        Self {
            send_buffer_size: websocket.send_buffer_size,
            heartbeat_interval_secs: websocket.heartbeat_interval_secs,
            heartbeat_timeout_secs: websocket.heartbeat_timeout_secs,
        }
    }
}
