use relay_config::ServerConfig;

/// Configuration for connection limits
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    /// Maximum concurrent subscribers
    pub max_total: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ConnectionLimits {
    fn from(server: &ServerConfig) -> Self {
        Self {
            max_total: server.max_connections,
        }
    }
}
