use crate::{ConfigError, ConfigErrorResult, DEFAULT_ALLOWED_ORIGINS, WILDCARD_ORIGIN};

use serde::Deserialize;

/// Cross-origin access for browser subscribers and producers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins allowed to connect, or a single "*" for any origin
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| String::from(*origin))
                .collect(),
        }
    }
}

impl CorsConfig {
    /// True when any origin may connect
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == WILDCARD_ORIGIN)
    }

    /// Parse a comma-separated origin list, as used by the environment override
    pub fn parse_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.allowed_origins.is_empty() {
            return Err(ConfigError::cors(
                "cors.allowed_origins must contain at least one origin",
            ));
        }

        for origin in &self.allowed_origins {
            if origin == WILDCARD_ORIGIN {
                continue;
            }

            let valid_scheme = origin.starts_with("http://") || origin.starts_with("https://");
            if !valid_scheme || origin.ends_with('/') || origin.chars().any(char::is_whitespace) {
                return Err(ConfigError::cors(format!(
                    "cors.allowed_origins entry must look like 'https://host[:port]' or '*', got '{origin}'"
                )));
            }
        }

        if self.allows_any() && self.allowed_origins.len() > 1 {
            log::warn!("cors.allowed_origins contains '*', other entries are ignored");
        }

        Ok(())
    }
}
