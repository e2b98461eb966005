mod config;
mod cors_config;
mod error;
mod freshness_config;
mod log_level;
mod logging_config;
mod server_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use cors_config::CorsConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use freshness_config::FreshnessConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use websocket_config::WebSocketConfig;

const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".relay";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 10_000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100_000;

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:22006"];
const WILDCARD_ORIGIN: &str = "*";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

/// Reject `value` unless it lies within `min..=max`.
#[track_caller]
fn check_range<T>(field: &str, value: T, min: T, max: T) -> ConfigErrorResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(ConfigError::config(format!(
            "{field} must be {min}-{max}, got {value}"
        )));
    }
    Ok(())
}
