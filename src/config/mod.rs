// Configuration module entry point
// Loads layered settings and holds the shared application state

mod state;
mod types;

use crate::logger::LogLevel;
use hyper::header::HeaderValue;
use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `BRIDGE__SERVER__PORT=9090`
const ENV_PREFIX: &str = "BRIDGE";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; defaults reproduce a plain listener on port 8080
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", false)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "extension-bridge")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would otherwise fail quietly at request time
    fn validate(&self) -> Result<(), config::ConfigError> {
        self.logging
            .level
            .parse::<LogLevel>()
            .map_err(|e| config::ConfigError::Message(format!("logging.level: {e}")))?;
        HeaderValue::from_str(&self.http.server_name).map_err(|e| {
            config::ConfigError::Message(format!(
                "http.server_name is not a valid header value: {e}"
            ))
        })?;
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::types::PerformanceConfig;
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.logging.access_log_file.is_none());
        assert!(!cfg.performance.keep_alive);
        assert_eq!(cfg.http.max_body_size, 10_485_760);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut cfg = Config::load_from("does-not-exist/config").unwrap();
        cfg.logging.level = "verbose".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));

        cfg.logging.level = "DEBUG".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_server_name() {
        let mut cfg = Config::load_from("does-not-exist/config").unwrap();
        cfg.http.server_name = "bad\nname".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("http.server_name"));
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let dir = std::env::temp_dir().join(format!("bridge-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

        let result = Config::load_from(path.with_extension("").to_str().unwrap());
        std::fs::remove_dir_all(&dir).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_connection_timeout_uses_larger_value() {
        let perf = PerformanceConfig {
            keep_alive: false,
            read_timeout: 5,
            write_timeout: 12,
        };
        assert_eq!(perf.connection_timeout().as_secs(), 12);
    }
}
