//! Configuration for launching and talking to `llama-server`.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Configuration for the local inference server.
///
/// # Examples
///
/// ```
/// use depthsweep_server::ServerConfigBuilder;
///
/// let config = ServerConfigBuilder::default()
///     .port(9090u16)
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url(), "http://127.0.0.1:9090");
/// assert_eq!(config.binary(), "llama-server");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ServerConfig {
    /// Server executable, looked up on `PATH` when not absolute
    binary: String,
    /// Interface the server binds to
    host: String,
    /// Port the server listens on
    port: u16,
    /// How long to wait for the model to load
    startup_timeout_secs: u64,
    /// Per-request timeout; none by default
    request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Base URL of the server.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binary: "llama-server".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            startup_timeout_secs: 600,
            request_timeout_secs: None,
        }
    }
}
