//! Launching one `llama-server` process per model.

use crate::{LlamaClient, LlamaServerHandle, ServerConfig};
use async_trait::async_trait;
use depthsweep_core::ModelId;
use depthsweep_error::{DepthsweepResult, ServerError, ServerErrorKind};
use depthsweep_interface::{DevicePlacement, LoadOptions, ModelLoader};
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tracing::instrument;

const HEALTH_POLL_INTERVAL: Duration = Duration::from_millis(500);

const PORT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Layer count that offloads every layer to the GPU.
const ALL_LAYERS: i32 = 999;

/// Command-line arguments for serving `id` with `options`.
///
/// # Examples
///
/// ```
/// use depthsweep_core::ModelId;
/// use depthsweep_interface::LoadOptions;
/// use depthsweep_server::{ServerConfig, server_args};
///
/// let args = server_args(
///     &ModelId::new("/models/qwen.gguf"),
///     &LoadOptions::default(),
///     &ServerConfig::default(),
/// );
/// assert_eq!(&args[..2], ["--model", "/models/qwen.gguf"]);
/// assert!(args.contains(&"--log-disable".to_string()));
/// ```
pub fn server_args(id: &ModelId, options: &LoadOptions, config: &ServerConfig) -> Vec<String> {
    let source = if id.is_local_file() { "--model" } else { "--hf-repo" };
    let gpu_layers = if options.gpu_layers < 0 {
        ALL_LAYERS
    } else {
        options.gpu_layers
    };
    let split_mode = match options.device_placement {
        DevicePlacement::Auto => "layer",
        DevicePlacement::Single => "none",
    };

    let mut args = vec![
        source.to_string(),
        id.as_str().to_string(),
        "--host".to_string(),
        config.host().clone(),
        "--port".to_string(),
        config.port().to_string(),
        "--ctx-size".to_string(),
        options.context_length.to_string(),
        "--n-gpu-layers".to_string(),
        gpu_layers.to_string(),
        "--split-mode".to_string(),
        split_mode.to_string(),
    ];
    if !options.echo {
        args.push("--log-disable".to_string());
    }
    args
}

/// Whether a server reporting `model_path` is serving `id`.
///
/// Local files must have the same file name. Hub downloads are cached under
/// a name derived from the repository, so the repository name must appear
/// in the path.
///
/// # Examples
///
/// ```
/// use depthsweep_core::ModelId;
/// use depthsweep_server::serves_model;
///
/// let id = ModelId::new("/models/Meta-Llama-3-8B.gguf");
/// assert!(serves_model(&id, "/models/Meta-Llama-3-8B.gguf"));
/// assert!(!serves_model(&id, "/models/Meta-Llama-3-70B.gguf"));
/// ```
pub fn serves_model(id: &ModelId, model_path: &str) -> bool {
    if id.is_local_file() {
        let requested = Path::new(id.as_str()).file_name();
        requested.is_some() && Path::new(model_path).file_name() == requested
    } else {
        let repository = id.as_str().split(':').next().unwrap_or_default();
        let name = repository.rsplit('/').next().unwrap_or(repository);
        !name.is_empty() && model_path.contains(name)
    }
}

/// Loads models by launching a dedicated `llama-server` for each.
#[derive(Debug, Clone)]
pub struct LlamaServerLauncher {
    config: ServerConfig,
}

impl LlamaServerLauncher {
    /// Create a launcher.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Server configuration used for every launch.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Fail if something already answers on the configured address.
    ///
    /// A server left behind by a killed run would otherwise pass the health
    /// check in place of the new process.
    async fn ensure_port_free(&self) -> Result<(), ServerError> {
        let address = format!("{}:{}", self.config.host(), self.config.port());
        let connected = tokio::time::timeout(PORT_PROBE_TIMEOUT, TcpStream::connect(&address)).await;
        if matches!(connected, Ok(Ok(_))) {
            return Err(ServerError::new(ServerErrorKind::Launch(format!(
                "{} is already in use; stop the process listening there first",
                address
            ))));
        }
        Ok(())
    }

    fn spawn(&self, id: &ModelId, options: &LoadOptions) -> Result<Child, ServerError> {
        let args = server_args(id, options, &self.config);
        tracing::debug!(binary = %self.config.binary(), ?args, "Spawning server");

        let output = || {
            if options.echo {
                Stdio::inherit()
            } else {
                Stdio::null()
            }
        };

        let mut command = Command::new(self.config.binary());
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(output())
            .stderr(output())
            .kill_on_drop(true);
        if let Some(cache_dir) = &options.cache_dir {
            command.env("LLAMA_CACHE", cache_dir);
        }

        command.spawn().map_err(|e| {
            ServerError::new(ServerErrorKind::Launch(format!(
                "{}: {}",
                self.config.binary(),
                e
            )))
        })
    }

    async fn wait_until_ready(&self, child: &mut Child, client: &LlamaClient) -> Result<(), ServerError> {
        let timeout = Duration::from_secs(*self.config.startup_timeout_secs());
        let started = Instant::now();

        loop {
            let exited = child.try_wait().map_err(|e| {
                ServerError::new(ServerErrorKind::Exited(format!("Failed to poll process: {}", e)))
            })?;
            if let Some(status) = exited {
                return Err(ServerError::new(ServerErrorKind::Exited(status.to_string())));
            }

            if client.health().await.is_ok() {
                tracing::debug!(elapsed = ?started.elapsed(), "Server ready");
                return Ok(());
            }

            if started.elapsed() >= timeout {
                if let Err(e) = child.kill().await {
                    tracing::warn!("Failed to stop unready server: {}", e);
                }
                return Err(ServerError::new(ServerErrorKind::StartupTimeout(
                    *self.config.startup_timeout_secs(),
                )));
            }

            tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
        }
    }

    /// Check that the healthy server is our child serving `id`.
    async fn verify_served_model(
        &self,
        id: &ModelId,
        child: &mut Child,
        client: &LlamaClient,
    ) -> Result<(), ServerError> {
        let exited = child.try_wait().map_err(|e| {
            ServerError::new(ServerErrorKind::Exited(format!("Failed to poll process: {}", e)))
        })?;
        if let Some(status) = exited {
            return Err(ServerError::new(ServerErrorKind::Exited(format!(
                "{} while another process answered on {}",
                status,
                client.base_url()
            ))));
        }

        let props = client.props().await?;
        if !serves_model(id, &props.model_path) {
            return Err(ServerError::new(ServerErrorKind::Launch(format!(
                "Server reports model {:?} instead of {}",
                props.model_path, id
            ))));
        }
        Ok(())
    }
}

impl Default for LlamaServerLauncher {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

#[async_trait]
impl ModelLoader for LlamaServerLauncher {
    type Model = LlamaServerHandle;

    #[instrument(skip(self, options), fields(model = %id))]
    async fn load(&self, id: &ModelId, options: &LoadOptions) -> DepthsweepResult<LlamaServerHandle> {
        tracing::info!("Loading model");
        let client = LlamaClient::new(&self.config)?;
        self.ensure_port_free().await?;
        let mut child = self.spawn(id, options)?;

        let ready = match self.wait_until_ready(&mut child, &client).await {
            Ok(()) => self.verify_served_model(id, &mut child, &client).await,
            Err(e) => Err(e),
        };
        if let Err(e) = ready {
            if let Err(kill) = child.kill().await {
                tracing::debug!("Server already stopped: {}", kill);
            }
            return Err(e.into());
        }
        tracing::info!("Model loaded");
        Ok(LlamaServerHandle::new(id.clone(), client, child))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|arg| arg == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_local_file_uses_model_flag() {
        let args = server_args(
            &ModelId::new("/models/Meta-Llama-3.gguf"),
            &LoadOptions::default(),
            &ServerConfig::default(),
        );
        assert_eq!(value_after(&args, "--model"), Some("/models/Meta-Llama-3.gguf"));
        assert!(!args.contains(&"--hf-repo".to_string()));
    }

    #[test]
    fn test_repository_uses_hf_repo_flag() {
        let args = server_args(
            &ModelId::new("bartowski/Qwen2.5-7B-Instruct-GGUF"),
            &LoadOptions::default(),
            &ServerConfig::default(),
        );
        assert_eq!(
            value_after(&args, "--hf-repo"),
            Some("bartowski/Qwen2.5-7B-Instruct-GGUF")
        );
    }

    #[test]
    fn test_default_options() {
        let args = server_args(
            &ModelId::new("m.gguf"),
            &LoadOptions::default(),
            &ServerConfig::default(),
        );
        assert_eq!(value_after(&args, "--n-gpu-layers"), Some("999"));
        assert_eq!(value_after(&args, "--ctx-size"), Some("3072"));
        assert_eq!(value_after(&args, "--split-mode"), Some("layer"));
        assert_eq!(value_after(&args, "--host"), Some("127.0.0.1"));
        assert_eq!(value_after(&args, "--port"), Some("8080"));
        assert!(args.contains(&"--log-disable".to_string()));
    }

    #[test]
    fn test_explicit_options() {
        let options: LoadOptions = serde_json::from_value(serde_json::json!({
            "echo": true,
            "gpu_layers": 20,
            "context_length": 4096,
            "cache_dir": "/tmp/cache",
            "device_placement": "single",
        }))
        .unwrap();
        assert_eq!(options.cache_dir, Some(PathBuf::from("/tmp/cache")));

        let args = server_args(&ModelId::new("m.gguf"), &options, &ServerConfig::default());
        assert_eq!(value_after(&args, "--n-gpu-layers"), Some("20"));
        assert_eq!(value_after(&args, "--ctx-size"), Some("4096"));
        assert_eq!(value_after(&args, "--split-mode"), Some("none"));
        assert!(!args.contains(&"--log-disable".to_string()));
    }

    #[tokio::test]
    async fn test_missing_binary_fails_to_load() {
        let config = crate::ServerConfigBuilder::default()
            .binary("/nonexistent/llama-server")
            .build()
            .unwrap();
        let launcher = LlamaServerLauncher::new(config);
        let result = launcher
            .load(&ModelId::new("m.gguf"), &LoadOptions::default())
            .await;
        assert!(result.is_err());
    }

    fn server_error(error: &depthsweep_error::DepthsweepError) -> &ServerErrorKind {
        match error.kind() {
            depthsweep_error::DepthsweepErrorKind::Server(e) => &e.kind,
            other => panic!("expected a server error, got {}", other),
        }
    }

    /// Answer every HTTP request with `body` until the test ends.
    async fn serve_json(body: &'static str) -> u16 {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buffer = [0u8; 4096];
                let _ = socket.read(&mut buffer).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        port
    }

    fn launcher_on(port: u16, binary: &str) -> LlamaServerLauncher {
        let config = crate::ServerConfigBuilder::default()
            .binary(binary)
            .port(port)
            .startup_timeout_secs(5u64)
            .build()
            .unwrap();
        LlamaServerLauncher::new(config)
    }

    #[tokio::test]
    async fn test_occupied_port_fails_before_spawning() {
        let port = serve_json(r#"{"model_path": "/models/model-A.gguf"}"#).await;
        let launcher = launcher_on(port, "/bin/false");

        let err = launcher
            .load(&ModelId::new("model-B.gguf"), &LoadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(server_error(&err), ServerErrorKind::Launch(_)), "{}", err);
    }

    #[tokio::test]
    async fn test_exited_child_is_not_trusted_after_health() {
        let port = serve_json(r#"{"model_path": "/models/model-B.gguf"}"#).await;
        let launcher = launcher_on(port, "/bin/false");
        let client = LlamaClient::new(launcher.config()).unwrap();

        let mut child = Command::new("/bin/false").kill_on_drop(true).spawn().unwrap();
        child.wait().await.unwrap();

        let err = launcher
            .verify_served_model(&ModelId::new("model-B.gguf"), &mut child, &client)
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ServerErrorKind::Exited(_)), "{}", err);
    }

    #[tokio::test]
    async fn test_wrong_served_model_is_rejected() {
        let port = serve_json(r#"{"model_path": "/models/model-A.gguf"}"#).await;
        let launcher = launcher_on(port, "/bin/false");
        let client = LlamaClient::new(launcher.config()).unwrap();
        let mut child = Command::new("sleep").arg("30").kill_on_drop(true).spawn().unwrap();

        let err = launcher
            .verify_served_model(&ModelId::new("/models/model-B.gguf"), &mut child, &client)
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ServerErrorKind::Launch(_)), "{}", err);

        launcher
            .verify_served_model(&ModelId::new("/elsewhere/model-A.gguf"), &mut child, &client)
            .await
            .unwrap();
    }

    #[test]
    fn test_serves_model_matching() {
        let local = ModelId::new("/models/Meta-Llama-3-8B-Instruct-f16.gguf");
        assert!(serves_model(&local, "/models/Meta-Llama-3-8B-Instruct-f16.gguf"));
        assert!(!serves_model(&local, "/models/Meta-Llama-3-70B-Instruct-f16.gguf"));
        assert!(!serves_model(&local, ""));

        let hub = ModelId::new("bartowski/Qwen2.5-7B-Instruct-GGUF");
        assert!(serves_model(
            &hub,
            "/cache/bartowski_Qwen2.5-7B-Instruct-GGUF_Qwen2.5-7B-Instruct-Q4_K_M.gguf"
        ));
        assert!(!serves_model(&hub, "/cache/other_Model-GGUF_model.gguf"));
    }
}
