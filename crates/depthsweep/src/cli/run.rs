//! The sweep command.

use depthsweep_annotate::{SweepConfig, SweepDriver, SweepReport};
use depthsweep_error::DepthsweepResult;
use depthsweep_server::LlamaServerLauncher;
use depthsweep_storage::load_stories;
use std::path::Path;
use tracing::{info, instrument};

/// Load configuration and dataset, then run the whole sweep.
#[instrument(name = "run_sweep")]
pub async fn run_sweep(config_path: Option<&Path>) -> DepthsweepResult<SweepReport> {
    let config = SweepConfig::load(config_path)?;
    let stories = load_stories(&config.dataset.path, config.dataset.encoding).await?;
    info!(
        stories = stories.len(),
        models = config.models.len(),
        temperatures = config.temperatures.len(),
        personas = config.personas.len(),
        "Starting sweep"
    );

    let launcher = LlamaServerLauncher::new(config.server.clone());
    SweepDriver::new(launcher, &config).run(&stories).await
}
