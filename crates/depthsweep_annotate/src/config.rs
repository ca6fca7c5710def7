//! Sweep configuration.
//!
//! Configuration is layered, later sources overriding earlier ones:
//! - Bundled defaults (include_str! from depthsweep.toml)
//! - `~/.config/depthsweep/depthsweep.toml`
//! - `./depthsweep.toml`
//! - An explicit file passed on the command line

use depthsweep_core::{ModelId, Persona};
use depthsweep_error::{ConfigError, DepthsweepError, DepthsweepResult};
use depthsweep_interface::LoadOptions;
use depthsweep_server::ServerConfig;
use depthsweep_storage::{PartitionLayout, TextEncoding};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../depthsweep.toml");

/// Where the stories come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV file of stories
    pub path: PathBuf,
    /// Text encoding of the file
    pub encoding: TextEncoding,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/study_stories.csv"),
            encoding: TextEncoding::Latin1,
        }
    }
}

/// Where partition stores are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding one file per partition
    pub dir: PathBuf,
    /// Inserted between model short name and temperature in file names
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data/processed"),
            suffix: "annotations_mop".to_string(),
        }
    }
}

impl OutputConfig {
    /// File layout for partition stores.
    pub fn layout(&self) -> PartitionLayout {
        PartitionLayout::new(self.dir.clone(), self.suffix.clone())
    }
}

/// Complete configuration of an annotation sweep.
///
/// # Example
///
/// ```toml
/// models = ["models/Meta-Llama-3-8B-Instruct-f16.gguf"]
/// temperatures = [0.0, 1.0]
/// personas = ["You are a careful reader."]
///
/// [output]
/// dir = "./data/processed"
///
/// [load]
/// gpu_layers = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SweepConfig {
    /// Input dataset
    pub dataset: DatasetConfig,
    /// Output stores
    pub output: OutputConfig,
    /// Models in sweep order
    pub models: Vec<ModelId>,
    /// Temperatures in sweep order
    pub temperatures: Vec<f32>,
    /// Persona texts; list position is the participant id
    pub personas: Vec<String>,
    /// Options passed to every model load
    pub load: LoadOptions,
    /// Inference server settings
    pub server: ServerConfig,
}

impl SweepConfig {
    /// Load configuration with precedence: explicit file > current dir > home dir > bundled defaults.
    #[instrument(name = "sweep_config_load")]
    pub fn load(explicit: Option<&Path>) -> DepthsweepResult<Self> {
        debug!("Loading configuration");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/depthsweep/depthsweep.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("depthsweep").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        Self::finish(builder)
    }

    /// Bundled defaults overlaid with a TOML document.
    pub fn from_toml_str(toml: &str) -> DepthsweepResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Personas with participant ids assigned by position.
    pub fn personas(&self) -> Vec<Persona> {
        Persona::from_list(&self.personas)
    }

    /// Check the configuration can drive a sweep.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.models.is_empty() {
            return Err(ConfigError::new("No models configured"));
        }
        if self.temperatures.is_empty() {
            return Err(ConfigError::new("No temperatures configured"));
        }
        if self.personas.is_empty() {
            return Err(ConfigError::new("No personas configured"));
        }
        if let Some(bad) = self
            .temperatures
            .iter()
            .find(|t| !t.is_finite() || **t < 0.0)
        {
            return Err(ConfigError::new(format!("Invalid temperature: {}", bad)));
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> DepthsweepResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                DepthsweepError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DepthsweepError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        debug!(
            models = config.models.len(),
            temperatures = config.temperatures.len(),
            personas = config.personas.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthsweep_interface::DevicePlacement;

    #[test]
    fn test_bundled_defaults() {
        let config = SweepConfig::from_toml_str("").unwrap();
        assert_eq!(config.temperatures, vec![0.0, 1.0]);
        assert_eq!(config.personas.len(), 5);
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.dataset.encoding, TextEncoding::Latin1);
        assert_eq!(config.output.suffix, "annotations_mop");
        assert_eq!(config.load, LoadOptions::default());
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = SweepConfig::from_toml_str(
            r#"
            models = ["org/model"]
            temperatures = [0.7]
            personas = [""]

            [dataset]
            encoding = "utf8"

            [load]
            context_length = 4096
            device_placement = "single"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.models, vec![ModelId::new("org/model")]);
        assert_eq!(config.temperatures, vec![0.7]);
        assert!(config.personas()[0].is_blank());
        assert_eq!(config.dataset.encoding, TextEncoding::Utf8);
        assert_eq!(config.load.context_length, 4096);
        assert_eq!(config.load.device_placement, DevicePlacement::Single);
        assert!(!config.load.echo);
        assert_eq!(config.load.gpu_layers, -1);
        assert_eq!(*config.server.port(), 9000);
        assert_eq!(config.server.host(), "127.0.0.1");
    }

    #[test]
    fn test_rejects_empty_lists() {
        let config = SweepConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());

        let mut no_models = config.clone();
        no_models.models.clear();
        assert!(no_models.validate().is_err());

        let mut no_personas = config.clone();
        no_personas.personas.clear();
        assert!(no_personas.validate().is_err());

        let mut no_temperatures = config;
        no_temperatures.temperatures.clear();
        assert!(no_temperatures.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_temperature() {
        let mut config = SweepConfig::from_toml_str("").unwrap();
        config.temperatures = vec![0.0, -1.0];
        assert!(config.validate().is_err());
        config.temperatures = vec![f32::NAN];
        assert!(config.validate().is_err());
    }
}
