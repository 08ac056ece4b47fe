//! Configuration System
//!
//! Workspace-level configuration for the sitemap pipeline: which content
//! bundles to enumerate as batch roots, where the sitemap file goes, and
//! logging settings. Loaded from `config/config.toml` under the workspace
//! root with defaults layered underneath.

use crate::error::PipelineError;
use crate::logging::LoggingConfig;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagemapConfig {
    /// Content bundles selected for sitemap generation. Empty means the
    /// pipeline reports "no content types selected" and does not run.
    #[serde(default)]
    pub bundles: Vec<String>,

    /// Sitemap output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sitemap output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the sitemap file is written into, created if absent.
    /// Relative paths are resolved against the workspace root.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Sitemap file name
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_name() -> String {
    "image_sitemap.xml".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_name: default_file_name(),
        }
    }
}

impl OutputConfig {
    /// Full target path, resolving a relative directory against the
    /// workspace root.
    pub fn target_path(&self, workspace_root: &Path) -> PathBuf {
        if self.directory.is_absolute() {
            self.directory.join(&self.file_name)
        } else {
            workspace_root.join(&self.directory).join(&self.file_name)
        }
    }
}

impl ImagemapConfig {
    /// Validate the configuration, collecting all problems.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.output.file_name.trim().is_empty() {
            errors.push("Output file name cannot be empty".to_string());
        }
        if self.bundles.iter().any(|b| b.trim().is_empty()) {
            errors.push("Bundle names cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads configuration from the workspace or an explicit file
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `config/config.toml` under the workspace
    /// root; a missing file yields defaults.
    pub fn load(workspace_root: &Path) -> Result<ImagemapConfig, PipelineError> {
        let config_path = workspace_root.join("config").join("config.toml");

        let mut builder = Config::builder();
        if config_path.exists() {
            builder = builder.add_source(File::from(config_path).required(false));
        }

        Self::deserialize(builder)
    }

    /// Load configuration from an explicit file path.
    pub fn load_from_file(path: &Path) -> Result<ImagemapConfig, PipelineError> {
        let builder = Config::builder().add_source(File::from(path.to_path_buf()).required(true));
        Self::deserialize(builder)
    }

    fn deserialize(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<ImagemapConfig, PipelineError> {
        let config = builder
            .build()
            .map_err(|e| PipelineError::ConfigError(format!("Failed to load config: {}", e)))?;

        config
            .try_deserialize::<ImagemapConfig>()
            .map_err(|e| PipelineError::ConfigError(format!("Failed to parse config: {}", e)))
    }
}
