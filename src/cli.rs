//! CLI types and command execution for the imagemap binary.

use crate::batch::BatchRunner;
use crate::config::{ConfigLoader, ImagemapConfig};
use crate::error::PipelineError;
use crate::sitemap::SitemapWriter;
use crate::store::Snapshot;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Imagemap CLI - batch image sitemap generation
#[derive(Parser)]
#[command(name = "imagemap")]
#[command(about = "Batch image sitemap generation from typed content entity graphs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides workspace config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the image sitemap file from an entity snapshot
    Rebuild {
        /// Entity snapshot file (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Override the configured output path
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show selected bundles and sitemap file state
    Status,
}

/// Execution context: workspace root plus loaded configuration
pub struct RunContext {
    workspace: PathBuf,
    config: ImagemapConfig,
}

impl RunContext {
    pub fn new(workspace: PathBuf, config_path: Option<PathBuf>) -> Result<Self, PipelineError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace)?,
        };

        config.validate().map_err(|errors| {
            PipelineError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;

        Ok(Self { workspace, config })
    }

    pub fn config(&self) -> &ImagemapConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, PipelineError> {
        match command {
            Commands::Rebuild { snapshot, output } => self.rebuild(snapshot, output.as_deref()),
            Commands::Status => self.status(),
        }
    }

    fn rebuild(
        &self,
        snapshot_path: &std::path::Path,
        output: Option<&std::path::Path>,
    ) -> Result<String, PipelineError> {
        if self.config.bundles.is_empty() {
            return Ok("There isn't content type selected".to_string());
        }

        let snapshot = Snapshot::from_path(snapshot_path)?;
        let (store, schema) = snapshot.into_parts();

        let roots = store.roots_in_bundles(&self.config.bundles);
        if roots.is_empty() {
            return Ok("There isn't content created".to_string());
        }

        info!(roots = roots.len(), "Starting sitemap batch");
        let mut runner = BatchRunner::new(&schema, &store);
        for id in roots {
            runner.enqueue(id);
        }
        runner.run();

        let target = match output {
            Some(path) => path.to_path_buf(),
            None => self.config.output.target_path(&self.workspace),
        };
        let writer = SitemapWriter::new(target);
        let summary = runner.finish(&writer);

        let mut lines = vec![summary.message().to_string()];
        if summary.written {
            lines.push(format!(
                "{} urls written to {:?}",
                summary.urls,
                writer.path()
            ));
        }
        for failure in &summary.failures {
            lines.push(format!("  - {}", failure));
        }
        Ok(lines.join("\n"))
    }

    fn status(&self) -> Result<String, PipelineError> {
        let target = self.config.output.target_path(&self.workspace);
        let mut lines = Vec::new();

        if self.config.bundles.is_empty() {
            lines.push("Bundles: none selected".to_string());
        } else {
            lines.push(format!("Bundles: {}", self.config.bundles.join(", ")));
        }
        lines.push(format!("Sitemap path: {:?}", target));
        lines.push(format!(
            "Sitemap file: {}",
            if target.is_file() { "present" } else { "absent" }
        ));

        Ok(lines.join("\n"))
    }
}

/// Map a pipeline error to an operator-facing message.
pub fn map_error(error: &PipelineError) -> String {
    format!("Error: {}", error)
}
