//! CLI Tooling
//!
//! Command-line interface for inspecting and re-encoding `.tar.gz` archives.
//! Every command unpacks the archive into a tree first, so the output reflects
//! exactly what the library sees.

use crate::config::{ConfigLoader, GztarConfig};
use crate::error::TarballError;
use crate::source::ByteSource;
use crate::tooling::format::{format_listing_text, format_tree_text, ListingOutput};
use crate::tree::DirectoryNode;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Gztar CLI - in-memory trees over gzip-compressed tar archives
#[derive(Parser)]
#[command(name = "gztar")]
#[command(about = "Inspect and repack .tar.gz archives as in-memory directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (merged over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every entry in an archive
    List {
        /// Archive path
        archive: PathBuf,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the directory outline of an archive
    Tree {
        /// Archive path
        archive: PathBuf,
    },
    /// Print the contents of one file inside an archive
    Cat {
        /// Archive path
        archive: PathBuf,

        /// Path of the file within the archive
        path: String,
    },
    /// Unpack an archive and pack it again
    Repack {
        /// Archive path
        archive: PathBuf,

        /// Destination for the re-encoded archive
        #[arg(short, long)]
        output: PathBuf,

        /// Gzip compression level (0-9), overrides configuration
        #[arg(long)]
        level: Option<u32>,
    },
}

/// CLI context holding the merged configuration.
pub struct CliContext {
    config: GztarConfig,
}

impl CliContext {
    /// Load configuration, layering `config_path` over the global file.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, TarballError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self { config })
    }

    pub fn with_config(config: GztarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GztarConfig {
        &self.config
    }

    /// Execute a command and return its printable output.
    pub async fn execute(&self, command: &Commands) -> Result<String, TarballError> {
        match command {
            Commands::List { archive, format } => self.handle_list(archive, format).await,
            Commands::Tree { archive } => {
                let root = self.open(archive).await?;
                Ok(format_tree_text(&root))
            }
            Commands::Cat { archive, path } => {
                let root = self.open(archive).await?;
                let file = root
                    .get_file(path)
                    .ok_or_else(|| TarballError::FileNotFound(path.clone()))?;
                Ok(file.text().into_owned())
            }
            Commands::Repack {
                archive,
                output,
                level,
            } => self.handle_repack(archive, output, *level).await,
        }
    }

    async fn open(&self, archive: &Path) -> Result<DirectoryNode, TarballError> {
        let source = ByteSource::open(archive).await?;
        DirectoryNode::create_with(source, &self.config.unpack).await
    }

    async fn handle_list(&self, archive: &Path, format: &str) -> Result<String, TarballError> {
        let root = self.open(archive).await?;
        let listing = ListingOutput::from_tree(&root);
        match format {
            "json" => serde_json::to_string_pretty(&listing).map_err(|e| {
                TarballError::Config(format!("Failed to serialize listing: {}", e))
            }),
            "text" => Ok(format_listing_text(&listing)),
            other => Err(TarballError::Config(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    async fn handle_repack(
        &self,
        archive: &Path,
        output: &Path,
        level: Option<u32>,
    ) -> Result<String, TarballError> {
        let original = ByteSource::open(archive).await?.read_to_end().await?;
        let original_len = original.len();
        let root = DirectoryNode::create_with(original, &self.config.unpack).await?;

        let mut options = self.config.pack.clone();
        if let Some(level) = level {
            options.compression_level = level;
        }
        let entries = root.pack_entries().len();
        let packed = root.pack_with(&options)?;
        tokio::fs::write(output, &packed)
            .await
            .map_err(|source| TarballError::Write {
                path: output.to_path_buf(),
                source,
            })?;

        info!(
            archive = %archive.display(),
            output = %output.display(),
            entries,
            "repacked archive"
        );
        let summary = json!({
            "entries": entries,
            "input_bytes": original_len,
            "output_bytes": packed.len(),
            "output": output.display().to_string(),
        });
        Ok(summary.to_string())
    }
}
