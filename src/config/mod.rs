//! Configuration
//!
//! Layered settings for packing, unpacking, and logging. Sources are merged
//! by [`MergeService`](merge::service::MergeService) and exposed through
//! [`ConfigLoader`].

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GztarConfig {
    #[serde(default)]
    pub pack: PackOptions,

    #[serde(default)]
    pub unpack: UnpackOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tar and gzip encoding settings used by `pack`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackOptions {
    /// Gzip level, 0 (store) to 9 (best)
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Mode written for file entries
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,

    /// Mode written for directory entries
    #[serde(default = "default_directory_mode")]
    pub directory_mode: u32,

    /// Modification time for entries whose header carries none
    #[serde(default)]
    pub mtime: u64,
}

fn default_compression_level() -> u32 {
    6
}

fn default_file_mode() -> u32 {
    0o644
}

fn default_directory_mode() -> u32 {
    0o755
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
            file_mode: default_file_mode(),
            directory_mode: default_directory_mode(),
            mtime: 0,
        }
    }
}

/// Streaming settings used by `create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpackOptions {
    /// Bytes requested from the source per read
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Source chunks buffered ahead of the decoder
    #[serde(default = "default_read_ahead")]
    pub read_ahead: usize,
}

fn default_chunk_size() -> usize {
    64 * 1024
}

fn default_read_ahead() -> usize {
    4
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            read_ahead: default_read_ahead(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GztarConfig::default();
        assert_eq!(config.pack.compression_level, 6);
        assert_eq!(config.pack.file_mode, 0o644);
        assert_eq!(config.pack.directory_mode, 0o755);
        assert_eq!(config.pack.mtime, 0);
        assert_eq!(config.unpack.chunk_size, 65536);
        assert_eq!(config.unpack.read_ahead, 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GztarConfig = toml_from_str("[pack]\ncompression_level = 9\n");
        assert_eq!(config.pack.compression_level, 9);
        assert_eq!(config.pack.file_mode, 0o644);
        assert_eq!(config.unpack, UnpackOptions::default());
    }

    fn toml_from_str(text: &str) -> GztarConfig {
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
