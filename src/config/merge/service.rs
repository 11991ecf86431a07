//! MergeService: orchestrates sources and deserializes to GztarConfig.

use crate::config::sources::{environment, global_file};
use crate::config::GztarConfig;
use config::{Config, ConfigError, File};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<GztarConfig, ConfigError> {
        let builder = global_file::add_to_builder(Config::builder());
        let builder = match explicit {
            Some(path) => builder.add_source(File::from(path)),
            None => builder,
        };
        let builder = environment::add_to_builder(builder);

        builder.build()?.try_deserialize()
    }

    /// Load config from a single file, without global or environment layers.
    pub fn load_from_file(path: &Path) -> Result<GztarConfig, ConfigError> {
        Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }
}
