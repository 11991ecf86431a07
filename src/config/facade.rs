//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::GztarConfig;
use crate::error::TarballError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, an optional explicit file, and environment.
    pub fn load(explicit: Option<&Path>) -> Result<GztarConfig, TarballError> {
        Ok(MergeService::load(explicit)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<GztarConfig, TarballError> {
        Ok(MergeService::load_from_file(path)?)
    }

    /// Create default configuration.
    pub fn default() -> GztarConfig {
        GztarConfig::default()
    }
}
