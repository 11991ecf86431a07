//! Global config file: `<platform config dir>/config.toml`, optional.

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::PathBuf;

/// Platform config file path, if a config directory can be determined.
pub fn path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "gztar", "gztar")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global file to builder when it exists.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match path() {
        Some(path) => builder.add_source(File::from(path).required(false)),
        None => builder,
    }
}
