//! Environment variable source: GZTAR_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Environment prefix for configuration overrides.
pub const ENV_PREFIX: &str = "GZTAR";

/// Add environment variable overlay to builder.
/// `GZTAR__PACK__COMPRESSION_LEVEL=9` sets `pack.compression_level`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
