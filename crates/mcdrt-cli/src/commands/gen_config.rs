//! `mcdrt gen_config` - write the default configuration file

use std::path::Path;

use mcdrt_core::TestbedConfig;

use crate::error::Result;

/// Fixed relative path the default configuration is written to
pub const DEFAULT_CONFIG_PATH: &str = "env1.json";

/// Write the default configuration to [`DEFAULT_CONFIG_PATH`]
pub fn run_gen_config() -> Result<()> {
    tracing::info!("Generating default config file at ./{DEFAULT_CONFIG_PATH}");
    TestbedConfig::default().write(Path::new(DEFAULT_CONFIG_PATH))?;
    tracing::info!("Done. Review every field (plugin_code_path in particular) before running init.");
    Ok(())
}
