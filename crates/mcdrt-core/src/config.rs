//! Configuration for one test-environment run
//!
//! The configuration is an immutable snapshot loaded once per run from a
//! JSON file and passed by reference into every component. All fields are
//! required on load; `Default` supplies the values `gen_config` writes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Interpreter used when `python_path` is left empty
pub const DEFAULT_PYTHON: &str = "python3";
/// Package manager used when `pip_path` is left empty
pub const DEFAULT_PIP: &str = "pip3";

/// 1.20.4 vanilla server jar published by Mojang
const DEFAULT_SERVER_URL: &str = "https://piston-data.mojang.com/v1/objects/8dd1a28015f51b1803213892b50b7b4fc76e594d/server.jar";

/// Snapshot of one provisioning/test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestbedConfig {
    /// Enable diagnostic logging for the run
    pub debug: bool,

    /// URL of the server jar. Empty means "do not download a server".
    pub core_server_url: String,

    /// Write the license-acceptance file after the server download
    pub auto_eula: bool,

    /// Download URLs for additional MCDReforged plugins, fetched in order
    pub plugins: Vec<String>,

    /// Python interpreter path. Empty resolves `python3` from PATH.
    pub python_path: String,

    /// pip path. Empty resolves `pip3` from PATH.
    pub pip_path: String,

    /// Environment root the toolchain and server are installed into
    pub env_path: PathBuf,

    /// Plugin packaging method: `mcdr_command`, `single_file` or `folder`
    pub method: String,

    /// Source tree or file of the plugin under test
    pub plugin_code_path: PathBuf,

    /// Extra options appended to `mcdreforged pack`. The `-i`/`-o` options
    /// are filled in by the packager and must not appear here.
    pub mcdr_pack_extra_options: String,
}

impl Default for TestbedConfig {
    fn default() -> Self {
        Self {
            debug: false,
            core_server_url: DEFAULT_SERVER_URL.to_string(),
            auto_eula: false,
            plugins: Vec::new(),
            python_path: String::new(),
            pip_path: String::new(),
            env_path: PathBuf::from("./env"),
            method: "mcdr_command".to_string(),
            plugin_code_path: PathBuf::from("./code"),
            mcdr_pack_extra_options: "--ignore-file .gitignore".to_string(),
        }
    }
}

impl TestbedConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Every field is required; a missing field is a fatal load error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Write this configuration as pretty-printed JSON
    pub fn write(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The Python interpreter to invoke, falling back to [`DEFAULT_PYTHON`]
    pub fn python_command(&self) -> &str {
        if self.python_path.is_empty() {
            DEFAULT_PYTHON
        } else {
            &self.python_path
        }
    }

    /// The package manager to invoke, falling back to [`DEFAULT_PIP`]
    pub fn pip_command(&self) -> &str {
        if self.pip_path.is_empty() {
            DEFAULT_PIP
        } else {
            &self.pip_path
        }
    }
}
