//! Filesystem layout of a provisioned environment

use std::path::{Path, PathBuf};

/// Completion marker file inside the environment root
pub const METADATA_FILE: &str = "metadata.json";
/// Directory the plugins are downloaded and packaged into
pub const PLUGINS_DIR: &str = "plugins";
/// Directory the server binary lives in
pub const SERVER_DIR: &str = "server";
/// Fixed destination name for the downloaded server binary
pub const SERVER_JAR: &str = "minecraft_server.jar";
/// License-acceptance file name inside the server directory
pub const EULA_FILE: &str = "eula.txt";
/// Fixed content of the license-acceptance file
pub const EULA_CONTENT: &str = "eula=true";

/// Path helpers rooted at one environment directory
#[derive(Debug, Clone)]
pub struct EnvLayout {
    root: PathBuf,
}

impl EnvLayout {
    /// Create a layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The environment root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/metadata.json`
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// `<root>/plugins`
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    /// `<root>/server`
    pub fn server_dir(&self) -> PathBuf {
        self.root.join(SERVER_DIR)
    }

    /// `<root>/server/minecraft_server.jar`
    pub fn server_jar_path(&self) -> PathBuf {
        self.server_dir().join(SERVER_JAR)
    }

    /// `<root>/server/eula.txt`
    pub fn eula_path(&self) -> PathBuf {
        self.server_dir().join(EULA_FILE)
    }
}
