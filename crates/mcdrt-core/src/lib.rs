//! Domain layer for mcdr-testbed
//!
//! This crate owns everything specific to a disposable MCDReforged test
//! environment:
//!
//! - The JSON configuration snapshot for one run
//! - The environment layout and its `metadata.json` completion marker
//! - The state guard that prevents double-provisioning
//! - The staged provisioning pipeline (toolchain install, framework init,
//!   plugin and server downloads, license marker)
//! - The plugin packager with its three strategies
//!
//! External commands and downloads go through `mcdrt-exec`; the operator
//! answering prompts is injected by the caller.

pub mod config;
pub mod error;
pub mod guard;
pub mod layout;
pub mod metadata;
pub mod package;
pub mod provision;
pub mod server;

pub use config::TestbedConfig;
pub use error::{Error, Result};
pub use guard::EnvState;
pub use layout::EnvLayout;
pub use metadata::Metadata;
pub use package::{PackageMethod, package_plugin};
pub use provision::provision;
