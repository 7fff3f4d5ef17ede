//! Plugin packaging
//!
//! Turns the configured plugin source into a host-loadable artifact in
//! the destination directory, by one of three strategies, and reports the
//! artifact's final name. The method string is validated before any
//! filesystem action.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use mcdrt_exec::{CommandSpec, Decision, Operator};

use crate::config::TestbedConfig;
use crate::error::{Error, Result};

/// Confirmation line `mcdreforged pack` emits on success.
///
/// This is a contract with the host framework's human-readable output: it
/// is the only way to recover the generated artifact name. When the line
/// is absent the packager fails loudly rather than guessing.
pub const PACKED_LINE_PATTERN: &str = r#"Packed \d+ files/folders into "([^"]+)""#;

static PACKED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PACKED_LINE_PATTERN).expect("Invalid packed-line pattern"));

/// How the plugin under test gets turned into an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageMethod {
    /// Run `mcdreforged pack` and parse the reported artifact name
    McdrCommand,
    /// Copy one plugin file into the destination
    SingleFile,
    /// Copy the whole source tree into a same-named subdirectory
    Folder,
}

impl FromStr for PackageMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mcdr_command" => Ok(PackageMethod::McdrCommand),
            "single_file" => Ok(PackageMethod::SingleFile),
            "folder" => Ok(PackageMethod::Folder),
            other => Err(Error::UnknownMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Package the configured plugin into `destination` and return the
/// artifact's file (or directory) name.
pub fn package_plugin(
    config: &TestbedConfig,
    destination: &Path,
    operator: &mut dyn Operator,
) -> Result<String> {
    let method = PackageMethod::from_str(&config.method)?;
    let source = config.plugin_code_path.as_path();

    match method {
        PackageMethod::McdrCommand => {
            require_dir(source, "mcdr_command")?;
            let spec = CommandSpec::new(config.python_command())
                .args(["-m", "mcdreforged", "pack"])
                .arg("-i")
                .arg(source.to_string_lossy())
                .arg("-o")
                .arg(destination.to_string_lossy())
                .args(config.mcdr_pack_extra_options.split_whitespace());

            let matched = mcdrt_exec::run(&spec, operator, Decision::Abort, Some(&PACKED_LINE))?;
            artifact_from_matches(&matched)
        }
        PackageMethod::SingleFile => {
            if !source.is_file() {
                return Err(Error::BadPackagingSource {
                    method: "single_file",
                    path: source.to_path_buf(),
                    expected: "regular file",
                });
            }
            let name = base_name(source)?;
            fs::copy(source, destination.join(&name))?;
            Ok(name)
        }
        PackageMethod::Folder => {
            require_dir(source, "folder")?;
            let name = base_name(source)?;
            copy_dir_recursive(source, &destination.join(&name))?;
            Ok(name)
        }
    }
}

fn require_dir(source: &Path, method: &'static str) -> Result<()> {
    if source.is_dir() {
        Ok(())
    } else {
        Err(Error::BadPackagingSource {
            method,
            path: source.to_path_buf(),
            expected: "directory",
        })
    }
}

/// Final path component of the source, used as the artifact name
fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::NoArtifactName {
            path: path.to_path_buf(),
        })
}

/// Recover the artifact name from the pack command's matched output.
///
/// The matches hold the quoted output paths from every confirmation line;
/// the artifact is the final path segment of the last one.
fn artifact_from_matches(matched: &[String]) -> Result<String> {
    let packed_path = matched.last().ok_or(Error::PackOutputMismatch)?;
    Path::new(packed_path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or(Error::PackOutputMismatch)
}

/// Copy a directory tree, creating `dst` and mirroring `src` inside it
fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
