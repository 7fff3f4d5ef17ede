//! The staged provisioning pipeline
//!
//! Runs the setup steps in fixed dependency order: guard gate, toolchain
//! resolution, framework install, framework init, plugin downloads,
//! server download, license marker, completion marker. Optional steps are
//! gated by the injected operator; the completion marker is the single
//! commit point and is written only after every step succeeded.

use std::fs;

use mcdrt_exec::{CommandSpec, Decision, Operator};

use crate::config::TestbedConfig;
use crate::error::{Error, Result};
use crate::guard::{self, EnvState};
use crate::layout::{self, EnvLayout};
use crate::metadata::Metadata;

/// Provision a fresh test environment as described by `config`.
///
/// Fatal conditions (already provisioned, path collision, declined wipe)
/// abort before anything is created. Command failures inside the optional
/// steps are arbitrated by the operator through the executor's retry loop.
pub fn provision(config: &TestbedConfig, operator: &mut dyn Operator) -> Result<()> {
    let layout = EnvLayout::new(&config.env_path);
    let root = layout.root();

    tracing::info!("Checking environment at {}", root.display());
    match guard::check(&layout)? {
        EnvState::Clear => tracing::info!("Creating a new environment"),
        EnvState::PathIsFile => {
            return Err(Error::PathIsFile {
                path: root.to_path_buf(),
            });
        }
        EnvState::AlreadyInitialized => {
            return Err(Error::AlreadyInitialized {
                path: root.to_path_buf(),
            });
        }
        EnvState::NeedsConfirmation => {
            let prompt = format!(
                "{} already exists. Clear everything in that folder?",
                root.display()
            );
            if operator.confirm(&prompt)? {
                guard::wipe(&layout)?;
            } else {
                return Err(Error::Cancelled);
            }
        }
    }
    fs::create_dir_all(root)?;

    let python = config.python_command();
    let pip = config.pip_command();
    tracing::info!("Python path: {python}");
    tracing::info!("pip path: {pip}");

    if operator.confirm(&format!(
        "Install the latest mcdreforged package using {pip}?"
    ))? {
        tracing::info!("Installing mcdreforged, this may take a few minutes");
        // Package installs fail transiently; the default leans toward retrying.
        mcdrt_exec::run(
            &CommandSpec::new(pip).args(["install", "mcdreforged"]),
            operator,
            Decision::Retry,
            None,
        )?;
    }

    if operator.confirm("Initialize mcdreforged in the environment path now?")? {
        // A failed init leaves an unusable environment; default to aborting.
        mcdrt_exec::run(
            &CommandSpec::new(python)
                .args(["-m", "mcdreforged", "init"])
                .current_dir(root),
            operator,
            Decision::Abort,
            None,
        )?;
    }

    if !config.plugins.is_empty()
        && operator.confirm("Download the plugins listed in the config file?")?
    {
        let plugins_dir = layout.plugins_dir();
        tracing::info!(
            "Downloading {} plugin(s) into {}",
            config.plugins.len(),
            plugins_dir.display()
        );
        fs::create_dir_all(&plugins_dir)?;
        for url in &config.plugins {
            mcdrt_exec::fetch(url, &plugins_dir, None)?;
        }
        tracing::info!("Plugin downloads completed");
    }

    if config.core_server_url.is_empty() {
        tracing::warn!("core_server_url is empty, the server jar will not be downloaded");
    } else if operator.confirm("Download the server jar now?")? {
        let server_dir = layout.server_dir();
        fs::create_dir_all(&server_dir)?;
        mcdrt_exec::fetch(
            &config.core_server_url,
            &server_dir,
            Some(layout::SERVER_JAR),
        )?;

        if config.auto_eula {
            tracing::info!("Writing {}", layout::EULA_FILE);
            fs::write(layout.eula_path(), layout::EULA_CONTENT)?;
        }
    }

    // Commit point: only now does the guard consider this root provisioned.
    Metadata { initialized: true }.store(&layout)?;
    tracing::info!("Environment initialized at {}", root.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcdrt_exec::ScriptedOperator;
    use tempfile::TempDir;

    fn minimal_config(root: &std::path::Path) -> TestbedConfig {
        TestbedConfig {
            core_server_url: String::new(),
            env_path: root.to_path_buf(),
            ..TestbedConfig::default()
        }
    }

    #[test]
    fn test_minimal_run_writes_only_the_marker() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("env");
        let config = minimal_config(&root);

        // Decline the install and init steps; plugins and server are empty
        // so those steps never prompt.
        let mut op = ScriptedOperator::new([], [false, false]);
        provision(&config, &mut op).unwrap();

        let layout = EnvLayout::new(&root);
        let marker = Metadata::load(&layout).unwrap().unwrap();
        assert!(marker.initialized);
        assert!(!layout.plugins_dir().exists());
        assert!(!layout.server_dir().exists());
    }

    #[test]
    fn test_initialized_environment_blocks_a_second_run() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("env");
        let config = minimal_config(&root);

        let mut op = ScriptedOperator::new([], [false, false]);
        provision(&config, &mut op).unwrap();

        let mut op = ScriptedOperator::new([], [true, false, false]);
        let err = provision(&config, &mut op).unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized { .. }));
    }

    #[test]
    fn test_env_path_collision_with_a_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("env");
        fs::write(&root, "in the way").unwrap();

        let config = minimal_config(&root);
        let mut op = ScriptedOperator::new([], []);
        let err = provision(&config, &mut op).unwrap_err();
        assert!(matches!(err, Error::PathIsFile { .. }));
    }

    #[test]
    fn test_declined_wipe_cancels_the_run() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("env");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("stale.txt"), "old").unwrap();

        let config = minimal_config(&root);
        let mut op = ScriptedOperator::new([], [false]);
        let err = provision(&config, &mut op).unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        // The stale directory is untouched
        assert!(root.join("stale.txt").exists());
        assert!(!EnvLayout::new(&root).metadata_path().exists());
    }

    #[test]
    fn test_confirmed_wipe_recreates_the_environment() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("env");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("stale.txt"), "old").unwrap();

        let config = minimal_config(&root);
        // Confirm the wipe, decline install and init
        let mut op = ScriptedOperator::new([], [true, false, false]);
        provision(&config, &mut op).unwrap();

        assert!(!root.join("stale.txt").exists());
        let marker = Metadata::load(&EnvLayout::new(&root)).unwrap().unwrap();
        assert!(marker.initialized);
    }

    #[cfg(unix)]
    #[test]
    fn test_aborted_init_leaves_no_marker() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("env");
        let config = TestbedConfig {
            // `false` exits non-zero no matter the arguments
            python_path: "false".to_string(),
            ..minimal_config(&root)
        };

        // Decline the install step, confirm the init step; the empty
        // decision queue falls back to the step's Abort default.
        let mut op = ScriptedOperator::new([], [false, true]);
        let err = provision(&config, &mut op).unwrap_err();
        assert!(matches!(
            err,
            Error::Exec(mcdrt_exec::ExecError::Aborted { .. })
        ));
        assert!(!EnvLayout::new(&root).metadata_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_confirmed_toolchain_steps_run_to_completion() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("env");
        let config = TestbedConfig {
            // `true` exits zero no matter the arguments
            python_path: "true".to_string(),
            pip_path: "true".to_string(),
            ..minimal_config(&root)
        };

        let mut op = ScriptedOperator::new([], [true, true]);
        provision(&config, &mut op).unwrap();

        let marker = Metadata::load(&EnvLayout::new(&root)).unwrap().unwrap();
        assert!(marker.initialized);
    }
}
