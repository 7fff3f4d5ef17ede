//! Environment state guard
//!
//! Inspects the target directory before provisioning touches anything.
//! The guard exists to prevent double-provisioning, which would corrupt a
//! toolchain install or duplicate downloads, and to make sure a stale or
//! foreign directory is only removed with explicit operator consent.

use std::fs;

use crate::error::Result;
use crate::layout::EnvLayout;
use crate::metadata::Metadata;

/// What the guard found at the environment root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    /// Path does not exist; provisioning may create it fresh
    Clear,
    /// Marker present with `initialized = true`; provisioning must not run
    AlreadyInitialized,
    /// Path exists but is a regular file; fatal collision
    PathIsFile,
    /// Directory exists without a completed marker: either a foreign
    /// directory or an interrupted prior run. The operator must confirm a
    /// wipe before provisioning proceeds.
    NeedsConfirmation,
}

/// Classify the environment root
pub fn check(layout: &EnvLayout) -> Result<EnvState> {
    let root = layout.root();
    if !root.exists() {
        return Ok(EnvState::Clear);
    }
    if root.is_file() {
        return Ok(EnvState::PathIsFile);
    }
    match Metadata::load(layout)? {
        Some(marker) if marker.initialized => Ok(EnvState::AlreadyInitialized),
        _ => Ok(EnvState::NeedsConfirmation),
    }
}

/// Recursively remove the environment tree after an operator-confirmed wipe
pub fn wipe(layout: &EnvLayout) -> Result<()> {
    tracing::debug!("Removing {}", layout.root().display());
    fs::remove_dir_all(layout.root())?;
    Ok(())
}
