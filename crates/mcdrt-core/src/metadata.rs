//! Persisted environment completion marker
//!
//! A small JSON record at `<envRoot>/metadata.json`. Its presence with
//! `initialized = true` is the sole authority for "already provisioned";
//! the provisioning pipeline writes it only after every step succeeded.

use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::EnvLayout;

/// The marker record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Metadata {
    /// True once a provisioning run completed all of its steps
    pub initialized: bool,
}

impl Metadata {
    /// Read the marker from the environment root.
    ///
    /// Returns `Ok(None)` when no marker file exists. A marker that exists
    /// but cannot be parsed is an error, not an absent marker: the guard
    /// must not treat unreadable state as a blank slate.
    pub fn load(layout: &EnvLayout) -> Result<Option<Self>> {
        let path = layout.metadata_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let metadata = serde_json::from_str(&content)?;
        Ok(Some(metadata))
    }

    /// Persist the marker into the environment root
    pub fn store(&self, layout: &EnvLayout) -> Result<()> {
        let content = serde_json::to_string(self)?;
        fs::write(layout.metadata_path(), content)?;
        Ok(())
    }
}
