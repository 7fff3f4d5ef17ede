//! Test-server lifecycle stubs
//!
//! The interfaces exist so `mcdrt test` has a stable shape, but launching
//! the host server and removing the packaged plugin afterwards are not
//! built yet; both return [`Error::Unimplemented`].

use crate::error::{Error, Result};
use crate::layout::EnvLayout;

/// Launch the provisioned host server for a test cycle.
pub fn run_server(_layout: &EnvLayout) -> Result<()> {
    Err(Error::Unimplemented {
        feature: "Launching the test server",
    })
}

/// Remove the packaged plugin from the plugins directory after a test run.
pub fn remove_packed_plugin(_layout: &EnvLayout, _artifact: &str) -> Result<()> {
    Err(Error::Unimplemented {
        feature: "Removing the packaged plugin",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_lifecycle_is_unimplemented() {
        let layout = EnvLayout::new("/tmp/env");
        assert!(matches!(
            run_server(&layout),
            Err(Error::Unimplemented { .. })
        ));
        assert!(matches!(
            remove_packed_plugin(&layout, "plugin.mcdr"),
            Err(Error::Unimplemented { .. })
        ));
    }
}
