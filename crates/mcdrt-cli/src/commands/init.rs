//! `mcdrt init` - provision a fresh test environment

use colored::Colorize;

use mcdrt_core::{TestbedConfig, provision};

use crate::error::Result;
use crate::interactive::operator_for;

/// Run the full provisioning pipeline against `config`
pub fn run_init(config: &TestbedConfig, yes: bool) -> Result<()> {
    let mut operator = operator_for(yes);
    provision(config, operator.as_mut())?;
    println!(
        "{}",
        "The environment was successfully initialized.".green()
    );
    Ok(())
}
