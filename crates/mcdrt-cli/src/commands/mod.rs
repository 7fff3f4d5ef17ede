//! CLI command implementations

mod gen_config;
mod init;

pub use gen_config::run_gen_config;
pub use init::run_init;
pub use test::run_test;
