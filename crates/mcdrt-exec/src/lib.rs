//! External-operation layer for mcdr-testbed
//!
//! This crate provides the pieces that talk to the outside world during
//! environment provisioning:
//!
//! - A retryable command executor that streams subprocess output line by
//!   line and routes failures through an operator decision
//! - The `Decision`/`Operator` abstraction that lets the interactive CLI,
//!   an unattended run, or a test harness answer those prompts
//! - A chunked, progress-reporting download primitive
//!
//! Nothing in here knows about MCDReforged specifics; commands and URLs
//! come from the domain layer.

pub mod command;
pub mod decision;
pub mod error;
pub mod transfer;

pub use command::{CommandSpec, run};
pub use decision::{AutoOperator, Decision, Operator, ScriptedOperator};
pub use error::{ExecError, Result};
pub use transfer::fetch;
