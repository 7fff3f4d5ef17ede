//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based prompts. The console operator is the
//! interactive implementation of the `Operator` capability the executor
//! and the pipeline receive; `--yes` swaps in the default-taking one.

use colored::Colorize;
use dialoguer::{Confirm, Input};

use mcdrt_exec::{AutoOperator, Decision, ExecError, Operator};

/// Operator backed by terminal prompts
#[derive(Debug, Default)]
pub struct ConsoleOperator;

impl Operator for ConsoleOperator {
    fn decide(&mut self, message: &str, default: Decision) -> mcdrt_exec::Result<Decision> {
        println!(
            "{}",
            "Unfortunately, the last operation failed. What shall I do?".yellow()
        );
        println!("{message}");
        println!(
            "Press {} to exit now, {} to ignore this error, {} to repeat the operation. Default: {}",
            "e".bold(),
            "i".bold(),
            "r".bold(),
            default.describe().cyan()
        );

        let input: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        let decision = Decision::from_input(&input, default);
        tracing::debug!(?decision, "operator answered");
        Ok(decision)
    }

    fn confirm(&mut self, prompt: &str) -> mcdrt_exec::Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}

/// Pick the operator for a run: interactive by default, default-taking
/// under `--yes`
pub fn operator_for(yes: bool) -> Box<dyn Operator> {
    if yes {
        Box::new(AutoOperator)
    } else {
        Box::new(ConsoleOperator)
    }
}

fn prompt_error(e: dialoguer::Error) -> ExecError {
    ExecError::Prompt(e.to_string())
}
