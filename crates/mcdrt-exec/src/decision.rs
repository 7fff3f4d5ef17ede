//! Operator decisions for failed operations
//!
//! When an external command exits non-zero the run is not necessarily
//! over: a human-supervised provisioning tool can retry a flaky package
//! install or ignore a cosmetic failure. The `Operator` trait is the
//! injected capability that answers those questions, so the interactive
//! CLI, an unattended run and the test suite all drive the same retry
//! loop.

use std::collections::VecDeque;

use crate::error::Result;

/// Resolution of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Stop the run immediately
    Abort,
    /// Accept the failure and continue with whatever was produced
    Ignore,
    /// Run the operation again from scratch
    Retry,
}

impl Decision {
    /// Human-readable description, shown next to the prompt default
    pub fn describe(&self) -> &'static str {
        match self {
            Decision::Abort => "exit now",
            Decision::Ignore => "ignore this error",
            Decision::Retry => "repeat this operation",
        }
    }

    /// Normalize one line of operator input into a decision.
    ///
    /// Matching is case-insensitive on the first meaningful character:
    /// `e` aborts, `i` ignores, `r` retries. Anything else, including an
    /// empty line, falls back to `default`.
    pub fn from_input(input: &str, default: Decision) -> Decision {
        match input.trim().to_lowercase().as_str() {
            "e" => Decision::Abort,
            "i" => Decision::Ignore,
            "r" => Decision::Retry,
            _ => default,
        }
    }
}

/// The operator capability injected into the executor and the pipeline.
///
/// `decide` resolves a failed operation; `confirm` gates an optional
/// provisioning step. Implementations may talk to a terminal or answer
/// from a script.
pub trait Operator {
    /// Surface `message`, offer the three-way choice with `default`, and
    /// return the operator's decision.
    fn decide(&mut self, message: &str, default: Decision) -> Result<Decision>;

    /// Ask a yes/no question. Defaults to "no" when unanswered.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Operator for unattended runs: confirms every step and takes every
/// default decision, which is exactly what pressing enter at each prompt
/// would do.
#[derive(Debug, Default)]
pub struct AutoOperator;

impl Operator for AutoOperator {
    fn decide(&mut self, message: &str, default: Decision) -> Result<Decision> {
        tracing::debug!(?default, "auto-resolving failure: {message}");
        Ok(default)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        tracing::debug!("auto-confirming: {prompt}");
        Ok(true)
    }
}

/// Queue-fed operator for automated test harnesses.
///
/// Answers `decide` and `confirm` from pre-recorded queues; an exhausted
/// queue falls back to the supplied default / "no".
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    decisions: VecDeque<Decision>,
    confirmations: VecDeque<bool>,
    /// Number of `decide` calls observed
    pub decide_calls: usize,
}

impl ScriptedOperator {
    /// Create a scripted operator with queued answers
    pub fn new(
        decisions: impl IntoIterator<Item = Decision>,
        confirmations: impl IntoIterator<Item = bool>,
    ) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
            confirmations: confirmations.into_iter().collect(),
            decide_calls: 0,
        }
    }
}

impl Operator for ScriptedOperator {
    fn decide(&mut self, _message: &str, default: Decision) -> Result<Decision> {
        self.decide_calls += 1;
        Ok(self.decisions.pop_front().unwrap_or(default))
    }

    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(self.confirmations.pop_front().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_inputs_override_default() {
        for default in [Decision::Abort, Decision::Ignore, Decision::Retry] {
            assert_eq!(Decision::from_input("e", default), Decision::Abort);
            assert_eq!(Decision::from_input("i", default), Decision::Ignore);
            assert_eq!(Decision::from_input("r", default), Decision::Retry);
        }
    }

    #[test]
    fn test_input_is_case_insensitive() {
        assert_eq!(
            Decision::from_input("E", Decision::Ignore),
            Decision::Abort
        );
        assert_eq!(Decision::from_input("I", Decision::Abort), Decision::Ignore);
        assert_eq!(Decision::from_input("R", Decision::Abort), Decision::Retry);
    }

    #[test]
    fn test_unrecognized_input_falls_back_to_default() {
        for default in [Decision::Abort, Decision::Ignore, Decision::Retry] {
            assert_eq!(Decision::from_input("", default), default);
            assert_eq!(Decision::from_input("yes", default), default);
            assert_eq!(Decision::from_input("x", default), default);
            assert_eq!(Decision::from_input("  ", default), default);
        }
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(
            Decision::from_input(" e \n", Decision::Retry),
            Decision::Abort
        );
    }

    #[test]
    fn test_scripted_operator_pops_in_order() {
        let mut op = ScriptedOperator::new(
            [Decision::Retry, Decision::Ignore],
            [true, false],
        );
        assert_eq!(op.decide("m", Decision::Abort).unwrap(), Decision::Retry);
        assert_eq!(op.decide("m", Decision::Abort).unwrap(), Decision::Ignore);
        // Exhausted queue falls back to the default
        assert_eq!(op.decide("m", Decision::Abort).unwrap(), Decision::Abort);
        assert_eq!(op.decide_calls, 3);

        assert!(op.confirm("q").unwrap());
        assert!(!op.confirm("q").unwrap());
        assert!(!op.confirm("q").unwrap());
    }

    #[test]
    fn test_auto_operator_takes_defaults() {
        let mut op = AutoOperator;
        assert_eq!(op.decide("m", Decision::Retry).unwrap(), Decision::Retry);
        assert!(op.confirm("q").unwrap());
    }
}
