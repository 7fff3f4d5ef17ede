//! Retryable execution of external commands
//!
//! Commands are spawned with both output pipes captured and drained
//! concurrently, so the combined stream is echoed to the console line by
//! line as it is produced rather than buffered to completion. A non-zero
//! exit routes through the injected [`Operator`]; the retry loop has no
//! attempt cap on purpose -- this is a human-supervised tool and the
//! operator is the only thing that bounds it.

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use regex::Regex;

use crate::decision::{Decision, Operator};
use crate::error::{ExecError, Result};

/// An external command, rebuilt into a fresh process for every attempt
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a spec for the given program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command from the given working directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Display form used in prompts and error messages
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Run `spec` until it succeeds or the operator settles the failure.
///
/// Every line of the combined stdout/stderr stream is echoed to the
/// console. When `matcher` is given, capture group 1 (or the whole match)
/// of every hit is accumulated in line order; the returned matches always
/// come from a single attempt because the buffer is reset when the
/// operator chooses to retry.
///
/// On non-zero exit the operator decides: `Ignore` returns the failed
/// attempt's matches as a best-effort result, `Retry` re-runs from
/// scratch, `Abort` surfaces as [`ExecError::Aborted`].
pub fn run(
    spec: &CommandSpec,
    operator: &mut dyn Operator,
    default: Decision,
    matcher: Option<&Regex>,
) -> Result<Vec<String>> {
    loop {
        let (status, matched) = attempt(spec, matcher)?;
        if status.success() {
            return Ok(matched);
        }

        let message = format!("Failed to execute `{}`", spec.display());
        let decision = operator.decide(&message, default)?;
        tracing::debug!(?decision, "operator decision for failed command");
        match decision {
            Decision::Abort => {
                return Err(ExecError::Aborted {
                    command: spec.display(),
                });
            }
            Decision::Ignore => return Ok(matched),
            Decision::Retry => continue,
        }
    }
}

/// One spawn-stream-wait cycle
fn attempt(spec: &CommandSpec, matcher: Option<&Regex>) -> Result<(ExitStatus, Vec<String>)> {
    let mut child = spec
        .build()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let (tx, rx) = mpsc::channel::<String>();
    let out_handle = child.stdout.take().map(|pipe| drain(pipe, tx.clone()));
    let err_handle = child.stderr.take().map(|pipe| drain(pipe, tx));

    let mut matched = Vec::new();
    for line in rx {
        println!("{line}");
        if let Some(re) = matcher {
            for caps in re.captures_iter(&line) {
                if let Some(group) = caps.get(1).or_else(|| caps.get(0)) {
                    matched.push(group.as_str().to_string());
                }
            }
        }
    }

    if let Some(handle) = out_handle {
        let _ = handle.join();
    }
    if let Some(handle) = err_handle {
        let _ = handle.join();
    }

    let status = child.wait()?;
    tracing::info!("Operation finished. Exit code: {:?}", status.code());
    Ok((status, matched))
}

/// Forward lines from one pipe into the shared channel until EOF
fn drain<R: Read + Send + 'static>(pipe: R, tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let reader = BufReader::new(pipe);
        for line in reader.lines().map_while(|line| line.ok()) {
            if tx.send(line).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::ScriptedOperator;

    fn shell(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script])
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let spec = CommandSpec::new("pip3").args(["install", "mcdreforged"]);
        assert_eq!(spec.display(), "pip3 install mcdreforged");
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command_returns_matches() {
        let re = Regex::new(r#"into "([^"]+)""#).unwrap();
        let mut op = ScriptedOperator::default();
        let matched = run(
            &shell(r#"echo 'Packed 3 files/folders into "/tmp/out/plugin.mcdr"'"#),
            &mut op,
            Decision::Abort,
            Some(&re),
        )
        .unwrap();
        assert_eq!(matched, vec!["/tmp/out/plugin.mcdr".to_string()]);
        assert_eq!(op.decide_calls, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_matches_without_capture_group_use_whole_match() {
        let re = Regex::new(r"token-\d+").unwrap();
        let mut op = ScriptedOperator::default();
        let matched = run(
            &shell("echo token-1 token-2; echo token-3"),
            &mut op,
            Decision::Abort,
            Some(&re),
        )
        .unwrap();
        assert_eq!(matched, vec!["token-1", "token-2", "token-3"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_abort_default_fails_within_one_attempt() {
        let mut op = ScriptedOperator::default();
        let err = run(&shell("exit 7"), &mut op, Decision::Abort, None).unwrap_err();
        assert!(matches!(err, ExecError::Aborted { .. }));
        assert_eq!(op.decide_calls, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_ignore_returns_failed_attempt_matches() {
        let re = Regex::new(r"partial").unwrap();
        let mut op = ScriptedOperator::default();
        let matched = run(
            &shell("echo partial output; exit 1"),
            &mut op,
            Decision::Ignore,
            Some(&re),
        )
        .unwrap();
        assert_eq!(matched, vec!["partial"]);
        assert_eq!(op.decide_calls, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_retry_reattempts_until_operator_changes_answer() {
        let mut op = ScriptedOperator::new(
            [Decision::Retry, Decision::Retry, Decision::Ignore],
            [],
        );
        let matched = run(&shell("exit 1"), &mut op, Decision::Abort, None).unwrap();
        assert!(matched.is_empty());
        assert_eq!(op.decide_calls, 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_retry_resets_the_match_buffer() {
        let re = Regex::new(r"attempt").unwrap();
        // Two failed attempts each echo one matching line; with the buffer
        // reset per attempt the Ignore result holds exactly one match.
        let mut op = ScriptedOperator::new([Decision::Retry, Decision::Ignore], []);
        let matched = run(
            &shell("echo attempt; exit 1"),
            &mut op,
            Decision::Abort,
            Some(&re),
        )
        .unwrap();
        assert_eq!(matched, vec!["attempt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_lines_are_part_of_the_combined_stream() {
        let re = Regex::new(r"oops-\w+").unwrap();
        let mut op = ScriptedOperator::default();
        let matched = run(
            &shell("echo oops-stderr >&2"),
            &mut op,
            Decision::Abort,
            Some(&re),
        )
        .unwrap();
        assert_eq!(matched, vec!["oops-stderr"]);
    }
}
