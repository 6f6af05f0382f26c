//! External text generation over a child process.
//!
//! The generation call is a blocking foreign-process invocation behind a
//! request/response seam: callers hand over a prompt and a wall-clock budget
//! and get back raw text or a typed failure. The `TextGenerator` trait keeps
//! the rest of the crate independent of the process-spawning mechanism.
//!
//! Failure mapping:
//! - spawn `NotFound`            -> `ProcessUnavailable`
//! - any other spawn/IO fault    -> `Generation`
//! - deadline elapsed            -> child killed, `Timeout`
//! - non-zero exit / empty text  -> `EmptyResponse`

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::AppError;

/// Capability interface: produce text from a prompt under a time budget.
pub trait TextGenerator {
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, AppError>;
}

/// A generator that spawns one child process per call, writes the prompt to
/// its stdin, and reads the response from its stdout.
///
/// Each invocation owns its own process instance; there is no shared mutable
/// state, so callers may serialize multiple requests through one value.
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The default local-model invocation: `ollama run <model>`.
    pub fn ollama(model: &str) -> Self {
        Self::new("ollama", vec!["run".to_string(), model.to_string()])
    }
}

impl TextGenerator for ProcessGenerator {
    fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, AppError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AppError::ProcessUnavailable(self.program.clone()),
                _ => AppError::Generation(format!("failed to spawn `{}`: {e}", self.program)),
            })?;

        // Write the prompt, then close stdin so the process sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(prompt.as_bytes()) {
                // A broken pipe means the process exited before reading; the
                // exit-status path below reports what happened.
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AppError::Generation(format!("failed to write prompt: {e}")));
                }
            }
        }

        // Drain stdout/stderr on threads so a chatty process can't block on a
        // full pipe while we wait on it.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let out_handle = std::thread::spawn(move || drain(stdout));
        let err_handle = std::thread::spawn(move || drain(stderr));

        let status = wait_with_deadline(&mut child, timeout)?;

        let output = out_handle.join().unwrap_or_default();
        let _ = err_handle.join();

        if !status.success() {
            return Err(AppError::EmptyResponse);
        }
        let output = output.trim();
        if output.is_empty() {
            return Err(AppError::EmptyResponse);
        }
        Ok(output.to_string())
    }
}

fn drain<R: Read>(reader: Option<R>) -> String {
    let mut out = String::new();
    if let Some(mut reader) = reader {
        // Invalid UTF-8 or a torn-down pipe both degrade to "whatever we got".
        let mut bytes = Vec::new();
        let _ = reader.read_to_end(&mut bytes);
        out = String::from_utf8_lossy(&bytes).into_owned();
    }
    out
}

/// Wait for the child under a hard wall-clock deadline.
///
/// On expiry the child is forcibly killed and reaped; partial output is
/// discarded by the caller.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<ExitStatus, AppError> {
    const POLL: Duration = Duration::from_millis(25);
    let deadline = Instant::now() + timeout;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AppError::Timeout(timeout.as_secs()));
                }
                std::thread::sleep(POLL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(AppError::Generation(format!("failed to wait on process: {e}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn missing_executable_is_process_unavailable() {
        let generator = ProcessGenerator::new("slens-no-such-binary", vec![]);
        let err = generator.generate("hello", TIMEOUT).unwrap_err();
        match err {
            AppError::ProcessUnavailable(program) => {
                assert_eq!(program, "slens-no-such-binary");
            }
            other => panic!("expected ProcessUnavailable, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn echoing_process_returns_the_prompt() {
        let generator = ProcessGenerator::new("cat", vec![]);
        let out = generator.generate("weekly sales prompt", TIMEOUT).unwrap();
        assert_eq!(out, "weekly sales prompt");
    }

    #[cfg(unix)]
    #[test]
    fn clean_exit_with_empty_output_is_empty_response() {
        let generator = ProcessGenerator::new("true", vec![]);
        let err = generator.generate("hello", TIMEOUT).unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_empty_response() {
        let generator = ProcessGenerator::new("false", vec![]);
        let err = generator.generate("hello", TIMEOUT).unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse));
    }

    #[cfg(unix)]
    #[test]
    fn blocked_process_times_out_within_bounds() {
        let generator = ProcessGenerator::new("sleep", vec!["30".to_string()]);
        let started = Instant::now();
        let err = generator.generate("hello", Duration::from_secs(1)).unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, AppError::Timeout(1)));
        assert!(
            elapsed >= Duration::from_secs(1) && elapsed < Duration::from_secs(3),
            "timeout was not enforced within bounds: {elapsed:?}"
        );
    }
}
