//! Synchronous child-process execution.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::Command;
use std::process::Stdio;

use tracing::debug;

use crate::InspectError;
use crate::Result;

/// Captured result of running an external program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,

    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
}

impl ProcessOutput {
    /// Returns `true` if the process exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external programs on behalf of the tool collaborators.
///
/// Production wiring uses [`SystemProcessRunner`]; tests inject runners that
/// return canned output.
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args` to completion and captures its stdout.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::CapabilityUnavailable`] if the program does not
    /// exist, or [`InspectError::Io`] if it cannot be spawned.
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<ProcessOutput>;
}

/// Runs programs with `std::process::Command`.
///
/// Stdin is closed and stderr discarded; only stdout and the exit code are
/// captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    InspectError::unavailable(program)
                } else {
                    InspectError::Io(e)
                }
            })?;

        debug!(program, status = ?output.status.code(), "external tool finished");

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
