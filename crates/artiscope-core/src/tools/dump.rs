//! Textual structure dumps of executable containers.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use super::process::ProcessRunner;
use crate::InspectError;
use crate::Result;

/// Produces a textual dump of an executable container's header and load
/// commands.
pub trait StructureDumper: Send + Sync {
    /// Dumps the structure of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::CapabilityUnavailable`] if no dump tool exists,
    /// or [`InspectError::Undecodable`] if the tool rejects the file.
    fn dump(&self, path: &Path) -> Result<String>;

    /// Returns `false` if this dumper can never produce output.
    fn is_available(&self) -> bool {
        true
    }
}

/// Dumper for targets without a dump tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStructureDumper;

impl StructureDumper for NoStructureDumper {
    fn dump(&self, _path: &Path) -> Result<String> {
        Err(InspectError::unavailable("structure dump"))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Runs `otool -hlv <path>` and returns its stdout.
#[derive(Clone)]
pub struct OtoolDumper {
    runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl OtoolDumper {
    /// Creates a dumper that invokes `program` through `runner`.
    pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }
}

impl StructureDumper for OtoolDumper {
    fn dump(&self, path: &Path) -> Result<String> {
        let args = [OsStr::new("-hlv"), path.as_os_str()];
        let output = self.runner.run(&self.program, &args)?;

        if !output.success() {
            warn!(
                path = %path.display(),
                status = ?output.exit_code,
                "structure dump exited abnormally"
            );
            return Err(InspectError::Undecodable(format!(
                "{} rejected {}",
                self.program,
                path.display()
            )));
        }

        Ok(output.stdout)
    }
}
