//! Code-signature presence checks.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::process::ProcessRunner;

/// Reports whether a path carries a valid platform code signature.
///
/// This is a delegation point only; the engine never verifies signatures
/// itself.
pub trait SignatureChecker: Send + Sync {
    /// Returns `true` if `path` is validly signed. Failures read as unsigned.
    fn is_signed(&self, path: &Path) -> bool;

    /// Returns `false` if this checker can never report a signature.
    fn is_available(&self) -> bool {
        true
    }
}

/// Checker for targets without a signature tool. Always reports unsigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSignatureChecker;

impl SignatureChecker for NoSignatureChecker {
    fn is_signed(&self, _path: &Path) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Runs `codesign --verify <path>`; exit status 0 means signed.
#[derive(Clone)]
pub struct CodesignChecker {
    runner: Arc<dyn ProcessRunner>,
    program: String,
}

impl CodesignChecker {
    /// Creates a checker that invokes `program` through `runner`.
    pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }
}

impl SignatureChecker for CodesignChecker {
    fn is_signed(&self, path: &Path) -> bool {
        let args = [OsStr::new("--verify"), path.as_os_str()];
        match self.runner.run(&self.program, &args) {
            Ok(output) => output.success(),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "signature check unavailable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InspectError;
    use crate::Result;
    use crate::tools::process::ProcessOutput;
    use std::sync::Mutex;

    struct Recording {
        exit_code: Option<i32>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ProcessRunner for Recording {
        fn run(&self, program: &str, args: &[&OsStr]) -> Result<ProcessOutput> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((
                    program.to_string(),
                    args.iter().map(|a| a.to_string_lossy().into_owned()).collect(),
                ));
            }
            Ok(ProcessOutput {
                exit_code: self.exit_code,
                stdout: String::new(),
            })
        }
    }

    struct Missing;

    impl ProcessRunner for Missing {
        fn run(&self, program: &str, _args: &[&OsStr]) -> Result<ProcessOutput> {
            Err(InspectError::unavailable(program))
        }
    }

    #[test]
    fn test_exit_zero_is_signed() {
        let runner = Arc::new(Recording {
            exit_code: Some(0),
            calls: Mutex::new(Vec::new()),
        });
        let checker = CodesignChecker::new(runner.clone(), "codesign");
        assert!(checker.is_signed(Path::new("/Applications/App.app")));

        let calls = runner.calls.lock().map(|c| c.clone()).unwrap_or_default();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "codesign");
        assert_eq!(calls[0].1, vec!["--verify", "/Applications/App.app"]);
    }

    #[test]
    fn test_nonzero_is_unsigned() {
        let runner = Arc::new(Recording {
            exit_code: Some(1),
            calls: Mutex::new(Vec::new()),
        });
        let checker = CodesignChecker::new(runner, "codesign");
        assert!(!checker.is_signed(Path::new("unsigned.dylib")));
    }

    #[test]
    fn test_missing_tool_is_unsigned() {
        let checker = CodesignChecker::new(Arc::new(Missing), "codesign");
        assert!(!checker.is_signed(Path::new("a")));
    }

    #[test]
    fn test_no_checker() {
        assert!(!NoSignatureChecker.is_signed(Path::new("a")));
        assert!(!NoSignatureChecker.is_available());
    }
}
