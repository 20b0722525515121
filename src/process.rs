//! External builder/searcher execution.
//!
//! The harness never links against the index under test; it runs two opaque
//! executables:
//!
//! ```text
//! builder <db-file>                > <index artifact>   (binary, verbatim)
//! searcher <query-file> <index>    > 0/1 text, one bit per query line
//! ```
//!
//! Launching goes through the narrow [`ProcessExecutor`] capability so the
//! validator can be driven by fakes in tests. Calls block until the child
//! exits; there is no timeout at this layer.

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempPath;
use tracing::{debug, info};

use crate::error::{SimcheckError, SimcheckResult};

/// Where a child's stdout goes.
#[derive(Debug)]
pub enum StdoutTarget {
    /// Collect into [`ProcessOutput::stdout`].
    Capture,
    /// Stream straight into an already open file.
    File(File),
}

/// Exit status and captured streams of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout (empty when redirected to a file).
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run an external program, capture its output, report its exit status.
pub trait ProcessExecutor {
    /// Run `program` with `args` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started or waited
    /// on. A non-zero exit is reported through [`ProcessOutput::code`].
    fn run(
        &self,
        program: &Path,
        args: &[&OsStr],
        stdout: StdoutTarget,
    ) -> std::io::Result<ProcessOutput>;
}

/// [`ProcessExecutor`] backed by [`std::process::Command`].
///
/// A bare program name (no directory part) is looked up on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn resolve(program: &Path) -> std::io::Result<PathBuf> {
        let bare = program
            .parent()
            .is_none_or(|p| p.as_os_str().is_empty());
        if !bare {
            return Ok(program.to_path_buf());
        }
        which::which(program).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found on PATH: {e}", program.display()),
            )
        })
    }
}

impl ProcessExecutor for SystemExecutor {
    fn run(
        &self,
        program: &Path,
        args: &[&OsStr],
        stdout: StdoutTarget,
    ) -> std::io::Result<ProcessOutput> {
        let resolved = Self::resolve(program)?;
        let mut cmd = Command::new(&resolved);
        cmd.args(args).stdin(Stdio::null()).stderr(Stdio::piped());
        match stdout {
            StdoutTarget::Capture => cmd.stdout(Stdio::piped()),
            StdoutTarget::File(file) => cmd.stdout(Stdio::from(file)),
        };

        debug!(program = %resolved.display(), "spawning");
        let output = cmd.output()?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Drives the builder and searcher executables of the system under test.
#[derive(Debug)]
pub struct IndexRunner<'a, E: ProcessExecutor + ?Sized> {
    executor: &'a E,
    builder: Option<PathBuf>,
    searcher: PathBuf,
}

impl<'a, E: ProcessExecutor + ?Sized> IndexRunner<'a, E> {
    pub fn new(executor: &'a E, builder: Option<PathBuf>, searcher: PathBuf) -> Self {
        Self {
            executor,
            builder,
            searcher,
        }
    }

    /// Build an index from `db_source` into a new temporary artifact.
    ///
    /// The builder's stdout is written verbatim to the artifact. The artifact
    /// is deleted when the returned [`TempPath`] is dropped, and immediately
    /// if the build fails.
    ///
    /// # Errors
    ///
    /// [`SimcheckError::Config`] when no builder was configured,
    /// [`SimcheckError::Spawn`] when it cannot be launched and
    /// [`SimcheckError::ProcessFailed`] when it exits non-zero.
    pub fn build(&self, db_source: &Path) -> SimcheckResult<TempPath> {
        let builder = self
            .builder
            .as_deref()
            .ok_or_else(|| SimcheckError::Config("no index builder configured".to_owned()))?;

        let artifact = tempfile::Builder::new()
            .prefix("index_")
            .suffix(".bin")
            .tempfile()
            .map_err(|e| SimcheckError::io(std::env::temp_dir(), e))?;
        let sink = artifact
            .reopen()
            .map_err(|e| SimcheckError::io(artifact.path(), e))?;

        let command = describe(builder, &[db_source.as_os_str()]);
        info!(%command, index = %artifact.path().display(), "building index");

        let output = self
            .executor
            .run(builder, &[db_source.as_os_str()], StdoutTarget::File(sink))
            .map_err(|source| SimcheckError::Spawn {
                command: command.clone(),
                source,
            })?;
        check_exit(&command, &output)?;

        Ok(artifact.into_temp_path())
    }

    /// Run the searcher over `query_source` against `index` and return its
    /// raw stdout.
    ///
    /// # Errors
    ///
    /// [`SimcheckError::Spawn`] when the searcher cannot be launched and
    /// [`SimcheckError::ProcessFailed`] when it exits non-zero.
    pub fn search(&self, query_source: &Path, index: &Path) -> SimcheckResult<String> {
        let args = [query_source.as_os_str(), index.as_os_str()];
        let command = describe(&self.searcher, &args);
        info!(%command, "searching");

        let output = self
            .executor
            .run(&self.searcher, &args, StdoutTarget::Capture)
            .map_err(|source| SimcheckError::Spawn {
                command: command.clone(),
                source,
            })?;
        check_exit(&command, &output)?;

        debug!(bytes = output.stdout.len(), "search output captured");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn check_exit(command: &str, output: &ProcessOutput) -> SimcheckResult<()> {
    if output.success() {
        return Ok(());
    }
    Err(SimcheckError::ProcessFailed {
        command: command.to_owned(),
        code: output.code,
        stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
    })
}

/// Render `program args...` for logs and error messages.
fn describe(program: &Path, args: &[&OsStr]) -> String {
    let mut line = OsString::from(program.as_os_str());
    for arg in args {
        line.push(" ");
        line.push(arg);
    }
    line.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Write;

    use super::*;

    /// Records invocations and replies with a canned result.
    struct Canned {
        code: Option<i32>,
        stdout: &'static str,
        calls: RefCell<Vec<Vec<OsString>>>,
    }

    impl Canned {
        fn new(code: Option<i32>, stdout: &'static str) -> Self {
            Self {
                code,
                stdout,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProcessExecutor for Canned {
        fn run(
            &self,
            program: &Path,
            args: &[&OsStr],
            stdout: StdoutTarget,
        ) -> std::io::Result<ProcessOutput> {
            let mut call = vec![program.as_os_str().to_owned()];
            call.extend(args.iter().map(|a| (*a).to_owned()));
            self.calls.borrow_mut().push(call);

            let captured = match stdout {
                StdoutTarget::Capture => self.stdout.as_bytes().to_vec(),
                StdoutTarget::File(mut f) => {
                    f.write_all(self.stdout.as_bytes())?;
                    Vec::new()
                }
            };
            Ok(ProcessOutput {
                code: self.code,
                stdout: captured,
                stderr: b"boom\n".to_vec(),
            })
        }
    }

    fn with_builder(exec: &Canned) -> IndexRunner<'_, Canned> {
        IndexRunner::new(exec, Some(PathBuf::from("./prep")), PathBuf::from("./search"))
    }

    #[test]
    fn test_build_writes_artifact() {
        let exec = Canned::new(Some(0), "INDEXBYTES");
        let runner = with_builder(&exec);
        let index = runner
            .build(Path::new("db.txt"))
            .expect("build should succeed");
        assert_eq!(
            std::fs::read(&index).expect("index artifact should exist"),
            b"INDEXBYTES"
        );
        assert_eq!(
            exec.calls.borrow()[0],
            vec![OsString::from("./prep"), OsString::from("db.txt")]
        );
    }

    #[test]
    fn test_build_failure_reports_exit() {
        let exec = Canned::new(Some(3), "partial");
        let runner = with_builder(&exec);
        let err = runner
            .build(Path::new("db.txt"))
            .expect_err("non-zero exit should fail");
        match err {
            SimcheckError::ProcessFailed { command, code, stderr } => {
                assert_eq!(command, "./prep db.txt");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_without_builder() {
        let exec = Canned::new(Some(0), "");
        let runner = IndexRunner::new(&exec, None, PathBuf::from("./search"));
        assert!(matches!(
            runner.build(Path::new("db.txt")),
            Err(SimcheckError::Config(_))
        ));
        assert!(exec.calls.borrow().is_empty());
    }

    #[test]
    fn test_search_captures_stdout() {
        let exec = Canned::new(Some(0), "1\n0\n");
        let runner = IndexRunner::new(&exec, None, PathBuf::from("./search"));
        let out = runner
            .search(Path::new("q.txt"), Path::new("idx.bin"))
            .expect("search should succeed");
        assert_eq!(out, "1\n0\n");
        assert_eq!(
            exec.calls.borrow()[0],
            vec![
                OsString::from("./search"),
                OsString::from("q.txt"),
                OsString::from("idx.bin")
            ]
        );
    }

    #[test]
    fn test_search_killed_by_signal() {
        let exec = Canned::new(None, "");
        let runner = IndexRunner::new(&exec, None, PathBuf::from("./search"));
        let err = runner
            .search(Path::new("q.txt"), Path::new("idx.bin"))
            .expect_err("signal death should fail");
        assert!(matches!(err, SimcheckError::ProcessFailed { code: None, .. }));
    }

    #[test]
    fn test_describe() {
        let line = describe(Path::new("/bin/search"), &[OsStr::new("q"), OsStr::new("i")]);
        assert_eq!(line, "/bin/search q i");
    }
}
