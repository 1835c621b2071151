use crate::command::{ExecutionStatus, ExitCode, Stdout};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::lexer::ArgumentVector;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Directories searched when the session has no `PATH`, as `execvp` does.
pub const DEFAULT_SEARCH_PATH: &str = "/bin:/usr/bin";

/// A program that is not a builtin, resolved to the file that will be executed.
pub(crate) struct ExternalCommand<'a> {
    name: &'a str,
    program: PathBuf,
    args: &'a [&'a str],
}

impl<'a> ExternalCommand<'a> {
    /// Locate the program named by `argv[0]`.
    pub fn resolve(argv: &'a ArgumentVector<'a>, env: &Environment) -> Result<Self> {
        let name = argv.command().ok_or_else(|| ShellError::NotFound(String::new()))?;
        let search_paths = env
            .search_path
            .as_deref()
            .unwrap_or_else(|| OsStr::new(DEFAULT_SEARCH_PATH));
        let program = find_command_path(search_paths, Path::new(name))
            .ok_or_else(|| ShellError::NotFound(name.to_string()))?
            .into_owned();
        Ok(Self {
            name,
            program,
            args: argv.args(),
        })
    }

    /// Spawn the program and block until it exits or is killed by a signal.
    ///
    /// A stopped child is not terminal; waiting continues until it finishes.
    pub fn execute(
        self,
        stdin: Stdio,
        stdout: &mut dyn Stdout,
        stderr: &mut dyn Stdout,
        env: &Environment,
    ) -> Result<ExitCode> {
        stdout.flush()?;
        stderr.flush()?;

        let mut cmd = Command::new(&self.program);
        cmd.args(self.args)
            .stdin(stdin)
            .stdout(stdout.stdio())
            .stderr(stderr.stdio())
            .current_dir(&env.current_dir);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(self.name);
        }

        let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
            name: self.name.to_string(),
            source,
        })?;
        log::debug!("spawned {} as pid {}", self.program.display(), child.id());

        let exit_status = match child.wait() {
            Ok(status) => status,
            Err(e) => {
                log::warn!("waiting for pid {} failed: {}; killing it", child.id(), e);
                if child.kill().is_ok() {
                    let _ = child.wait();
                }
                return Err(ShellError::Wait(e));
            }
        };
        let code = match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status),
        };
        log::info!("{} finished with status {}", self.name, code);
        Ok(code)
    }
}

/// Launch `argv` as a child process and wait for it.
///
/// Every failure is reported on `stderr`; the loop always continues.
pub(crate) fn launch(
    argv: &ArgumentVector<'_>,
    stdin: Stdio,
    stdout: &mut dyn Stdout,
    stderr: &mut dyn Stdout,
    env: &Environment,
) -> Result<ExecutionStatus> {
    let outcome = match ExternalCommand::resolve(argv, env) {
        Ok(cmd) => cmd.execute(stdin, &mut *stdout, &mut *stderr, env),
        Err(e) => Err(e),
    };
    if let Err(e) = outcome {
        if e.is_fatal() {
            return Err(e);
        }
        log::warn!("launch failed: {}", e);
        writeln!(stderr, "ash: {}", e)?;
    }
    Ok(ExecutionStatus::Continue)
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a command path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returns it if it exists.
/// - Relative with multiple components (e.g., `bin/sh`): returns it if it exists.
/// - `./foo` on Unix or any `./`-prefixed path on other platforms: returns it if it exists.
/// - Single path component (no separators): search each directory in `search_paths` (PATH)
///   and return the first existing match.
/// - Empty path: returns `None`.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, None) => None,
        (Some(x), None) => find_in_path(search_paths, x.as_os_str()).map(Cow::Owned),
        _ => find_by_path(path).map(Cow::Borrowed),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(cmd))
        .find(|candidate| is_program(candidate))
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if path.exists() { Some(path) } else { None }
}

// Directories and files without any execute bit are skipped during the PATH walk.
#[cfg(unix)]
fn is_program(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_program(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
