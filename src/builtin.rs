use crate::command::{ExecutionStatus, Stdout};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::lexer::ArgumentVector;
use std::env;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process without spawning a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    /// `cd <dir>`
    ChangeDirectory,
    /// `help`
    Help,
    /// `exit`
    Exit,
}

impl Builtin {
    /// Canonical name of the command, e.g. "cd" or "exit".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::ChangeDirectory => "cd",
            Builtin::Help => "help",
            Builtin::Exit => "exit",
        }
    }

    /// Runs the builtin and reports any failure on `stderr`.
    ///
    /// Failures never stop the loop; only `exit` yields [`ExecutionStatus::Stop`].
    pub fn run(
        self,
        args: &ArgumentVector<'_>,
        registry: &BuiltinRegistry,
        stdout: &mut dyn Stdout,
        stderr: &mut dyn Stdout,
        env: &mut Environment,
    ) -> Result<ExecutionStatus> {
        match self.execute(args, registry, stdout, env) {
            Ok(status) => Ok(status),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::warn!("{} failed: {}", self.name(), e);
                writeln!(stderr, "ash: {}", e)?;
                Ok(ExecutionStatus::Continue)
            }
        }
    }

    fn execute(
        self,
        args: &ArgumentVector<'_>,
        registry: &BuiltinRegistry,
        stdout: &mut dyn Stdout,
        env: &mut Environment,
    ) -> Result<ExecutionStatus> {
        match self {
            Builtin::ChangeDirectory => {
                let target = args.get(1).ok_or(ShellError::Usage(self.name()))?;
                change_directory(target, env)?;
                Ok(ExecutionStatus::Continue)
            }
            Builtin::Help => {
                writeln!(stdout, "Custom Shell in Rust")?;
                writeln!(stdout, "Type arguments and then hit enter")?;
                writeln!(stdout, "The following are built-in programs:")?;
                for name in registry.names() {
                    writeln!(stdout, " {}", name)?;
                }
                stdout.flush()?;
                Ok(ExecutionStatus::Continue)
            }
            Builtin::Exit => Ok(ExecutionStatus::Stop),
        }
    }
}

fn change_directory(target: &str, env: &mut Environment) -> Result<()> {
    let new_dir = env.resolve(target);
    env::set_current_dir(&new_dir).map_err(|source| ShellError::ChangeDirectory {
        path: target.into(),
        source,
    })?;
    env.current_dir = env::current_dir().unwrap_or(new_dir);
    log::debug!("working directory is now {}", env.current_dir.display());
    Ok(())
}

/// Fixed, ordered set of builtins, built once before the loop starts.
#[derive(Debug, Clone)]
pub(crate) struct BuiltinRegistry {
    entries: Vec<Builtin>,
}

impl BuiltinRegistry {
    pub fn new(entries: Vec<Builtin>) -> Self {
        Self { entries }
    }

    /// First builtin whose name is exactly `name`.
    pub fn lookup(&self, name: &str) -> Option<Builtin> {
        self.entries.iter().copied().find(|b| b.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|b| b.name())
    }
}

impl Default for BuiltinRegistry {
    /// `cd`, `help` and `exit`, in that order.
    fn default() -> Self {
        Self::new(vec![Builtin::ChangeDirectory, Builtin::Help, Builtin::Exit])
    }
}
