use crate::builtin::BuiltinRegistry;
use crate::command::{ExecutionStatus, Stdout};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use crate::external;
use crate::lexer::{self, ArgumentVector};
use crate::reader::LineReader;
use std::io::{Read, Write};
use std::process::Stdio;

/// Prompt printed before every read unless configured otherwise.
pub const DEFAULT_PROMPT: &str = "=> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Stopped,
}

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter owns the session [`Environment`], the builtin registry
/// (`cd`, `help`, `exit`) and the two output streams everything is reported on.
///
/// Example
/// ```
/// use ash::Interpreter;
/// use ash::command::ExecutionStatus;
/// use ash::io_adapters::MemWriter;
///
/// let mut sh = Interpreter::new(Box::new(MemWriter::new()), Box::new(MemWriter::new()));
/// assert_eq!(sh.execute_line("   ").unwrap(), ExecutionStatus::Continue);
/// assert_eq!(sh.execute_line("exit").unwrap(), ExecutionStatus::Stop);
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: BuiltinRegistry,
    prompt: String,
    eof_loops: bool,
    inherit_stdin: bool,
    stdout: Box<dyn Stdout>,
    stderr: Box<dyn Stdout>,
}

impl Interpreter {
    /// Create an interpreter writing to the given streams.
    ///
    /// Launched programs get a null standard input; use [`Interpreter::stdio`]
    /// for a shell attached to the process streams.
    pub fn new(stdout: Box<dyn Stdout>, stderr: Box<dyn Stdout>) -> Self {
        Self {
            env: Environment::new(),
            builtins: BuiltinRegistry::default(),
            prompt: DEFAULT_PROMPT.to_string(),
            eof_loops: false,
            inherit_stdin: false,
            stdout,
            stderr,
        }
    }

    /// Create an interpreter attached to the process's standard streams.
    pub fn stdio() -> Self {
        Self {
            inherit_stdin: true,
            ..Self::new(Box::new(std::io::stdout()), Box::new(std::io::stderr()))
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Keep prompting after end-of-input instead of stopping.
    pub fn with_eof_loops(mut self, eof_loops: bool) -> Self {
        self.eof_loops = eof_loops;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Tokenize and dispatch one line.
    pub fn execute_line(&mut self, line: &str) -> Result<ExecutionStatus> {
        let argv = lexer::split_line(line)?;
        self.dispatch(&argv)
    }

    /// Route an argument vector to a builtin or to an external program.
    ///
    /// An empty vector continues without doing anything.
    pub fn dispatch(&mut self, argv: &ArgumentVector<'_>) -> Result<ExecutionStatus> {
        let Some(name) = argv.command() else {
            return Ok(ExecutionStatus::Continue);
        };

        if let Some(builtin) = self.builtins.lookup(name) {
            log::debug!("dispatching builtin {}", name);
            return builtin.run(
                argv,
                &self.builtins,
                self.stdout.as_mut(),
                self.stderr.as_mut(),
                &mut self.env,
            );
        }

        log::debug!("dispatching external {} with {} arguments", name, argv.len() - 1);
        let stdin = if self.inherit_stdin {
            Stdio::inherit()
        } else {
            Stdio::null()
        };
        external::launch(
            argv,
            stdin,
            self.stdout.as_mut(),
            self.stderr.as_mut(),
            &self.env,
        )
    }

    /// Read-Eval-Print Loop: prompt, read, tokenize, dispatch until `exit` or
    /// end-of-input.
    ///
    /// Only fatal errors are returned; everything else was already reported
    /// on the error stream.
    pub fn repl<R: Read>(&mut self, input: R) -> Result<()> {
        let mut reader = LineReader::new(input);
        let mut state = LoopState::Running;

        while state == LoopState::Running {
            write!(self.stdout, "{}", self.prompt)?;
            self.stdout.flush()?;

            let line = match reader.read_line() {
                Ok(line) => line,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    self.report(&e)?;
                    break;
                }
            };

            if line.is_end_of_input() && !self.eof_loops {
                log::debug!("end of input");
                break;
            }

            let status = self.execute_line(&line.text)?;
            log::trace!("dispatch returned {}", status.code());
            state = if status.code() == 0 || (line.hit_eof && !self.eof_loops) {
                LoopState::Stopped
            } else {
                LoopState::Running
            };
        }

        Ok(())
    }

    fn report(&mut self, err: &ShellError) -> Result<()> {
        log::warn!("{}", err);
        writeln!(self.stderr, "ash: {}", err)?;
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::stdio()
    }
}
