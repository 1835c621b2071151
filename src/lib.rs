//! A tiny interactive command interpreter.
//!
//! Each iteration prints a prompt, reads one line, splits it on whitespace and
//! either runs one of the builtins (`cd`, `help`, `exit`) in-process or
//! launches the named program and waits for it to finish.
//!
//! The main entry point is [`Interpreter`]. [`reader`] and [`lexer`] are the
//! line and token stages it is built from; [`command`], [`env`] and
//! [`io_adapters`] expose the stream seam, the session state and in-memory
//! writers for driving the interpreter without a terminal.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod reader;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
