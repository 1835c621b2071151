//! Error taxonomy of the shell.
//!
//! Only [`ShellError::Allocation`] is fatal. Everything else is reported on the
//! error stream where it is detected and the loop carries on.

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure the shell can report.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A line or argument buffer could not grow.
    #[error("allocation error")]
    Allocation(#[from] TryReserveError),

    /// A builtin was invoked without an argument it requires.
    #[error("expected argument to \"{0}\"")]
    Usage(&'static str),

    /// The working directory could not be changed.
    #[error("{}: {source}", .path.display())]
    ChangeDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program named by the first argument could not be located.
    #[error("{0}: command not found")]
    NotFound(String),

    /// The child process could not be created.
    #[error("{name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child to terminate failed.
    #[error("wait: {0}")]
    Wait(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ShellError {
    /// Whether the process must terminate after reporting this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Allocation(_))
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_usage_error_names_the_builtin() {
        let err = ShellError::Usage("cd");
        assert_eq!(err.to_string(), "expected argument to \"cd\"");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_not_found_error() {
        let err = ShellError::NotFound("frobnicate".to_string());
        assert_eq!(err.to_string(), "frobnicate: command not found");
    }

    #[test]
    fn test_change_directory_error_includes_reason() {
        let err = ShellError::ChangeDirectory {
            path: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "/nope: No such file or directory");
    }

    #[test]
    fn test_only_allocation_is_fatal() {
        let mut v: Vec<u8> = Vec::new();
        let reserve = v.try_reserve(usize::MAX).unwrap_err();
        assert!(ShellError::Allocation(reserve).is_fatal());
        assert!(!ShellError::Wait(io::Error::other("boom")).is_fatal());
        assert!(!ShellError::NotFound("x".into()).is_fatal());
    }
}
