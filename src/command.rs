use std::io::Write;
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal are reported as `128 + signal`, like POSIX shells do.
pub type ExitCode = i32;

/// Signal returned by every dispatch path and consumed only by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Keep reading commands.
    Continue,
    /// Leave the loop after this iteration.
    Stop,
}

impl ExecutionStatus {
    /// Integer form of the status: `0` stops the loop, anything else continues.
    pub fn code(self) -> i32 {
        match self {
            ExecutionStatus::Stop => 0,
            ExecutionStatus::Continue => 1,
        }
    }

}

/// Abstraction over a writable output stream that can also hand a [`Stdio`]
/// handle to launched programs.
///
/// The process streams hand out [`Stdio::inherit`], so children write to the
/// same terminal as the shell.
pub trait Stdout: Write {
    /// A [`Stdio`] handle suitable for `std::process::Command`.
    fn stdio(&self) -> Stdio;
}

impl Stdout for std::io::Stdout {
    fn stdio(&self) -> Stdio {
        Stdio::inherit()
    }
}

impl Stdout for std::io::Stderr {
    fn stdio(&self) -> Stdio {
        Stdio::inherit()
    }
}

/// Children write straight into the file through a duplicated descriptor.
impl Stdout for std::fs::File {
    fn stdio(&self) -> Stdio {
        match self.try_clone() {
            Ok(file) => Stdio::from(file),
            Err(e) => {
                log::warn!("cannot share output file with child: {}", e);
                Stdio::null()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ExecutionStatus::Stop.code(), 0);
        assert_ne!(ExecutionStatus::Continue.code(), 0);
    }
}
