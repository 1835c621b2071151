use std::env as stdenv;
use std::ffi::OsString;
use std::path::PathBuf;

/// Session view of the process-wide state external commands inherit.
///
/// The environment contains:
/// - `current_dir`: the working directory children start in; `cd` keeps it in
///   step with the process working directory.
/// - `search_path`: the directory list programs are looked up in (the `PATH`
///   captured at startup).
///
/// Variables themselves are not copied: launched programs inherit the parent's
/// environment untouched.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// Directories searched for single-component command names; `/bin:/usr/bin` when unset.
    pub search_path: Option<OsString>,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    pub fn new() -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            search_path: stdenv::var_os("PATH"),
        }
    }

    /// Resolve `target` against the current directory unless it is absolute.
    pub fn resolve(&self, target: &str) -> PathBuf {
        let target = PathBuf::from(target);
        if target.is_absolute() {
            target
        } else {
            self.current_dir.join(target)
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
