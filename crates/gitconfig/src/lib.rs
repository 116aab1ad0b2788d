//! `git config` wrapper for Rust
//!
//! A small, synchronous interface to the git CLI's per-repository settings.
//! Every call spawns one `git config` process in the configured working
//! directory.
//!
//! # Example
//!
//! ```no_run
//! use gitconfig::GitConfig;
//!
//! let config = GitConfig::with_workdir("/path/to/repo");
//!
//! config.replace_all("beadbridge.github.origin.user", "octocat")?;
//! let listing = config.get_regexp(r"^beadbridge\.github\.origin\.")?;
//! for line in listing.lines() {
//!     println!("{}", line);
//! }
//! # Ok::<(), gitconfig::Error>(())
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// `git config` exits with this status when a lookup matched nothing
const EXIT_NO_MATCH: i32 = 1;

/// Errors that can occur when interacting with git config
#[derive(Error, Debug)]
pub enum Error {
    #[error("git is not installed or not in PATH")]
    NotInstalled,

    #[error("Not in a git repository")]
    NotInRepo,

    #[error("git config failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Output from a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Get combined stdout and stderr output
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// True when git reported "nothing matched" rather than a real failure
    fn is_no_match(&self) -> bool {
        self.code == Some(EXIT_NO_MATCH) && self.stdout.trim().is_empty()
    }
}

/// git config CLI wrapper
#[derive(Debug, Clone, Default)]
pub struct GitConfig {
    /// Working directory (the repository whose config is used)
    workdir: Option<PathBuf>,
}

impl GitConfig {
    /// Create a wrapper for the current directory, checking git is installed
    pub fn new() -> Result<Self> {
        let config = Self::default();
        if !config.is_available() {
            return Err(Error::NotInstalled);
        }
        Ok(config)
    }

    /// Create with a specific working directory
    pub fn with_workdir(path: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(path.into()),
        }
    }

    /// Working directory, if one was set
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    /// Check if git is available
    pub fn is_available(&self) -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Replace every value of `key` with `value`
    pub fn replace_all(&self, key: &str, value: &str) -> Result<()> {
        let output = self.run_command(&["--replace-all", key, value])?;
        if !output.success {
            return Err(Error::CommandFailed(output.combined()));
        }
        Ok(())
    }

    /// List every `key value` pair whose key matches `pattern`
    ///
    /// Returns the raw listing, one pair per line. A pattern that matches
    /// nothing yields an empty string.
    pub fn get_regexp(&self, pattern: &str) -> Result<String> {
        let output = self.run_command(&["--get-regexp", pattern])?;
        if output.is_no_match() {
            return Ok(String::new());
        }
        if !output.success {
            return Err(Error::CommandFailed(output.combined()));
        }
        Ok(output.stdout)
    }

    /// Remove a whole section (e.g. `beadbridge.github.origin`)
    pub fn remove_section(&self, section: &str) -> Result<()> {
        let output = self.run_command(&["--remove-section", section])?;
        if !output.success {
            return Err(Error::CommandFailed(output.combined()));
        }
        Ok(())
    }

    // --- Private helpers ---

    fn run_command(&self, args: &[&str]) -> Result<CommandOutput> {
        let mut cmd = Command::new("git");
        cmd.arg("config");
        cmd.args(args);

        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotInstalled
            } else {
                Error::Io(e)
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() && stderr.contains("not in a git directory") {
            return Err(Error::NotInRepo);
        }

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout,
            stderr,
        })
    }
}
