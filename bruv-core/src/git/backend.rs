//! The narrow git interface and its subprocess implementation

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::{Error, Result};

/// The git capabilities bruv needs
///
/// Every method operates on the repository at `dir`. Divergence queries
/// return the raw stdout of git so callers own the parsing.
pub trait GitCommands {
    /// Initialize an empty repository in `dir`
    fn init(&self, dir: &Path) -> Result<()>;

    /// List the names of all registered remotes
    fn list_remotes(&self, dir: &Path) -> Result<Vec<String>>;

    /// Register `url` as a remote called `name`
    fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()>;

    /// Fetch all refs of the remote called `name`
    fn update_remote(&self, dir: &Path, name: &str) -> Result<()>;

    /// Raw output of `rev-list --left-right --count <range>`
    fn count_divergence(&self, dir: &Path, range: &str) -> Result<String>;

    /// Raw output of `log --oneline --left-right <range>`
    fn log_divergence(&self, dir: &Path, range: &str) -> Result<String>;
}

/// Extract remote names from a remote listing
///
/// Each non-empty line names one remote. Only the first whitespace-delimited
/// token is taken, so annotated listings (`name<TAB>url (fetch)`) still yield
/// bare names.
pub fn parse_remote_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// [`GitCommands`] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct CliGit {
    git_path: String,
}

impl CliGit {
    /// Create a backend using `git` from `PATH`
    pub fn new() -> Self {
        Self {
            git_path: "git".to_string(),
        }
    }

    /// Use a specific git executable
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.git_path = path.into();
        self
    }

    /// Run `git -C <dir> <args>` to completion and return its stdout
    fn run<I, S>(&self, dir: &Path, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command = std::iter::once("git".to_string())
            .chain(args.iter().map(|a| {
                let arg: &OsStr = a.as_ref();
                arg.to_string_lossy().into_owned()
            }))
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!(dir = %dir.display(), %command, "running git");

        let output = Command::new(&self.git_path)
            .arg("-C")
            .arg(dir)
            .args(&args)
            .output()
            .map_err(|e| Error::Git {
                command: command.clone(),
                message: if e.kind() == std::io::ErrorKind::NotFound {
                    format!("git executable not found at '{}'", self.git_path)
                } else {
                    e.to_string()
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git {
                command,
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for CliGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCommands for CliGit {
    fn init(&self, dir: &Path) -> Result<()> {
        self.run(dir, ["init"]).map(|_| ())
    }

    fn list_remotes(&self, dir: &Path) -> Result<Vec<String>> {
        let stdout = self.run(dir, ["remote", "show", "-n"])?;
        Ok(parse_remote_list(&stdout))
    }

    fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()> {
        self.run(dir, ["remote", "add", name, url]).map(|_| ())
    }

    fn update_remote(&self, dir: &Path, name: &str) -> Result<()> {
        self.run(dir, ["remote", "update", name]).map(|_| ())
    }

    fn count_divergence(&self, dir: &Path, range: &str) -> Result<String> {
        self.run(dir, ["rev-list", "--left-right", "--count", range])
    }

    fn log_divergence(&self, dir: &Path, range: &str) -> Result<String> {
        self.run(dir, ["log", "--oneline", "--left-right", range])
    }
}
