//! The shared cache repository
//!
//! A single git repository holds every compared repository as a remote.
//! Remote names are the SHA-256 of the repository URL, which keeps them
//! filesystem-safe and stable across runs.

use std::io::ErrorKind;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::divergence::{divergence_range, parse_commit_log, Divergence};
use crate::git::GitCommands;
use crate::{Error, Result};

/// Derive the remote name for a repository URL
///
/// Lowercase hex SHA-256 of the raw URL bytes; no normalization is applied.
pub fn remote_name(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

/// Outcome of comparing two branches of one remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Commit counts between the branches
    pub divergence: Divergence,
    /// Status sentence describing the divergence
    pub status: String,
    /// One-line summaries of the differing commits, empty when equal
    pub commits: Vec<String>,
}

impl Comparison {
    /// Whether the branches are identical
    pub fn is_equal(&self) -> bool {
        self.divergence.is_equal()
    }
}

/// A git repository in the cache directory, accessed through `G`
#[derive(Debug)]
pub struct CacheRepo<G> {
    dir: PathBuf,
    git: G,
}

impl<G: GitCommands> CacheRepo<G> {
    /// Open the cache at `dir`, creating and initializing it if needed
    pub fn open(dir: impl Into<PathBuf>, git: G) -> Result<Self> {
        let repo = Self {
            dir: dir.into(),
            git,
        };
        repo.ensure_initialized()?;
        Ok(repo)
    }

    /// The git backend in use
    pub fn git(&self) -> &G {
        &self.git
    }

    /// Initialize the repository unless `.git` is already present
    ///
    /// Returns `true` if an initialization was performed.
    pub fn ensure_initialized(&self) -> Result<bool> {
        match std::fs::metadata(self.dir.join(".git")) {
            Ok(_) => return Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        std::fs::create_dir_all(&self.dir)?;
        self.git.init(&self.dir)?;
        tracing::info!(dir = %self.dir.display(), "initialized cache repository");

        Ok(true)
    }

    /// Whether a remote with exactly this name is registered
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        Ok(self.git.list_remotes(&self.dir)?.iter().any(|r| r == name))
    }

    /// Register `url` as a remote called `name`
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.git.add_remote(&self.dir, name, url)?;
        tracing::info!(remote = %name, %url, "registered remote");
        Ok(())
    }

    /// Fetch all refs of a remote
    pub fn update_remote(&self, name: &str) -> Result<()> {
        self.git.update_remote(&self.dir, name)
    }

    /// Compare `<name>/<src>` against `<name>/<dst>`
    ///
    /// The commit log is only queried when the branches differ.
    pub fn compare(&self, name: &str, src: &str, dst: &str) -> Result<Comparison> {
        let range = divergence_range(name, src, dst);
        let divergence = Divergence::parse(&self.git.count_divergence(&self.dir, &range)?)?;
        tracing::debug!(
            remote = %name,
            ahead = divergence.ahead,
            behind = divergence.behind,
            "computed divergence"
        );

        let commits = if divergence.is_equal() {
            Vec::new()
        } else {
            let log = self
                .git
                .log_divergence(&self.dir, &range)
                .map_err(|e| Error::CommitLog(Box::new(e)))?;
            parse_commit_log(&log)
        };

        Ok(Comparison {
            divergence,
            status: divergence.describe(src, dst),
            commits,
        })
    }
}
