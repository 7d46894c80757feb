//! Sequential comparison of many repositories

use std::path::Path;

use crate::cache::CacheRepo;
use crate::git::GitCommands;
use crate::report::RepoStatus;
use crate::{Error, Result};

/// What to do when a repository cannot be processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnError {
    /// Stop the run at the first failing repository
    #[default]
    Abort,
    /// Record the failure as a status entry and move on
    Continue,
}

/// Immutable settings of one run
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Source branch name
    pub src: String,
    /// Destination branch name
    pub dst: String,
    /// Failure policy
    pub on_error: OnError,
}

impl CompareOptions {
    /// Compare `dst` against `src`, aborting on the first failure
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            on_error: OnError::Abort,
        }
    }

    /// Set the failure policy
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }
}

/// Compares the same pair of branches across repositories
pub struct Comparator<G> {
    cache: CacheRepo<G>,
    options: CompareOptions,
}

impl<G: GitCommands> Comparator<G> {
    /// Create a comparator over an opened cache
    pub fn new(cache: CacheRepo<G>, options: CompareOptions) -> Self {
        Self { cache, options }
    }

    /// Open (and if needed initialize) the cache at `dir` and build a comparator
    pub fn open(dir: &Path, git: G, options: CompareOptions) -> Result<Self> {
        Ok(Self::new(CacheRepo::open(dir, git)?, options))
    }

    /// The underlying cache
    pub fn cache(&self) -> &CacheRepo<G> {
        &self.cache
    }

    /// Register, fetch and compare a single repository
    pub fn compare_url(&self, url: &str) -> Result<RepoStatus> {
        let name = crate::cache::remote_name(url);

        let exists = self
            .cache
            .has_remote(&name)
            .map_err(|e| Error::for_repository(url, "unable to determine state of git remote", e))?;

        if !exists {
            self.cache
                .add_remote(&name, url)
                .map_err(|e| Error::for_repository(url, "unable to init remote", e))?;
        }

        self.cache
            .update_remote(&name)
            .map_err(|e| Error::for_repository(url, "unable to update remote", e))?;

        let comparison = self
            .cache
            .compare(&name, &self.options.src, &self.options.dst)
            .map_err(|e| Error::for_repository(url, "unable to show difference for remote", e))?;

        Ok(RepoStatus {
            url: url.to_string(),
            equal: comparison.is_equal(),
            status: comparison.status,
            commits: comparison.commits,
            error: None,
        })
    }

    /// Process every URL in order
    ///
    /// `on_status` sees each entry as soon as it is ready; an error it returns
    /// stops the run. With [`OnError::Abort`] the first repository failure is
    /// returned, otherwise it is recorded via [`RepoStatus::failed`].
    pub fn run<S, F>(&self, urls: &[S], mut on_status: F) -> Result<Vec<RepoStatus>>
    where
        S: AsRef<str>,
        F: FnMut(&RepoStatus) -> Result<()>,
    {
        let mut statuses = Vec::with_capacity(urls.len());

        for url in urls {
            let url = url.as_ref();
            let status = match self.compare_url(url) {
                Ok(status) => status,
                Err(e) if self.options.on_error == OnError::Continue => {
                    tracing::warn!(%url, error = %e.chain_message(), "repository failed, continuing");
                    RepoStatus::failed(url, e.chain_message())
                }
                Err(e) => return Err(e),
            };

            on_status(&status)?;
            statuses.push(status);
        }

        Ok(statuses)
    }
}
