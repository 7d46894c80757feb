//! In-memory [`GitCommands`] used by unit tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::GitCommands;
use crate::{Error, Result};

/// Records every call and answers divergence queries from canned output
///
/// Canned output is keyed by remote name, which is the part of the range
/// before the first `/`.
#[derive(Debug, Default)]
pub(crate) struct FakeGit {
    calls: RefCell<Vec<String>>,
    remotes: RefCell<Vec<String>>,
    counts: HashMap<String, String>,
    logs: HashMap<String, String>,
    failing_updates: HashSet<String>,
    failing_logs: HashSet<String>,
}

impl FakeGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_divergence(mut self, remote: &str, count: &str, log: &str) -> Self {
        self.counts.insert(remote.to_string(), count.to_string());
        self.logs.insert(remote.to_string(), log.to_string());
        self
    }

    pub(crate) fn with_failing_update(mut self, remote: &str) -> Self {
        self.failing_updates.insert(remote.to_string());
        self
    }

    pub(crate) fn with_failing_log(mut self, remote: &str) -> Self {
        self.failing_logs.insert(remote.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count_calls(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn remote_of(range: &str) -> &str {
        range.split('/').next().unwrap_or(range)
    }
}

impl GitCommands for FakeGit {
    fn init(&self, dir: &Path) -> Result<()> {
        self.record("init".to_string());
        std::fs::create_dir_all(dir.join(".git"))?;
        Ok(())
    }

    fn list_remotes(&self, _dir: &Path) -> Result<Vec<String>> {
        self.record("list_remotes".to_string());
        Ok(self.remotes.borrow().clone())
    }

    fn add_remote(&self, _dir: &Path, name: &str, url: &str) -> Result<()> {
        self.record(format!("add_remote {name} {url}"));
        self.remotes.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn update_remote(&self, _dir: &Path, name: &str) -> Result<()> {
        self.record(format!("update_remote {name}"));
        if self.failing_updates.contains(name) {
            return Err(Error::Git {
                command: format!("git remote update {name}"),
                message: "fatal: could not read from remote repository".to_string(),
            });
        }
        Ok(())
    }

    fn count_divergence(&self, _dir: &Path, range: &str) -> Result<String> {
        self.record(format!("count_divergence {range}"));
        Ok(self
            .counts
            .get(Self::remote_of(range))
            .cloned()
            .unwrap_or_else(|| "0\t0\n".to_string()))
    }

    fn log_divergence(&self, _dir: &Path, range: &str) -> Result<String> {
        self.record(format!("log_divergence {range}"));
        if self.failing_logs.contains(Self::remote_of(range)) {
            return Err(Error::Git {
                command: format!("git log --oneline --left-right {range}"),
                message: "fatal: bad revision".to_string(),
            });
        }
        Ok(self
            .logs
            .get(Self::remote_of(range))
            .cloned()
            .unwrap_or_default())
    }
}
