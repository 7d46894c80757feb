//! Parsing of git's left-right divergence output

use crate::{Error, Result};

/// Commit counts between a source and a destination ref
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Divergence {
    /// Commits reachable from the destination but not the source
    pub ahead: u64,
    /// Commits reachable from the source but not the destination
    pub behind: u64,
}

impl Divergence {
    /// Parse the output of `git rev-list --left-right --count SRC...DST`
    ///
    /// The output is `<left>\t<right>`: left counts commits only on the
    /// source (the destination is behind by that many), right counts commits
    /// only on the destination (it is ahead by that many).
    pub fn parse(output: &str) -> Result<Self> {
        let parts: Vec<&str> = output.trim().split('\t').collect();
        let [left, right] = parts.as_slice() else {
            return Err(Error::UnexpectedCountOutput(output.to_string()));
        };

        Ok(Self {
            behind: parse_count(left)?,
            ahead: parse_count(right)?,
        })
    }

    /// Whether both refs point at the same history
    pub fn is_equal(&self) -> bool {
        self.ahead == 0 && self.behind == 0
    }

    /// Human-readable status of `dst` relative to `src`
    pub fn describe(&self, src: &str, dst: &str) -> String {
        if self.is_equal() {
            return format!("{} is same as {}", dst, src);
        }

        let mut clauses = Vec::with_capacity(2);
        if self.ahead > 0 {
            clauses.push(format!("{} commits ahead", self.ahead));
        }
        if self.behind > 0 {
            clauses.push(format!("{} commits behind", self.behind));
        }

        format!("compared to {}, {} is {}", src, dst, clauses.join(" and "))
    }
}

fn parse_count(field: &str) -> Result<u64> {
    field.parse().map_err(|source| Error::InvalidCount {
        field: field.to_string(),
        source,
    })
}

/// Symmetric-difference range between two branches of one remote
pub fn divergence_range(remote: &str, src: &str, dst: &str) -> String {
    format!("{remote}/{src}...{remote}/{dst}")
}

/// Split `git log --oneline --left-right` output into one entry per commit
///
/// Order is kept as git printed it; nothing is filtered or deduplicated.
pub fn parse_commit_log(output: &str) -> Vec<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_string).collect()
}
