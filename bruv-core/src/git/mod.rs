//! Git access for bruv
//!
//! All version-control work is delegated to the `git` executable. The core
//! only talks to it through [`GitCommands`], so orchestration can be tested
//! against a fake.

mod backend;
#[cfg(test)]
pub(crate) mod fake;

pub use backend::{parse_remote_list, CliGit, GitCommands};
