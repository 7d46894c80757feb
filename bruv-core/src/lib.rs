//! Bruv Core - compare two branches across many remote git repositories
//!
//! Every repository is registered as a remote of one shared cache repository,
//! fetched, and then its source and destination branches are compared with
//! `git rev-list --left-right --count`.

pub mod cache;
pub mod compare;
pub mod config;
pub mod divergence;
pub mod error;
pub mod git;
pub mod report;

pub use cache::{remote_name, CacheRepo, Comparison};
pub use compare::{CompareOptions, Comparator, OnError};
pub use config::{default_cache_dir, Config};
pub use divergence::Divergence;
pub use error::{Error, Result};
pub use git::{CliGit, GitCommands};
pub use report::{write_json, HumanReport, RepoStatus};
