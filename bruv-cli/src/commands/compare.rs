//! Compare command - report branch divergence for every repository

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use bruv_core::{
    write_json, CliGit, CompareOptions, Comparator, Config, GitCommands, HumanReport, OnError,
};
use clap::Args;

/// Compare `<dst>` against `<src>` in each repository
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Source branch name
    pub src: String,

    /// Destination branch name
    pub dst: String,

    /// Repository URLs
    #[arg(required_unless_present = "stdin")]
    pub urls: Vec<String>,

    /// Use stdin as list of repositories
    #[arg(short = 'i', long)]
    pub stdin: bool,

    /// Use this directory for cache [default: ~/.cache/bruv]
    #[arg(short, long, value_name = "DIR", env = "BRUV_CACHE_DIR")]
    pub cache: Option<PathBuf>,

    /// Output in JSON
    #[arg(short, long)]
    pub json: bool,

    /// Keep processing remaining repositories after a failure
    #[arg(long)]
    pub keep_going: bool,

    /// Path to git executable (overrides config and env)
    #[arg(long, value_name = "PATH", env = "BRUV_GIT_PATH")]
    pub git: Option<String>,
}

impl CompareArgs {
    /// Execute the compare command
    pub fn execute(&self) -> anyhow::Result<()> {
        let config = Config::load_with_overrides(self.cache.clone(), self.git.clone())?;
        let cache_dir = config.cache_dir()?;

        tracing::debug!(
            cache_dir = %cache_dir.display(),
            git = %config.git.path,
            "starting comparison"
        );

        let git = CliGit::new().with_path(&config.git.path);
        self.run(git, &cache_dir, io::stdin().lock(), io::stdout().lock())
    }

    /// Compare every repository, reading extra URLs from `input` and
    /// writing the report to `out`
    ///
    /// Fails after the report is written if any repository failed under
    /// `--keep-going`.
    fn run<G, R, W>(&self, git: G, cache_dir: &Path, input: R, out: W) -> anyhow::Result<()>
    where
        G: GitCommands,
        R: BufRead,
        W: Write,
    {
        let mut urls = self.urls.clone();
        if self.stdin {
            urls.extend(read_urls(input)?);
        }

        let options = CompareOptions::new(&self.src, &self.dst).with_on_error(if self.keep_going {
            OnError::Continue
        } else {
            OnError::Abort
        });

        let comparator = Comparator::open(cache_dir, git, options)
            .with_context(|| format!("unable to init cache dir: {}", cache_dir.display()))?;

        let statuses = if self.json {
            let statuses = comparator.run(&urls, |_| Ok(()))?;
            write_json(out, &statuses).context("unable to marshal to JSON")?;
            statuses
        } else {
            let mut report = HumanReport::new(out, &urls);
            comparator.run(&urls, |status| report.write_status(status))?
        };

        let failed = statuses.iter().filter(|s| s.is_failed()).count();
        if failed > 0 {
            bail!("{} of {} repositories failed", failed, statuses.len());
        }

        Ok(())
    }
}

/// Read one URL per line, skipping empty lines
fn read_urls<R: BufRead>(reader: R) -> anyhow::Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line.context("unable to read repositories from stdin")?;
        if !line.is_empty() {
            urls.push(line);
        }
    }
    Ok(urls)
}
