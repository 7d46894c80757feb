//! Per-repository results and their human and JSON renderings

use std::io::Write;

use serde::Serialize;

use crate::Result;

/// Result of comparing the branches of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    /// Repository URL as given on input
    pub url: String,
    /// Whether source and destination are identical
    pub equal: bool,
    /// Human-readable status sentence
    pub status: String,
    /// One-line summaries of the differing commits
    pub commits: Vec<String>,
    /// Failure message when the repository could not be compared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepoStatus {
    /// Status entry for a repository that failed to process
    pub fn failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            url: url.into(),
            equal: false,
            status: format!("error: {}", message),
            commits: Vec::new(),
            error: Some(message),
        }
    }

    /// Whether this entry records a failure
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Streaming plain-text report, one line per repository
///
/// URLs are left-aligned to the longest URL of the run; commit summaries of
/// differing repositories follow on their own indented lines.
pub struct HumanReport<W> {
    out: W,
    width: usize,
}

impl<W: Write> HumanReport<W> {
    /// Create a report whose URL column fits every URL in `urls`
    pub fn new<S: AsRef<str>>(out: W, urls: &[S]) -> Self {
        let width = urls
            .iter()
            .map(|u| u.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        Self { out, width }
    }

    /// Write the lines for one repository
    pub fn write_status(&mut self, status: &RepoStatus) -> Result<()> {
        writeln!(self.out, "{:<width$} {}", status.url, status.status, width = self.width)?;
        if !status.equal {
            for commit in &status.commits {
                writeln!(self.out, "  {}", commit)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Write every status as a single pretty-printed JSON array
pub fn write_json<W: Write>(mut out: W, statuses: &[RepoStatus]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, statuses)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal(url: &str) -> RepoStatus {
        RepoStatus {
            url: url.to_string(),
            equal: true,
            status: "release is same as main".to_string(),
            commits: Vec::new(),
            error: None,
        }
    }

    fn divergent(url: &str) -> RepoStatus {
        RepoStatus {
            url: url.to_string(),
            equal: false,
            status: "compared to main, release is 1 commits ahead".to_string(),
            commits: vec!["> abc123 add feature".to_string()],
            error: None,
        }
    }

    #[test]
    fn test_human_report_pads_urls() {
        let urls = ["https://h/a.git", "https://h/long.git"];
        let mut report = HumanReport::new(Vec::new(), &urls);
        report.write_status(&equal(urls[0])).unwrap();
        report.write_status(&divergent(urls[1])).unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(
            text,
            "https://h/a.git    release is same as main\n\
             https://h/long.git compared to main, release is 1 commits ahead\n  > abc123 add feature\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let mut out = Vec::new();
        write_json(&mut out, &[equal("u1"), divergent("u2")]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["url"], "u1");
        assert_eq!(entries[0]["equal"], true);
        assert_eq!(entries[0]["commits"], serde_json::json!([]));
        assert!(entries[0].get("error").is_none());
        assert_eq!(entries[1]["commits"][0], "> abc123 add feature");
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn test_failed_entry() {
        let status = RepoStatus::failed("u", "unable to update remote: u");
        assert!(status.is_failed());
        assert!(!status.equal);
        assert_eq!(status.status, "error: unable to update remote: u");

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["error"], "unable to update remote: u");
    }
}
