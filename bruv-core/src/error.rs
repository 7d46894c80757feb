//! Error types for bruv

use thiserror::Error;

/// Result type alias for bruv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bruv operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A git subprocess could not be spawned or exited unsuccessfully
    #[error("{command} failed: {message}")]
    Git {
        /// The git command line, without the executable
        command: String,
        /// Trimmed stderr of the process, or the spawn error
        message: String,
    },

    /// `rev-list --count` printed something other than two tab-separated fields
    #[error("unexpected output of git rev-list, expected 2 parts around \\t: {0:?}")]
    UnexpectedCountOutput(String),

    /// One of the `rev-list --count` fields is not a non-negative integer
    #[error("unable to examine output of rev-list: {field}")]
    InvalidCount {
        /// The offending field, verbatim
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// `log --oneline --left-right` failed after the counts were read
    #[error("unable to get git logs")]
    CommitLog(#[source] Box<Error>),

    /// Processing a single repository failed
    #[error("{operation}: {url}")]
    Repository {
        /// Repository URL as given on input
        url: String,
        /// What was being done when the failure happened
        operation: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an error with the repository and operation it belongs to
    pub fn for_repository(url: impl Into<String>, operation: &'static str, source: Error) -> Self {
        Error::Repository {
            url: url.into(),
            operation,
            source: Box::new(source),
        }
    }

    /// Render the error together with its chain of sources on a single line
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_message_includes_sources() {
        let inner = Error::Git {
            command: "git remote update abc".to_string(),
            message: "fatal: repository not found".to_string(),
        };
        let err = Error::for_repository("https://host/a.git", "unable to update remote", inner);

        assert_eq!(
            err.chain_message(),
            "unable to update remote: https://host/a.git: git remote update abc failed: fatal: repository not found"
        );
    }

    #[test]
    fn test_invalid_count_keeps_field() {
        let source = "abc".parse::<u64>().unwrap_err();
        let err = Error::InvalidCount {
            field: "abc".to_string(),
            source,
        };
        assert!(err.to_string().contains("abc"));
    }
}
