//! Error types for the report pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one pipeline stage. Each variant maps to its own exit code.
#[derive(Debug, Error)]
pub enum BeautifyError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Failed to parse report: {0}")]
    Parse(String),

    #[error("{action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file path: {0}")]
    Tree(#[from] TreeError),

    /// Only raised if the built-in page template loses its tree slot
    #[error("Failed to render page: {0}")]
    Template(String),
}

impl BeautifyError {
    /// Shorthand for wrapping an I/O error with the path it concerns
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BeautifyError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            BeautifyError::Config(_) => 2,
            BeautifyError::Fetch { .. } => 3,
            BeautifyError::Parse(_) => 4,
            BeautifyError::Filesystem { .. } | BeautifyError::Tree(_) => 5,
            BeautifyError::Template(_) => 6,
        }
    }
}

/// A path that cannot be placed in the file tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("'{0}' is both a file and a directory")]
    Conflict(String),

    #[error("empty file path")]
    EmptyPath,

    #[error("'{0}' has a '..' or backslash segment")]
    Unsafe(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_stage() {
        let io = || std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let codes = [
            BeautifyError::Config("x".into()).exit_code(),
            BeautifyError::Fetch {
                url: "http://h".into(),
                reason: "down".into(),
            }
            .exit_code(),
            BeautifyError::Parse("x".into()).exit_code(),
            BeautifyError::fs("Failed to read", "a", io()).exit_code(),
            BeautifyError::Template("x".into()).exit_code(),
        ];
        let mut sorted = codes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
        assert!(codes.iter().all(|c| *c > 1));
    }

    #[test]
    fn tree_errors_count_as_filesystem_failures() {
        let err: BeautifyError = TreeError::Conflict("pkg".into()).into();
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("pkg"));
    }

    #[test]
    fn filesystem_message_names_path() {
        let err = BeautifyError::fs(
            "Failed to read",
            "report.html",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        assert_eq!(err.to_string(), "Failed to read report.html: No such file");
    }
}
