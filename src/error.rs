// src/error.rs
// =============================================================================
// Typed errors for the parts of the tool that behave like a library
// (layout checks, index loading, content rewriting).
//
// The command layer in main.rs still works with anyhow::Result; these errors
// convert into anyhow::Error automatically through the ? operator.
//
// Messages name the path only. The io/serde cause stays in `source`, and
// `{:#}` on the anyhow error prints the whole chain.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    /// The language directory we were asked to scan is not there at all.
    /// This is fatal: nothing else can be checked.
    #[error("{} directory does not exist", .0.display())]
    MissingRoot(PathBuf),

    #[error("could not read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocsError>;

impl DocsError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocsError::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocsError::Write { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DocsError::Json { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_alternate_display_keeps_the_io_cause() {
        let err = DocsError::read("menu-index.txt", io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(err.to_string(), "could not read menu-index.txt");

        let report = anyhow::Error::from(err).context("loading the outline");
        assert_eq!(
            format!("{:#}", report),
            "loading the outline: could not read menu-index.txt: no such file"
        );
    }

    #[test]
    fn test_json_error_has_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DocsError::json("docs.json", source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
