// src/config.rs
// =============================================================================
// Explicit configuration values shared by the subcommands.
//
// - DocsLayout: where the documentation lives and which extension marks a
//   content file
// - LinkPolicy: which language tree is checked, which one is the source
//   language, and which links are exempt from existence checks
//
// Both are plain values built from the command line and passed down by
// reference. Nothing here is global.
// =============================================================================

use crate::error::{DocsError, Result};
use std::path::{Path, PathBuf};

/// Location of the documentation tree on disk.
#[derive(Debug, Clone)]
pub struct DocsLayout {
    pub root: PathBuf,
    /// Content extension without the leading dot, e.g. "mdx".
    pub extension: String,
}

impl DocsLayout {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        DocsLayout {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// The extension as it appears at the end of a file name: ".mdx"
    pub fn suffix(&self) -> String {
        format!(".{}", self.extension)
    }

    pub fn lang_dir(&self, lang: &str) -> PathBuf {
        self.root.join(lang)
    }

    /// Returns the language directory, or a fatal error if it is missing.
    pub fn require_lang_dir(&self, lang: &str) -> Result<PathBuf> {
        let dir = self.lang_dir(lang);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(DocsError::MissingRoot(dir))
        }
    }

    /// Root-relative path with forward slashes, e.g. "tr/admin/roles.mdx".
    ///
    /// Falls back to the full path when `path` is outside the root.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Rules for the link checker.
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    /// Language tree being checked ("en")
    pub lang: String,
    /// Language the content was translated from ("tr")
    pub source_lang: String,
    /// Link prefixes that are always valid (checked after the fragment is removed)
    pub exempt_prefixes: Vec<String>,
    /// Pages that live at the site root instead of under a language tree
    pub root_pages: Vec<String>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        LinkPolicy {
            lang: "en".to_string(),
            source_lang: "tr".to_string(),
            exempt_prefixes: vec!["/images/".to_string(), "/api-reference/".to_string()],
            root_pages: vec!["/quickstart".to_string(), "/index".to_string()],
        }
    }
}

impl LinkPolicy {
    pub fn with_languages(lang: &str, source_lang: &str) -> Self {
        LinkPolicy {
            lang: lang.to_string(),
            source_lang: source_lang.to_string(),
            ..LinkPolicy::default()
        }
    }

    /// "/en/"
    pub fn lang_prefix(&self) -> String {
        format!("/{}/", self.lang)
    }

    /// "/tr/"
    pub fn source_prefix(&self) -> String {
        format!("/{}/", self.source_lang)
    }
}
