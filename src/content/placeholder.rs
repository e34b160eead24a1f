// src/content/placeholder.rs
// =============================================================================
// Points placeholder pages at their legacy documentation.
//
// Pages that were created but not written yet contain the sentence
// "Bu sayfa için içerik hazırlanıyor" ("content for this page is being
// prepared"). When menu-index.json knows the old documentation URL of such
// a page, we append a reference to it:
//
//   Bu sayfa için içerik hazırlanıyor. Bu sayfa içeriği için bakınız: <url>
//
// A reference written by an earlier run is replaced rather than appended
// again, so stamping twice leaves the file unchanged.
// =============================================================================

use crate::config::DocsLayout;
use crate::content::content_files;
use crate::error::{DocsError, Result};
use crate::index::MenuIndex;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const PLACEHOLDER_TEXT: &str = "Bu sayfa için içerik hazırlanıyor";
const REFERENCE_TEXT: &str = "Bu sayfa içeriği için bakınız:";

fn placeholder_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(
            r#"(?i){}\.?(?: {} [^\s<>"]+)?"#,
            regex::escape(PLACEHOLDER_TEXT),
            regex::escape(REFERENCE_TEXT)
        );
        Regex::new(&pattern).expect("placeholder pattern")
    })
}

pub fn is_placeholder(content: &str) -> bool {
    placeholder_regex().is_match(content)
}

/// Rewrites every placeholder sentence (and any earlier reference) to point at `url`.
pub fn stamp_content(content: &str, url: &str) -> String {
    let stamped = format!("{}. {} {}", PLACEHOLDER_TEXT, REFERENCE_TEXT, url);
    placeholder_regex()
        .replace_all(content, regex::NoExpand(&stamped))
        .into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderOutcome {
    Updated { url: String },
    /// Already points at the right URL
    Unchanged { url: String },
    /// menu-index.json has no legacy URL for this page
    NoUrl,
    Failed { error: String },
}

#[derive(Debug, Default)]
pub struct PlaceholderStats {
    /// Root-relative path of every placeholder page, with what happened to it
    pub files: Vec<(String, PlaceholderOutcome)>,
}

impl PlaceholderStats {
    fn count(&self, pred: impl Fn(&PlaceholderOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, outcome)| pred(outcome)).count()
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, PlaceholderOutcome::Updated { .. }))
    }

    pub fn without_url(&self) -> usize {
        self.count(|o| matches!(o, PlaceholderOutcome::NoUrl))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, PlaceholderOutcome::Failed { .. }))
    }
}

// Scans every content file under the root (all languages) for the
// placeholder sentence and stamps the ones with a known legacy URL.
pub fn stamp_placeholders(layout: &DocsLayout, index: &MenuIndex, dry_run: bool) -> PlaceholderStats {
    let suffix = layout.suffix();
    let mut stats = PlaceholderStats::default();

    for path in content_files(&layout.root, &suffix) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("could not read {}: {}", path.display(), e);
                continue;
            }
        };
        if !is_placeholder(&content) {
            continue;
        }

        let relative = layout.relative(&path);
        let outcome = match index.find_old_doc_url(&relative, &suffix) {
            None => PlaceholderOutcome::NoUrl,
            Some(url) => match stamp_file(&path, &content, url, dry_run) {
                Ok(true) => PlaceholderOutcome::Updated { url: url.to_string() },
                Ok(false) => PlaceholderOutcome::Unchanged { url: url.to_string() },
                Err(e) => PlaceholderOutcome::Failed {
                    error: format!("{:#}", anyhow::Error::from(e)),
                },
            },
        };
        stats.files.push((relative, outcome));
    }

    stats
}

fn stamp_file(path: &Path, content: &str, url: &str, dry_run: bool) -> Result<bool> {
    let stamped = stamp_content(content, url);
    if stamped == content {
        return Ok(false);
    }
    if !dry_run {
        std::fs::write(path, stamped).map_err(|e| DocsError::write(path, e))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const URL: &str = "https://docs.example.com/display/APIN/Roller";

    #[test]
    fn test_stamp_appends_reference() {
        let content = "---\ntitle: Roller\n---\n\nBu sayfa için içerik hazırlanıyor.\n";
        assert_eq!(
            stamp_content(content, URL),
            format!(
                "---\ntitle: Roller\n---\n\nBu sayfa için içerik hazırlanıyor. Bu sayfa içeriği için bakınız: {}\n",
                URL
            )
        );
    }

    #[test]
    fn test_stamp_is_idempotent() {
        let once = stamp_content("<Note>Bu sayfa için içerik hazırlanıyor</Note>", URL);
        assert_eq!(stamp_content(&once, URL), once);
        assert!(once.ends_with("</Note>"));
    }

    #[test]
    fn test_stamp_replaces_an_older_reference() {
        let old = stamp_content("Bu sayfa için içerik hazırlanıyor.", "https://old.example.com/x");
        assert_eq!(
            stamp_content(&old, URL),
            format!("Bu sayfa için içerik hazırlanıyor. Bu sayfa içeriği için bakınız: {}", URL)
        );
    }

    #[test]
    fn test_detection() {
        assert!(is_placeholder("x\nBu sayfa için içerik hazırlanıyor.\n"));
        assert!(!is_placeholder("Gerçek içerik"));
    }

    #[test]
    fn test_stamp_placeholders_over_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tr/admin")).unwrap();
        fs::write(dir.path().join("tr/admin/roller.mdx"), "Bu sayfa için içerik hazırlanıyor.").unwrap();
        fs::write(dir.path().join("tr/admin/yeni.mdx"), "Bu sayfa için içerik hazırlanıyor.").unwrap();
        fs::write(dir.path().join("tr/admin/dolu.mdx"), "Gerçek içerik").unwrap();

        let index = MenuIndex::from_json(&format!(
            r#"{{"sections": [{{"children": [{{"actual_file": "tr/admin/roller", "old_doc_url": "{}"}}]}}]}}"#,
            URL
        ))
        .unwrap();
        let layout = DocsLayout::new(dir.path(), "mdx");

        let stats = stamp_placeholders(&layout, &index, false);
        assert_eq!(stats.files.len(), 2);
        assert_eq!(stats.updated(), 1);
        assert_eq!(stats.without_url(), 1);
        assert!(fs::read_to_string(dir.path().join("tr/admin/roller.mdx"))
            .unwrap()
            .ends_with(URL));

        let again = stamp_placeholders(&layout, &index, false);
        assert_eq!(again.updated(), 0);
        assert_eq!(
            again.files[0],
            (
                "tr/admin/roller.mdx".to_string(),
                PlaceholderOutcome::Unchanged { url: URL.to_string() }
            )
        );
    }
}
