// src/index/docs.rs
// =============================================================================
// Compares the navigation in docs.json with the content files on disk.
//
// docs.json nests groups inside tabs inside languages; what matters to us is
// every "pages" array, wherever it appears. Its string elements are page ids
// like "tr/admin/roller" (no extension). We collect those for one language
// and compare them with <root>/<lang>/**/*.<ext>.
// =============================================================================

use crate::config::DocsLayout;
use crate::content::content_files;
use crate::error::{DocsError, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Differences between docs.json and the filesystem for one language
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DocsIndexDiff {
    pub index_pages: usize,
    pub disk_pages: usize,
    /// Listed in docs.json, no file on disk
    pub missing_on_disk: Vec<String>,
    /// File on disk, not listed in docs.json
    pub missing_from_index: Vec<String>,
}

impl DocsIndexDiff {
    pub fn is_clean(&self) -> bool {
        self.missing_on_disk.is_empty() && self.missing_from_index.is_empty()
    }
}

// Collects the string elements of every "pages" array in the document that
// start with `prefix` (e.g. "tr/"). Nested group objects inside "pages" are
// searched as well, through the general walk over all values.
pub fn collect_pages(value: &Value, prefix: &str, pages: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("pages") {
                pages.extend(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|page| page.starts_with(prefix))
                        .map(str::to_string),
                );
            }
            for nested in map.values() {
                collect_pages(nested, prefix, pages);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_pages(item, prefix, pages);
            }
        }
        _ => {}
    }
}

/// Page ids ("tr/admin/roller") of every content file under <root>/<lang>
pub fn disk_pages(layout: &DocsLayout, lang: &str) -> BTreeSet<String> {
    let suffix = layout.suffix();
    content_files(&layout.lang_dir(lang), &suffix)
        .iter()
        .map(|path| {
            let relative = layout.relative(path);
            relative
                .strip_suffix(suffix.as_str())
                .map(str::to_string)
                .unwrap_or(relative)
        })
        .collect()
}

pub fn diff_docs_index(docs: &Value, layout: &DocsLayout, lang: &str) -> DocsIndexDiff {
    let mut index = BTreeSet::new();
    collect_pages(docs, &format!("{}/", lang), &mut index);
    let disk = if layout.lang_dir(lang).is_dir() {
        disk_pages(layout, lang)
    } else {
        BTreeSet::new()
    };

    DocsIndexDiff {
        index_pages: index.len(),
        disk_pages: disk.len(),
        missing_on_disk: index.difference(&disk).cloned().collect(),
        missing_from_index: disk.difference(&index).cloned().collect(),
    }
}

pub fn load_docs_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| DocsError::read(path, e))?;
    serde_json::from_str(&text).map_err(|e| DocsError::json(path, e))
}
