// src/checker/report.rs
// =============================================================================
// Runs the link check over a whole language tree and collects the issues.
//
// For every content file under <root>/<lang>:
// 1. Read it (a read failure becomes one issue, the run continues)
// 2. Extract links
// 3. Resolve each link
// 4. Keep the ones that are not valid, with the line they first appear on
//
// Files without issues are counted but not stored.
// =============================================================================

use super::{LinkExtractor, LinkResolver, Resolution};
use crate::config::DocsLayout;
use crate::content::content_files;
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Broken,
    NeedsTranslation,
    Unreadable,
}

/// A single problem found in a content file
#[derive(Debug, Clone, Serialize)]
pub struct LinkIssue {
    /// 1-based line of the first occurrence; 0 when the file could not be read
    pub line: usize,
    pub link: String,
    pub kind: IssueKind,
    pub message: String,
}

/// Issues of one file
#[derive(Debug, Clone, Serialize)]
pub struct FileIssues {
    /// Root-relative path, e.g. "en/admin/roles.mdx"
    pub path: String,
    pub issues: Vec<LinkIssue>,
}

/// Result of checking a whole language tree
#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    pub files_checked: usize,
    pub files: Vec<FileIssues>,
}

impl LinkReport {
    pub fn files_with_issues(&self) -> usize {
        self.files.len()
    }

    pub fn total_issues(&self) -> usize {
        self.files.iter().map(|f| f.issues.len()).sum()
    }

    pub fn has_issues(&self) -> bool {
        self.total_issues() > 0
    }
}

// Checks every content file of the policy's language.
//
// Returns Err only when the language directory itself is missing; that
// is the one precondition we cannot work around.
pub fn check_language_tree(
    layout: &DocsLayout,
    resolver: &LinkResolver,
    extractor: &LinkExtractor,
) -> Result<LinkReport> {
    let lang_dir = layout.require_lang_dir(&resolver.policy().lang)?;
    let files = content_files(&lang_dir, &layout.suffix());
    log::info!("found {} content files under {}", files.len(), lang_dir.display());

    let mut report = LinkReport {
        files_checked: files.len(),
        files: Vec::new(),
    };

    for path in &files {
        let issues = check_file(path, resolver, extractor);
        if !issues.is_empty() {
            report.files.push(FileIssues {
                path: layout.relative(path),
                issues,
            });
        }
    }

    Ok(report)
}

// Checks all links of one file.
pub fn check_file(path: &Path, resolver: &LinkResolver, extractor: &LinkExtractor) -> Vec<LinkIssue> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("could not read {}: {}", path.display(), e);
            return vec![LinkIssue {
                line: 0,
                link: "error".to_string(),
                kind: IssueKind::Unreadable,
                message: format!("Could not read file: {}", e),
            }];
        }
    };

    let policy = resolver.policy();
    let mut issues = Vec::new();

    for link in extractor.extract(&content) {
        let resolution = resolver.resolve(&link);
        if resolution.is_valid() {
            continue;
        }
        let kind = match &resolution {
            Resolution::MissingNeedsTranslation { .. } => IssueKind::NeedsTranslation,
            _ => IssueKind::Broken,
        };

        issues.push(LinkIssue {
            line: line_of(&content, &link),
            message: resolution.message(&policy.lang, &policy.source_lang),
            link,
            kind,
        });
    }

    issues.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.link.cmp(&b.link)));
    issues
}

// First line (1-based) containing `needle`; 1 when it is not found
// verbatim (e.g. pulldown-cmark unescaped a reference definition).
fn line_of(content: &str, needle: &str) -> usize {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|index| index + 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::TranslationTable;
    use crate::config::LinkPolicy;
    use crate::error::DocsError;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_report_counts_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/index-page.mdx", "# Fine\n\n[ok](/en/guide)\n");
        write(dir.path(), "en/guide.mdx", "intro\n\n[gone](/en/gone)\n[tr only](/en/draft)\n");
        write(dir.path(), "tr/draft.mdx", "taslak\n");

        let layout = DocsLayout::new(dir.path(), "mdx");
        let policy = LinkPolicy::default();
        let table = TranslationTable::default();
        let resolver = LinkResolver::new(&layout, &policy, &table);

        let report = check_language_tree(&layout, &resolver, &LinkExtractor::default()).unwrap();

        assert_eq!(report.files_checked, 2);
        assert_eq!(report.files_with_issues(), 1);
        assert_eq!(report.total_issues(), 2);
        assert!(report.has_issues());

        let file = &report.files[0];
        assert_eq!(file.path, "en/guide.mdx");
        assert_eq!(file.issues[0].line, 3);
        assert_eq!(file.issues[0].link, "/en/gone");
        assert_eq!(file.issues[0].kind, IssueKind::Broken);
        assert_eq!(file.issues[1].line, 4);
        assert_eq!(file.issues[1].kind, IssueKind::NeedsTranslation);
    }

    #[test]
    fn test_clean_tree_has_no_issues() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en/a.mdx", "[b](/en/b) [site](https://example.com)\n");
        write(dir.path(), "en/b.mdx", "<img src=\"/images/x.png\" /> [a](/en/a.mdx)\n");

        let layout = DocsLayout::new(dir.path(), "mdx");
        let policy = LinkPolicy::default();
        let table = TranslationTable::default();
        let resolver = LinkResolver::new(&layout, &policy, &table);

        let report = check_language_tree(&layout, &resolver, &LinkExtractor::default()).unwrap();
        assert_eq!(report.files_checked, 2);
        assert!(!report.has_issues());
    }

    #[test]
    fn test_missing_language_tree_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DocsLayout::new(dir.path(), "mdx");
        let policy = LinkPolicy::default();
        let table = TranslationTable::default();
        let resolver = LinkResolver::new(&layout, &policy, &table);

        let result = check_language_tree(&layout, &resolver, &LinkExtractor::default());
        assert!(matches!(result, Err(DocsError::MissingRoot(_))));
    }

    #[test]
    fn test_unreadable_file_becomes_single_issue() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DocsLayout::new(dir.path(), "mdx");
        let policy = LinkPolicy::default();
        let table = TranslationTable::default();
        let resolver = LinkResolver::new(&layout, &policy, &table);

        let issues = check_file(&dir.path().join("missing.mdx"), &resolver, &LinkExtractor::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 0);
        assert_eq!(issues[0].kind, IssueKind::Unreadable);
    }

    #[test]
    fn test_line_of() {
        assert_eq!(line_of("a\nb /en/x\nc /en/x", "/en/x"), 2);
        assert_eq!(line_of("nothing here", "/en/x"), 1);
    }
}
