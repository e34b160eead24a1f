// src/content/frontmatter.rs
// =============================================================================
// Repairs the quoting of `description:` lines.
//
// Translated pages often ended up with descriptions like
//
//     description: 'API Proxy'de mesajlar'
//
// which is invalid YAML: the apostrophe closes the single-quoted string.
// We switch such lines to double quotes, and collapse the doubled
// apostrophes ('') some editors produced inside double-quoted values.
//
//     description: 'API Proxy'de mesajlar'  ->  description: "API Proxy'de mesajlar"
//     description: "GitOps''un"             ->  description: "GitOps'un"
//     description: "API Proxy'de mesajlar"  ->  unchanged
// =============================================================================

use crate::error::{DocsError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

struct Patterns {
    single_quoted_start: Regex,
    single_quoted_line: Regex,
    double_quoted_start: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        single_quoted_start: Regex::new(r"^\s*description:\s*'").expect("description pattern"),
        single_quoted_line: Regex::new(r"^(\s*description:\s*)'(.*)'\s*$").expect("description pattern"),
        double_quoted_start: Regex::new(r#"^\s*description:\s*""#).expect("description pattern"),
    })
}

/// Returns `content` with every broken description line repaired.
///
/// Lines are split on '\n' only, so '\r' and everything else stays intact.
pub fn fix_description_quotes(content: &str) -> String {
    let patterns = patterns();
    let lines: Vec<&str> = content.split('\n').collect();
    let mut fixed: Vec<String> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if patterns.single_quoted_start.is_match(line) {
            if line.trim_end().ends_with('\'') {
                // Opens and closes on this line
                let repaired = patterns.single_quoted_line.captures(line).and_then(|caps| {
                    let indent = caps.get(1)?.as_str();
                    let inner = caps.get(2)?.as_str();
                    inner.contains('\'').then(|| format!("{}\"{}\"", indent, inner))
                });
                fixed.push(repaired.unwrap_or_else(|| line.to_string()));
            } else {
                // Spans several lines: copy through the closing quote untouched
                fixed.push(line.to_string());
                i += 1;
                while i < lines.len() {
                    fixed.push(lines[i].to_string());
                    if lines[i].trim_end().ends_with('\'') {
                        break;
                    }
                    i += 1;
                }
            }
        } else if patterns.double_quoted_start.is_match(line) && line.contains("''") {
            fixed.push(line.replace("''", "'"));
        } else {
            fixed.push(line.to_string());
        }

        i += 1;
    }

    fixed.join("\n")
}

/// Repairs one file in place. Returns whether it needed changes.
///
/// With `dry_run` the file is left alone and only the answer is returned.
pub fn fix_file(path: &Path, dry_run: bool) -> Result<bool> {
    let content = std::fs::read_to_string(path).map_err(|e| DocsError::read(path, e))?;
    let fixed = fix_description_quotes(&content);

    if fixed == content {
        return Ok(false);
    }
    if !dry_run {
        std::fs::write(path, fixed).map_err(|e| DocsError::write(path, e))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quotes_with_apostrophe_become_double() {
        let input = "---\ntitle: x\ndescription: 'API Proxy'de mesajlar'\n---\n";
        let expected = "---\ntitle: x\ndescription: \"API Proxy'de mesajlar\"\n---\n";
        assert_eq!(fix_description_quotes(input), expected);
    }

    #[test]
    fn test_indent_is_kept_and_trailing_space_dropped() {
        let input = "  description: 'it's fine'   ";
        assert_eq!(fix_description_quotes(input), "  description: \"it's fine\"");
    }

    #[test]
    fn test_clean_single_quotes_untouched() {
        let input = "description: 'plain text'";
        assert_eq!(fix_description_quotes(input), input);
    }

    #[test]
    fn test_doubled_apostrophes_collapse() {
        let input = "description: \"GitOps''un yapısı\"";
        assert_eq!(fix_description_quotes(input), "description: \"GitOps'un yapısı\"");
    }

    #[test]
    fn test_correct_double_quotes_untouched() {
        let input = "description: \"API Proxy'de mesajlar\"";
        assert_eq!(fix_description_quotes(input), input);
    }

    #[test]
    fn test_multiline_description_copied_verbatim() {
        let input = "description: 'first line\n  it's second'\ntitle: 'a'b'";
        assert_eq!(fix_description_quotes(input), input);
    }

    #[test]
    fn test_fix_file_reports_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.mdx");
        std::fs::write(&path, "description: 'Proxy'nin ayarları'\n").unwrap();

        assert!(fix_file(&path, true).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "description: 'Proxy'nin ayarları'\n"
        );

        assert!(fix_file(&path, false).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "description: \"Proxy'nin ayarları\"\n"
        );
        assert!(!fix_file(&path, false).unwrap());
    }
}
