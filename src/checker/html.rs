// src/checker/html.rs
// =============================================================================
// This module extracts internal links from href attributes.
//
// MDX pages embed components such as <Card href="/en/overview"> and plain
// <a href='/en/x'> tags. We look for the attribute text itself rather than
// parsing the page as HTML: JSX is not HTML, and an HTML tokenizer gets
// derailed by things like a self-closed <iframe /> (raw text until the end
// of the file) or a prop holding a component (`icon={<Icon />}`).
//
// Rust concepts:
// - OnceLock: compile the pattern once, on first use
// - captures_iter: every match in the text, with its capture groups
// =============================================================================

use super::LinkMatcher;
use regex::Regex;
use std::sync::OnceLock;

fn href_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"href=["'](/[^"']+)["']"#).expect("href pattern"))
}

/// Matches `href="/path"` and `href='/path'` on any element
pub struct HrefAttributeMatcher;

impl LinkMatcher for HrefAttributeMatcher {
    fn find_links(&self, content: &str) -> Vec<String> {
        href_regex()
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
