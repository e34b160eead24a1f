// src/checker/markdown.rs
// =============================================================================
// This module extracts internal links written in Markdown syntax.
//
// Two matchers live here:
// - InlineLinkMatcher: [text](/path) found anywhere in the text. MDX files
//   mix Markdown with JSX, so a plain pattern is more forgiving than a
//   full parser for this form.
// - ReferenceLinkMatcher: [text][id] with a separate "[id]: /path" line.
//   The `pulldown-cmark` parser pairs references with their definitions
//   for us, which a single pattern cannot do.
//
// Rust concepts:
// - Traits: both matchers implement LinkMatcher from mod.rs
// - OnceLock: compile a regex once and reuse it on every call
// =============================================================================

use super::LinkMatcher;
use pulldown_cmark::{Event, LinkType, Parser, Tag};
use regex::Regex;
use std::sync::OnceLock;

fn inline_link_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant; failing to compile it is a programmer error
    PATTERN.get_or_init(|| Regex::new(r"\[([^\]]+)\]\((/[^)]+)\)").expect("inline link pattern"))
}

/// Matches `[text](/path)`
pub struct InlineLinkMatcher;

impl LinkMatcher for InlineLinkMatcher {
    fn find_links(&self, content: &str) -> Vec<String> {
        inline_link_regex()
            .captures_iter(content)
            .filter_map(|caps| caps.get(2))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Matches reference-style links whose definition points at an internal page
pub struct ReferenceLinkMatcher;

impl LinkMatcher for ReferenceLinkMatcher {
    fn find_links(&self, content: &str) -> Vec<String> {
        let mut links = Vec::new();

        for event in Parser::new(content) {
            // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
            if let Event::Start(Tag::Link(link_type, dest_url, _title)) = event {
                // Inline links are InlineLinkMatcher's job
                let is_reference = matches!(
                    link_type,
                    LinkType::Reference | LinkType::Collapsed | LinkType::Shortcut
                );
                if is_reference && dest_url.starts_with('/') {
                    links.push(dest_url.to_string());
                }
            }
        }

        links
    }
}
