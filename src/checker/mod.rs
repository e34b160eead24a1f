// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - paths: normalizing links and generating candidate spellings
// - translate: the Turkish -> English segment table
// - resolve: deciding whether a link points at an existing page
// - markdown / html: pulling links out of content files
// - report: running the whole check over a language tree
//
// This file ties the extractors together behind one small trait so the
// report code does not care how a link was written.
// =============================================================================

mod html;
mod markdown;
mod paths;
mod report;
mod resolve;
mod translate;

use std::collections::BTreeSet;

pub use html::HrefAttributeMatcher;
pub use markdown::{InlineLinkMatcher, ReferenceLinkMatcher};
pub use report::{check_language_tree, LinkReport};
pub use resolve::{LinkResolver, Resolution};
pub use translate::TranslationTable;

/// One way of spotting links in text.
///
/// Matchers are best effort: text they do not recognize is simply skipped.
pub trait LinkMatcher {
    fn find_links(&self, content: &str) -> Vec<String>;
}

/// Runs a list of matchers and merges what they find.
pub struct LinkExtractor {
    matchers: Vec<Box<dyn LinkMatcher>>,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        LinkExtractor::new(vec![
            Box::new(InlineLinkMatcher),
            Box::new(HrefAttributeMatcher),
            Box::new(ReferenceLinkMatcher),
        ])
    }
}

impl LinkExtractor {
    pub fn new(matchers: Vec<Box<dyn LinkMatcher>>) -> Self {
        LinkExtractor { matchers }
    }

    /// Internal links (starting with "/") found by any matcher, deduplicated
    /// and sorted.
    pub fn extract(&self, content: &str) -> BTreeSet<String> {
        self.matchers
            .iter()
            .flat_map(|matcher| matcher.find_links(content))
            .filter(|link| link.starts_with('/'))
            .collect()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Box<dyn LinkMatcher>?
//    - A "trait object": a value of some type that implements LinkMatcher,
//      where the concrete type is only known at runtime
//    - Box puts it on the heap so matchers of different sizes fit in one Vec
//
// 2. Why a BTreeSet?
//    - The same link often appears twice (markdown and a Card href)
//    - A set drops duplicates; the B-tree keeps them sorted, so reports
//      come out in the same order every run
//
// 3. Why filter on '/' here when matchers already do?
//    - Matchers are written independently; the extractor enforces the one
//      rule the rest of the checker relies on
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_merges_and_dedupes() {
        let content = r#"
[Overview](/en/overview)

<Card href="/en/overview" />
<a href='/en/setup'>Setup</a>

See the [ref link][r].

[r]: /en/reference
"#;
        let links: Vec<_> = LinkExtractor::default().extract(content).into_iter().collect();
        assert_eq!(links, vec!["/en/overview", "/en/reference", "/en/setup"]);
    }

    #[test]
    fn test_custom_matcher_list() {
        struct Everything;
        impl LinkMatcher for Everything {
            fn find_links(&self, content: &str) -> Vec<String> {
                content.split_whitespace().map(str::to_string).collect()
            }
        }

        let extractor = LinkExtractor::new(vec![Box::new(Everything)]);
        let links = extractor.extract("/a b /c");
        assert_eq!(links.len(), 2);
    }
}
