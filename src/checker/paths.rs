// src/checker/paths.rs
// =============================================================================
// Pure string work on internal links:
//
// 1. normalize_link: "/en/foo.mdx/" -> "/en/foo"
// 2. PathRewriter::translate: "/en/temel-kavramlar/x" -> "/en/core-concepts/x"
// 3. PathRewriter::alternatives: every spelling of a link worth probing on
//    disk, most likely first
//
// Nothing in this file touches the filesystem; resolve.rs does that.
// =============================================================================

use super::translate::TranslationTable;

// Removes a trailing content extension and a trailing slash (unless the link
// is just "/"). Repeats until nothing changes, so the result is stable:
// normalizing twice gives the same answer as normalizing once.
//
// Examples (suffix = ".mdx"):
//   "/en/foo"      -> "/en/foo"
//   "/en/foo.mdx"  -> "/en/foo"
//   "/en/foo/"     -> "/en/foo"
//   "/"            -> "/"
pub fn normalize_link(link: &str, suffix: &str) -> String {
    let mut current = link;
    loop {
        let mut next = current.strip_suffix(suffix).unwrap_or(current);
        if next != "/" {
            next = next.strip_suffix('/').unwrap_or(next);
        }
        if next == current {
            return current.to_string();
        }
        current = next;
    }
}

/// Applies the translation table and extension variations to links.
pub struct PathRewriter<'a> {
    table: &'a TranslationTable,
    suffix: String,
}

impl<'a> PathRewriter<'a> {
    pub fn new(table: &'a TranslationTable, suffix: &str) -> Self {
        PathRewriter {
            table,
            suffix: suffix.to_string(),
        }
    }

    pub fn normalize(&self, link: &str) -> String {
        normalize_link(link, &self.suffix)
    }

    // Translates every path segment found in the table.
    // The extension is set aside for the lookup and put back afterwards,
    // so "konnektor.mdx" becomes "connector.mdx".
    pub fn translate(&self, path: &str) -> String {
        path.split('/')
            .map(|segment| {
                let (base, had_suffix) = match segment.strip_suffix(self.suffix.as_str()) {
                    Some(base) => (base, true),
                    None => (segment, false),
                };
                match self.table.lookup(base) {
                    Some(current) if had_suffix => format!("{}{}", current, self.suffix),
                    Some(current) => current.to_string(),
                    None => segment.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    // Builds the ordered candidate list for a link.
    //
    // The translated spelling goes first: an old Turkish name should resolve
    // to the English page even when a stale file with the old name is still
    // lying around. Duplicates are allowed; the resolver stops at the first hit.
    pub fn alternatives(&self, link: &str) -> Vec<String> {
        let mut candidates = Vec::new();

        let translated = self.translate(link);
        if translated != link {
            candidates.push(translated);
        }
        candidates.push(link.to_string());

        match link.strip_suffix(self.suffix.as_str()) {
            Some(base) => {
                candidates.push(base.to_string());
                let translated_base = self.translate(base);
                if translated_base != base {
                    let with_suffix = format!("{}{}", translated_base, self.suffix);
                    candidates.push(translated_base);
                    candidates.push(with_suffix);
                }
            }
            None => {
                let with_suffix = format!("{}{}", link, self.suffix);
                let translated_with_suffix = self.translate(&with_suffix);
                candidates.push(with_suffix.clone());
                if translated_with_suffix != with_suffix {
                    candidates.push(translated_with_suffix);
                }
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TranslationTable {
        TranslationTable::from_pairs([("temel-kavramlar", "core-concepts"), ("konnektor", "connector")])
    }

    #[test]
    fn test_normalize_examples() {
        assert_eq!(normalize_link("/en/foo", ".mdx"), "/en/foo");
        assert_eq!(normalize_link("/en/foo.mdx", ".mdx"), "/en/foo");
        assert_eq!(normalize_link("/en/foo/", ".mdx"), "/en/foo");
        assert_eq!(normalize_link("/", ".mdx"), "/");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "",
            "/",
            "//",
            "/en/foo.mdx/",
            "/en/foo/.mdx",
            "/en/foo.mdx.mdx",
            ".mdx",
            "/en/foo#intro",
            "relative/path/",
        ];
        for input in inputs {
            let once = normalize_link(input, ".mdx");
            assert_eq!(normalize_link(&once, ".mdx"), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_translate_is_identity_without_known_segments() {
        let table = table();
        let rewriter = PathRewriter::new(&table, ".mdx");
        assert_eq!(rewriter.translate("/en/core-concepts/overview"), "/en/core-concepts/overview");
    }

    #[test]
    fn test_translate_replaces_segments() {
        let table = table();
        let rewriter = PathRewriter::new(&table, ".mdx");
        assert_eq!(rewriter.translate("temel-kavramlar/page"), "core-concepts/page");
        assert_eq!(rewriter.translate("/en/konnektor.mdx"), "/en/connector.mdx");
    }

    #[test]
    fn test_translated_candidate_comes_first() {
        let table = table();
        let rewriter = PathRewriter::new(&table, ".mdx");
        let candidates = rewriter.alternatives("/en/temel-kavramlar/overview");
        assert_eq!(
            candidates,
            vec![
                "/en/core-concepts/overview",
                "/en/temel-kavramlar/overview",
                "/en/temel-kavramlar/overview.mdx",
                "/en/core-concepts/overview.mdx",
            ]
        );
    }

    #[test]
    fn test_candidates_for_link_with_extension() {
        let table = table();
        let rewriter = PathRewriter::new(&table, ".mdx");
        let candidates = rewriter.alternatives("/en/konnektor.mdx");
        assert_eq!(candidates[0], "/en/connector.mdx");
        assert_eq!(candidates[1], "/en/konnektor.mdx");
        assert!(candidates.contains(&"/en/konnektor".to_string()));
        assert!(candidates.contains(&"/en/connector".to_string()));
    }

    #[test]
    fn test_plain_link_candidates() {
        let table = table();
        let rewriter = PathRewriter::new(&table, ".mdx");
        assert_eq!(rewriter.alternatives("/en/page"), vec!["/en/page", "/en/page.mdx"]);
    }
}
