// src/checker/resolve.rs
// =============================================================================
// Decides whether an internal link points at a page that exists.
//
// Steps for one link:
// 1. External links and exempt prefixes are always fine
// 2. A link missing the "/en/" prefix gets one (if it is absolute at all)
// 3. The "#fragment" is dropped - we only check that the page exists
// 4. Every candidate spelling from paths.rs is probed on disk; first hit wins
// 5. No hit: maybe the page only exists in the source language tree
// 6. Otherwise the link is broken and we suggest the most likely target
//
// Rust concepts:
// - Enums with data: Resolution carries the details of each outcome
// - Borrowing: the resolver holds references to configuration it never owns
// =============================================================================

use super::paths::PathRewriter;
use super::translate::TranslationTable;
use crate::config::{DocsLayout, LinkPolicy};
use std::path::PathBuf;

/// Why a link counts as valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidReason {
    /// The page exists exactly as linked
    Exists,
    /// The page exists under a different spelling (translated or prefixed)
    Translated { resolved: String },
    /// The link starts with an exempt prefix such as "/images/"
    Exempt { prefix: String },
    /// One of the pages that live at the site root
    RootPage,
}

/// Why a link counts as broken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokenReason {
    /// Neither "/en/..." nor any absolute path
    NotAbsolute { start: String },
    /// No candidate exists; `suggested` is the most likely intended file
    NotFound { suggested: String },
}

/// Outcome of resolving one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Valid(ValidReason),
    ValidExternal,
    /// The page is only present in the source language tree
    MissingNeedsTranslation { source_path: String },
    Broken(BrokenReason),
}

impl Resolution {
    pub fn is_valid(&self) -> bool {
        matches!(self, Resolution::Valid(_) | Resolution::ValidExternal)
    }

    /// Human readable explanation, used in reports
    pub fn message(&self, lang: &str, source_lang: &str) -> String {
        match self {
            Resolution::Valid(ValidReason::Exists) => "exists".to_string(),
            Resolution::Valid(ValidReason::Translated { resolved }) => {
                format!("exists (resolved as {})", resolved)
            }
            Resolution::Valid(ValidReason::Exempt { prefix }) => format!("exempt ({})", prefix),
            Resolution::Valid(ValidReason::RootPage) => "root-page".to_string(),
            Resolution::ValidExternal => "external".to_string(),
            Resolution::MissingNeedsTranslation { source_path } => format!(
                "File not found in /{}/ but exists in /{}/ - needs translation: {}",
                lang, source_lang, source_path
            ),
            Resolution::Broken(BrokenReason::NotAbsolute { start }) => format!(
                "Link does not start with /{}/ (starts with {}...)",
                lang, start
            ),
            Resolution::Broken(BrokenReason::NotFound { suggested }) => {
                format!("File not found: {}", suggested)
            }
        }
    }
}

/// Resolves links against one documentation tree.
pub struct LinkResolver<'a> {
    layout: &'a DocsLayout,
    policy: &'a LinkPolicy,
    rewriter: PathRewriter<'a>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(layout: &'a DocsLayout, policy: &'a LinkPolicy, table: &'a TranslationTable) -> Self {
        LinkResolver {
            layout,
            policy,
            rewriter: PathRewriter::new(table, &layout.suffix()),
        }
    }

    pub fn policy(&self) -> &LinkPolicy {
        self.policy
    }

    // Maps a link such as "/en/foo/" to <root>/en/foo.mdx
    fn link_to_file_path(&self, link: &str) -> PathBuf {
        let relative = link.strip_prefix('/').unwrap_or(link);
        let relative = self.rewriter.normalize(relative);
        self.layout.root.join(format!("{}{}", relative, self.layout.suffix()))
    }

    pub fn resolve(&self, link: &str) -> Resolution {
        if link.starts_with("http://") || link.starts_with("https://") {
            return Resolution::ValidExternal;
        }

        if self.policy.root_pages.iter().any(|page| page == link) {
            return Resolution::Valid(ValidReason::RootPage);
        }

        // Fragments are not verified, only the document they live in
        let without_fragment = match link.split_once('#') {
            Some((path, _fragment)) => path,
            None => link,
        };

        if let Some(prefix) = self
            .policy
            .exempt_prefixes
            .iter()
            .find(|prefix| without_fragment.starts_with(prefix.as_str()))
        {
            return Resolution::Valid(ValidReason::Exempt { prefix: prefix.clone() });
        }

        let lang_prefix = self.policy.lang_prefix();
        let lookup = if without_fragment.starts_with(&lang_prefix) {
            without_fragment.to_string()
        } else if without_fragment.starts_with('/') {
            // Probably just missing the language prefix
            format!("/{}{}", self.policy.lang, without_fragment)
        } else {
            return Resolution::Broken(BrokenReason::NotAbsolute {
                start: without_fragment.chars().take(30).collect(),
            });
        };

        let candidates = self.rewriter.alternatives(&lookup);

        for candidate in candidates.iter().filter(|c| c.starts_with(&lang_prefix)) {
            let file_path = self.link_to_file_path(candidate);
            log::debug!("probing {} -> {}", candidate, file_path.display());
            if file_path.is_file() {
                return if candidate == without_fragment {
                    Resolution::Valid(ValidReason::Exists)
                } else {
                    Resolution::Valid(ValidReason::Translated {
                        resolved: candidate.clone(),
                    })
                };
            }
        }

        // Same logical page in the source language tree?
        let source_link = format!("{}{}", self.policy.source_prefix(), &lookup[lang_prefix.len()..]);
        let source_path = self.link_to_file_path(&source_link);
        if source_path.is_file() {
            return Resolution::MissingNeedsTranslation {
                source_path: self.layout.relative(&source_path),
            };
        }

        // alternatives() always returns at least the link itself
        let suggested = candidates
            .first()
            .map(|first| self.layout.relative(&self.link_to_file_path(first)))
            .unwrap_or_else(|| lookup.clone());

        Resolution::Broken(BrokenReason::NotFound { suggested })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "---\ntitle: x\n---\n").unwrap();
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        layout: DocsLayout,
        policy: LinkPolicy,
        table: TranslationTable,
    }

    fn fixture(files: &[&str]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            touch(dir.path(), file);
        }
        Fixture {
            layout: DocsLayout::new(dir.path(), "mdx"),
            policy: LinkPolicy::default(),
            table: TranslationTable::from_pairs([("temel-kavramlar", "core-concepts")]),
            _dir: dir,
        }
    }

    impl Fixture {
        fn resolve(&self, link: &str) -> Resolution {
            LinkResolver::new(&self.layout, &self.policy, &self.table).resolve(link)
        }
    }

    #[test]
    fn test_existing_page_is_valid() {
        let fx = fixture(&["en/core-concepts/overview.mdx"]);
        assert_eq!(
            fx.resolve("/en/core-concepts/overview"),
            Resolution::Valid(ValidReason::Exists)
        );
    }

    #[test]
    fn test_turkish_segment_resolves_to_english_page() {
        let fx = fixture(&["en/core-concepts/overview.mdx"]);
        assert_eq!(
            fx.resolve("/en/temel-kavramlar/overview"),
            Resolution::Valid(ValidReason::Translated {
                resolved: "/en/core-concepts/overview".to_string()
            })
        );
    }

    #[test]
    fn test_missing_language_prefix_is_synthesized() {
        let fx = fixture(&["en/core-concepts/overview.mdx"]);
        assert_eq!(
            fx.resolve("/core-concepts/overview"),
            Resolution::Valid(ValidReason::Translated {
                resolved: "/en/core-concepts/overview".to_string()
            })
        );
    }

    #[test]
    fn test_page_only_in_source_language_needs_translation() {
        let fx = fixture(&["tr/missing-page.mdx"]);
        assert_eq!(
            fx.resolve("/en/missing-page"),
            Resolution::MissingNeedsTranslation {
                source_path: "tr/missing-page.mdx".to_string()
            }
        );
    }

    #[test]
    fn test_absent_page_is_broken_with_suggestion() {
        let fx = fixture(&[]);
        assert_eq!(
            fx.resolve("/en/totally-absent"),
            Resolution::Broken(BrokenReason::NotFound {
                suggested: "en/totally-absent.mdx".to_string()
            })
        );
    }

    #[test]
    fn test_suggestion_prefers_translated_spelling() {
        let fx = fixture(&[]);
        assert_eq!(
            fx.resolve("/en/temel-kavramlar/nothing"),
            Resolution::Broken(BrokenReason::NotFound {
                suggested: "en/core-concepts/nothing.mdx".to_string()
            })
        );
    }

    #[test]
    fn test_external_link_is_always_valid() {
        let fx = fixture(&[]);
        assert_eq!(fx.resolve("https://example.com/x"), Resolution::ValidExternal);
        assert_eq!(fx.resolve("http://example.com"), Resolution::ValidExternal);
    }

    #[test]
    fn test_fragment_is_ignored() {
        let fx = fixture(&["en/guide.mdx"]);
        assert_eq!(fx.resolve("/en/guide#setup"), Resolution::Valid(ValidReason::Exists));
    }

    #[test]
    fn test_exempt_prefixes_and_root_pages() {
        let fx = fixture(&[]);
        assert!(fx.resolve("/images/logo.png").is_valid());
        assert!(fx.resolve("/api-reference/endpoints#get").is_valid());
        assert_eq!(fx.resolve("/quickstart"), Resolution::Valid(ValidReason::RootPage));
    }

    #[test]
    fn test_relative_link_is_broken() {
        let fx = fixture(&[]);
        assert!(matches!(
            fx.resolve("guide/setup"),
            Resolution::Broken(BrokenReason::NotAbsolute { .. })
        ));
    }

    #[test]
    fn test_messages() {
        let broken = Resolution::Broken(BrokenReason::NotFound {
            suggested: "en/x.mdx".to_string(),
        });
        assert_eq!(broken.message("en", "tr"), "File not found: en/x.mdx");

        let missing = Resolution::MissingNeedsTranslation {
            source_path: "tr/x.mdx".to_string(),
        };
        assert!(missing.message("en", "tr").contains("needs translation: tr/x.mdx"));
    }
}
