// src/index/legacy.rs
// =============================================================================
// Back-fills "old_doc_url" in menu-index.json from menu-index.txt.
//
// menu-index.txt is an outline drawn with box characters:
//
//   ├─ Genel Bakış legacylink:https://docs.example.com/display/APIN/Genel
//   │  └─ Roller [EKLENDİ] legacylink:https://docs.example.com/display/APIN/Roller
//
// There is no grammar; we pick the title and first URL off each line that
// mentions "legacylink:". Titles are then matched against the "title_tr" of
// menu entries after normalization (lowercase, punctuation removed).
//
// Two strategies:
// - sync_by_entry: walk the menu, find a link for each entry
// - update_by_link: walk the links, find an entry for each link
//
// Both only fill entries that have no URL yet, so running them again is a
// no-op.
// =============================================================================

use super::menu::{MenuEntry, MenuIndex};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

const LEGACY_MARKER: &str = "legacylink:";
const ADDED_MARKER: &str = "[EKLENDİ]";

// Partial matches on shorter titles are too likely to be wrong
const MIN_PARTIAL_TITLE_CHARS: usize = 10;

/// A title from the outline and the legacy page it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyLink {
    pub title: String,
    pub url: String,
}

fn legacy_url_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"legacylink:(https?://\S+)").expect("legacy link pattern"))
}

fn is_tree_char(c: char) -> bool {
    matches!(c, '├' | '└' | '─' | '│') || c.is_whitespace()
}

/// Parses one outline line. None for lines without a usable title and URL.
pub fn parse_outline_line(line: &str) -> Option<LegacyLink> {
    let (before, _) = line.split_once(LEGACY_MARKER)?;

    let title = before
        .trim_start_matches(is_tree_char)
        .replace(ADDED_MARKER, "")
        .trim()
        .to_string();
    if title.is_empty() {
        return None;
    }

    let url = legacy_url_regex().captures(line)?.get(1)?.as_str().to_string();
    if Url::parse(&url).is_err() {
        log::debug!("skipping malformed legacy URL {:?}", url);
        return None;
    }

    Some(LegacyLink { title, url })
}

/// All legacy links of the outline, in file order
pub fn parse_outline(text: &str) -> Vec<LegacyLink> {
    parse_outline_lines(text, 1, usize::MAX)
}

/// Legacy links from the 1-based, inclusive line range `from..=to`
pub fn parse_outline_lines(text: &str, from: usize, to: usize) -> Vec<LegacyLink> {
    text.split('\n')
        .enumerate()
        .filter(|(index, _)| (from..=to).contains(&(index + 1)))
        .filter_map(|(_, line)| parse_outline_line(line))
        .collect()
}

/// Lowercase, drop everything that is neither a word character nor
/// whitespace, collapse runs of whitespace.
pub fn normalize_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_either_way(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

// ---------------------------------------------------------------------------
// Entry-driven sync
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SyncStats {
    /// Distinct outline titles used for matching
    pub outline_titles: usize,
    /// Entry titles filled by an exact match
    pub matched: Vec<String>,
    /// (entry title, outline title) pairs filled by a partial match
    pub partial: Vec<(String, String)>,
}

impl SyncStats {
    pub fn updated(&self) -> usize {
        self.matched.len() + self.partial.len()
    }
}

struct TitleLookup {
    // outline title -> url; a repeated title keeps its first position but the last URL
    ordered: IndexMap<String, String>,
    // normalized outline title -> url
    normalized: HashMap<String, String>,
}

impl TitleLookup {
    fn new(links: &[LegacyLink]) -> Self {
        let mut ordered = IndexMap::new();
        for link in links {
            ordered.insert(link.title.clone(), link.url.clone());
        }
        let normalized = ordered
            .iter()
            .map(|(title, url)| (normalize_title(title), url.clone()))
            .collect();
        TitleLookup { ordered, normalized }
    }
}

// For every entry below the sections (sections themselves are headings and
// are left alone), depth first: exact normalized match, else the first
// outline title contained in the entry title or containing it.
pub fn sync_by_entry(index: &mut MenuIndex, links: &[LegacyLink]) -> SyncStats {
    let lookup = TitleLookup::new(links);
    let mut stats = SyncStats {
        outline_titles: lookup.ordered.len(),
        ..SyncStats::default()
    };

    for section in index.sections_mut() {
        sync_entries(section.children_mut(), &lookup, &mut stats);
    }

    stats
}

fn sync_entries(entries: &mut [MenuEntry], lookup: &TitleLookup, stats: &mut SyncStats) {
    for entry in entries.iter_mut() {
        if let Some(title) = entry.title_tr().filter(|t| !t.is_empty()).map(str::to_string) {
            if !entry.has_old_doc_url() {
                sync_entry(entry, &title, lookup, stats);
            }
        }
        sync_entries(entry.children_mut(), lookup, stats);
    }
}

fn sync_entry(entry: &mut MenuEntry, title: &str, lookup: &TitleLookup, stats: &mut SyncStats) {
    let normalized = normalize_title(title);

    if let Some(url) = lookup.normalized.get(&normalized) {
        entry.set_old_doc_url(url);
        stats.matched.push(title.to_string());
        return;
    }

    if normalized.chars().count() <= MIN_PARTIAL_TITLE_CHARS {
        return;
    }

    for (outline_title, url) in &lookup.ordered {
        // An all-punctuation outline title normalizes to "" and matches here
        let outline_normalized = normalize_title(outline_title);
        if contains_either_way(&normalized, &outline_normalized) {
            log::debug!("partial match {:?} <- {:?}", title, outline_title);
            entry.set_old_doc_url(url);
            stats.partial.push((title.to_string(), outline_title.clone()));
            return;
        }
    }
}

// ---------------------------------------------------------------------------
// Link-driven update
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct UpdateStats {
    pub total: usize,
    /// Titles of the entries that received a URL
    pub updated: Vec<String>,
    /// Outline links that found no entry to fill
    pub not_found: Vec<LegacyLink>,
}

// For every outline link in order: the first entry (depth first across all
// sections) whose normalized title equals, contains or is contained in the
// link title and has no URL yet receives it.
pub fn update_by_link(index: &mut MenuIndex, links: &[LegacyLink]) -> UpdateStats {
    let mut stats = UpdateStats {
        total: links.len(),
        ..UpdateStats::default()
    };

    for link in links {
        let wanted = normalize_title(&link.title);
        let filled = index
            .sections_mut()
            .iter_mut()
            .any(|section| fill_first_match(section.children_mut(), &wanted, &link.url, &mut stats));

        if !filled {
            stats.not_found.push(link.clone());
        }
    }

    stats
}

fn fill_first_match(entries: &mut [MenuEntry], wanted: &str, url: &str, stats: &mut UpdateStats) -> bool {
    for entry in entries.iter_mut() {
        let title = entry.title_tr().unwrap_or_default().to_string();
        let normalized = normalize_title(&title);

        // An untitled entry normalizes to "", which every link title contains
        if contains_either_way(wanted, &normalized) && !entry.has_old_doc_url() {
            entry.set_old_doc_url(url);
            log::info!("updated {}", title);
            stats.updated.push(title);
            return true;
        }

        if fill_first_match(entry.children_mut(), wanted, url, stats) {
            return true;
        }
    }
    false
}
