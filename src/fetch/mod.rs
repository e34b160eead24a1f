// src/fetch/mod.rs
// =============================================================================
// This module downloads pages of the legacy documentation site.
//
// Features:
// - Fetches every legacylink from menu-index.txt (or a line range of it)
// - Extracts the article text for comparison with the new pages
// - Bounded concurrency with a delay between requests
// =============================================================================

mod pages;

// Re-export the main fetching function
pub use pages::{fetch_pages, FetchOptions};
