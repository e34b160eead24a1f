// src/index/mod.rs
// =============================================================================
// This module handles the index metadata next to the content trees.
//
// Submodules:
// - docs: docs.json navigation vs. files on disk
// - menu: typed, order-preserving menu-index.json
// - legacy: menu-index.txt outline parsing and old_doc_url back-fill
// =============================================================================

mod docs;
mod legacy;
mod menu;

pub use docs::{diff_docs_index, load_docs_json};
pub use legacy::{parse_outline, parse_outline_lines, sync_by_entry, update_by_link, LegacyLink};
pub use menu::MenuIndex;
