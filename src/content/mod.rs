// src/content/mod.rs
// =============================================================================
// This module works on the content files themselves.
//
// Submodules:
// - scan: finding content files
// - frontmatter: repairing description quoting
// - placeholder: stamping "content coming soon" pages with their legacy URL
// =============================================================================

mod frontmatter;
mod placeholder;
mod scan;

pub use frontmatter::fix_file;
pub use placeholder::{stamp_placeholders, PlaceholderOutcome};
pub use scan::content_files;
