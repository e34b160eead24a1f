// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Global options (--root, --ext, -v) apply to every subcommand; each
// subcommand then takes the few options its job needs. File arguments are
// relative to --root unless they are absolute.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docs-upkeep",
    version,
    about = "Maintenance jobs for a multilingual MDX documentation tree",
    long_about = "docs-upkeep checks internal links of the translated docs, compares docs.json \
                  with the files on disk, repairs frontmatter quoting and back-fills legacy \
                  documentation URLs. It exits with 1 when issues are found, so it fits CI."
)]
pub struct Cli {
    /// Repository root containing tr/, en/, docs.json and menu-index.*
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Extension of content files
    #[arg(long, global = true, default_value = "mdx")]
    pub ext: String,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that internal links of a language tree point at existing pages
    ///
    /// Example: docs-upkeep check-links --lang en
    CheckLinks {
        /// Language tree to check
        #[arg(long, default_value = "en")]
        lang: String,

        /// Language the pages were translated from
        #[arg(long, default_value = "tr")]
        source_lang: String,

        /// JSON object of legacy -> current path segments (replaces the built-in table)
        #[arg(long)]
        translations: Option<PathBuf>,

        /// Output results in JSON format instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Compare the pages listed in docs.json with the files on disk
    CheckIndex {
        #[arg(long, default_value = "docs.json")]
        docs_json: PathBuf,

        #[arg(long, default_value = "tr")]
        lang: String,
    },

    /// Repair single-quoted frontmatter descriptions containing apostrophes
    FixFrontmatter {
        #[arg(long, default_value = "tr")]
        lang: String,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Fill old_doc_url of menu entries from the outline (entry by entry)
    SyncLegacyUrls {
        #[command(flatten)]
        files: IndexFiles,
    },

    /// Fill old_doc_url of menu entries from the outline (link by link)
    UpdateLegacyUrls {
        #[command(flatten)]
        files: IndexFiles,
    },

    /// Point placeholder pages at their legacy documentation URL
    StampPlaceholders {
        #[arg(long, default_value = "menu-index.json")]
        index: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch legacy pages listed in the outline and extract their text
    ///
    /// Example: docs-upkeep fetch-pages --from-line 306 --to-line 405
    FetchPages {
        #[arg(long, default_value = "menu-index.txt")]
        outline: PathBuf,

        /// First outline line to use (1-based)
        #[arg(long, default_value_t = 1)]
        from_line: usize,

        /// Last outline line to use (inclusive)
        #[arg(long)]
        to_line: Option<usize>,

        /// Requests in flight at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Pause after each request, in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,

        /// Save extracted text as <slug>.txt in this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// The outline / menu index pair used by the legacy URL commands
#[derive(clap::Args, Debug)]
pub struct IndexFiles {
    #[arg(long, default_value = "menu-index.txt")]
    pub outline: PathBuf,

    #[arg(long, default_value = "menu-index.json")]
    pub index: PathBuf,

    /// Report matches without writing menu-index.json
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Resolves a file argument against --root
    pub fn path(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
