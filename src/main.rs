// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (-v / RUST_LOG)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = clean, 1 = issues found, 2 = error)
//
// Only fetch-pages does network I/O; every other job is a synchronous pass
// over local files and runs inside the same async main without awaiting.
// =============================================================================

mod checker;
mod cli;
mod config;
mod content;
mod error;
mod fetch;
mod index;

use anyhow::{Context, Result};
use checker::{LinkExtractor, LinkReport, LinkResolver, TranslationTable};
use clap::Parser;
use cli::{Cli, Commands, IndexFiles};
use config::{DocsLayout, LinkPolicy};
use std::path::Path;
use std::time::Duration;

const SEPARATOR_WIDTH: usize = 80;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Default level is warn; each -v raises it one step. RUST_LOG still wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

// Returns:
//   Ok(0) = nothing to report
//   Ok(1) = issues found (broken links, index drift, failed fetches)
//   Err   = a precondition failed; main turns it into exit code 2
async fn run(cli: Cli) -> Result<i32> {
    let layout = DocsLayout::new(&cli.root, &cli.ext);

    match &cli.command {
        Commands::CheckLinks { lang, source_lang, translations, json } => {
            let table = match translations {
                Some(path) => {
                    let table = TranslationTable::from_json_file(&cli.path(path))?;
                    log::info!("loaded {} translated segments from {}", table.len(), path.display());
                    table
                }
                None => TranslationTable::default(),
            };
            let policy = LinkPolicy::with_languages(lang, source_lang);
            handle_check_links(&layout, &policy, &table, *json)
        }
        Commands::CheckIndex { docs_json, lang } => handle_check_index(&layout, &cli.path(docs_json), lang),
        Commands::FixFrontmatter { lang, dry_run } => handle_fix_frontmatter(&layout, lang, *dry_run),
        Commands::SyncLegacyUrls { files } => handle_sync_legacy_urls(&cli, files),
        Commands::UpdateLegacyUrls { files } => handle_update_legacy_urls(&cli, files),
        Commands::StampPlaceholders { index, dry_run } => {
            handle_stamp_placeholders(&layout, &cli.path(index), *dry_run)
        }
        Commands::FetchPages {
            outline,
            from_line,
            to_line,
            concurrency,
            delay_ms,
            out_dir,
        } => {
            let options = fetch::FetchOptions {
                concurrency: *concurrency,
                delay: Duration::from_millis(*delay_ms),
                out_dir: out_dir.as_ref().map(|dir| cli.path(dir)),
                ..fetch::FetchOptions::default()
            };
            let range = (*from_line, to_line.unwrap_or(usize::MAX));
            handle_fetch_pages(&cli.path(outline), range, &options).await
        }
    }
}

fn print_rule() {
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
}

// -----------------------------------------------------------------------------
// check-links
// -----------------------------------------------------------------------------

fn handle_check_links(layout: &DocsLayout, policy: &LinkPolicy, table: &TranslationTable, json: bool) -> Result<i32> {
    let resolver = LinkResolver::new(layout, policy, table);
    let extractor = LinkExtractor::default();

    if !json {
        println!("🔍 Checking /{}/ documentation links...", policy.lang);
        print_rule();
    }

    let report = checker::check_language_tree(layout, &resolver, &extractor)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_link_report(&report);
    }

    Ok(if report.has_issues() { 1 } else { 0 })
}

fn print_link_report(report: &LinkReport) {
    println!("📄 Found {} file(s) to check", report.files_checked);

    for file in &report.files {
        println!("\n❌ {}", file.path);
        for issue in &file.issues {
            println!("   Line {}: {}", issue.line, issue.link);
            println!("   → {}", issue.message);
        }
    }

    println!();
    print_rule();
    println!("📊 Summary:");
    println!("   Total files checked: {}", report.files_checked);
    println!("   Files with issues: {}", report.files_with_issues());
    println!("   Total issues: {}", report.total_issues());

    if report.has_issues() {
        println!("\n❌ Found {} broken link(s)", report.total_issues());
    } else {
        println!("\n✅ All links are valid!");
    }
}

// -----------------------------------------------------------------------------
// check-index
// -----------------------------------------------------------------------------

fn handle_check_index(layout: &DocsLayout, docs_json: &Path, lang: &str) -> Result<i32> {
    let docs = index::load_docs_json(docs_json)?;
    let diff = index::diff_docs_index(&docs, layout, lang);
    let suffix = layout.suffix();

    print_rule();
    println!("docs.json vs. /{}/ on disk", lang);
    print_rule();

    if diff.missing_on_disk.is_empty() {
        println!("✅ Every page in docs.json exists on disk.");
    } else {
        println!("❌ In docs.json but not on disk ({}):", diff.missing_on_disk.len());
        for page in &diff.missing_on_disk {
            println!("  - {}{}", page, suffix);
        }
    }
    println!();

    if diff.missing_from_index.is_empty() {
        println!("✅ Every file on disk is listed in docs.json.");
    } else {
        println!("⚠️  On disk but not in docs.json ({}):", diff.missing_from_index.len());
        for page in &diff.missing_from_index {
            println!("  - {}{}", page, suffix);
        }
    }
    println!();

    print_rule();
    println!("📊 Summary:");
    println!("   Pages in docs.json: {}", diff.index_pages);
    println!("   Content files on disk: {}", diff.disk_pages);
    println!("   Missing on disk: {}", diff.missing_on_disk.len());
    println!("   Missing from docs.json: {}", diff.missing_from_index.len());

    Ok(if diff.is_clean() { 0 } else { 1 })
}

// -----------------------------------------------------------------------------
// fix-frontmatter
// -----------------------------------------------------------------------------

fn handle_fix_frontmatter(layout: &DocsLayout, lang: &str, dry_run: bool) -> Result<i32> {
    let lang_dir = layout.require_lang_dir(lang)?;
    let files = content::content_files(&lang_dir, &layout.suffix());
    println!("📄 Found {} content file(s)", files.len());

    let mut fixed = 0;
    for path in &files {
        match content::fix_file(path, dry_run) {
            Ok(true) => {
                fixed += 1;
                println!("{} {}", if dry_run { "Would fix:" } else { "Fixed:" }, layout.relative(path));
            }
            Ok(false) => {}
            // One bad file does not stop the run
            Err(e) => eprintln!("Warning: {:#}", anyhow::Error::from(e)),
        }
    }

    println!("\n{} {} file(s)", if dry_run { "Would fix" } else { "Fixed" }, fixed);
    Ok(0)
}

// -----------------------------------------------------------------------------
// sync-legacy-urls / update-legacy-urls
// -----------------------------------------------------------------------------

fn load_index_files(cli: &Cli, files: &IndexFiles) -> Result<(Vec<index::LegacyLink>, index::MenuIndex)> {
    let outline_path = cli.path(&files.outline);
    let outline = std::fs::read_to_string(&outline_path)
        .with_context(|| format!("could not read {}", outline_path.display()))?;
    let links = index::parse_outline(&outline);
    println!("✓ {} legacylink URL(s) in {}", links.len(), outline_path.display());

    let menu = index::MenuIndex::load(&cli.path(&files.index))?;
    Ok((links, menu))
}

fn save_index(cli: &Cli, files: &IndexFiles, menu: &index::MenuIndex) -> Result<()> {
    if files.dry_run {
        println!("(dry run, {} not written)", files.index.display());
        return Ok(());
    }
    menu.save(&cli.path(&files.index))?;
    println!("✓ {} saved", files.index.display());
    Ok(())
}

fn handle_sync_legacy_urls(cli: &Cli, files: &IndexFiles) -> Result<i32> {
    let (links, mut menu) = load_index_files(cli, files)?;
    let stats = index::sync_by_entry(&mut menu, &links);
    println!("✓ {} entr(y/ies) updated", stats.updated());
    save_index(cli, files, &menu)?;

    println!();
    print_rule();
    println!("📊 Summary:");
    println!("   Outline titles: {}", stats.outline_titles);
    println!("   Exact matches: {}", stats.matched.len());
    println!("   Partial matches: {}", stats.partial.len());
    println!("   Total updated: {}", stats.updated());

    if !stats.partial.is_empty() {
        println!("\nPartial matches:");
        for (entry_title, outline_title) in stats.partial.iter().take(10) {
            println!("  '{}' <- '{}'", entry_title, outline_title);
        }
        if stats.partial.len() > 10 {
            println!("  ... and {} more", stats.partial.len() - 10);
        }
    }

    Ok(0)
}

fn handle_update_legacy_urls(cli: &Cli, files: &IndexFiles) -> Result<i32> {
    let (links, mut menu) = load_index_files(cli, files)?;
    let stats = index::update_by_link(&mut menu, &links);
    for title in &stats.updated {
        println!("  ✓ Updated: {}", title.chars().take(50).collect::<String>());
    }
    save_index(cli, files, &menu)?;

    println!();
    print_rule();
    println!("📊 Summary:");
    println!("   Legacy links: {}", stats.total);
    println!("   Updated:      {}", stats.updated.len());
    println!("   Not found:    {}", stats.not_found.len());

    if !stats.not_found.is_empty() && stats.not_found.len() <= 20 {
        println!("\nNot found:");
        for link in &stats.not_found {
            println!("  - {}", link.title.chars().take(60).collect::<String>());
        }
    }

    Ok(0)
}

// -----------------------------------------------------------------------------
// stamp-placeholders
// -----------------------------------------------------------------------------

fn handle_stamp_placeholders(layout: &DocsLayout, index_path: &Path, dry_run: bool) -> Result<i32> {
    let menu = index::MenuIndex::load(index_path)?;
    let stats = content::stamp_placeholders(layout, &menu, dry_run);

    for (path, outcome) in &stats.files {
        println!("{}", path);
        match outcome {
            content::PlaceholderOutcome::Updated { url } => println!("  ✓ Updated -> {}", url),
            content::PlaceholderOutcome::Unchanged { url } => println!("  - Already points at {}", url),
            content::PlaceholderOutcome::NoUrl => println!("  ⚠ No old_doc_url in menu index"),
            content::PlaceholderOutcome::Failed { error } => println!("  ❌ {}", error),
        }
    }

    println!();
    print_rule();
    println!("📊 Summary:");
    println!("   Placeholder pages: {}", stats.files.len());
    println!("   Updated: {}", stats.updated());
    println!("   Without URL: {}", stats.without_url());

    Ok(if stats.failed() > 0 { 1 } else { 0 })
}

// -----------------------------------------------------------------------------
// fetch-pages
// -----------------------------------------------------------------------------

async fn handle_fetch_pages(outline_path: &Path, (from, to): (usize, usize), options: &fetch::FetchOptions) -> Result<i32> {
    let outline = std::fs::read_to_string(outline_path)
        .with_context(|| format!("could not read {}", outline_path.display()))?;
    let links = index::parse_outline_lines(&outline, from, to);
    println!("🔍 {} page(s) to fetch", links.len());

    let pages = fetch::fetch_pages(links, options).await?;

    let failed = pages.iter().filter(|page| !page.is_ok()).count();
    for page in &pages {
        match &page.result {
            Ok(chars) => match &page.saved_to {
                Some(path) => println!("✅ {} ({} chars) -> {}", page.link.title, chars, path.display()),
                None => println!("✅ {} ({} chars)", page.link.title, chars),
            },
            Err(e) => println!("❌ {}: {:#}", page.link.url, e),
        }
    }

    println!("\n📊 Fetched {} of {} page(s)", pages.len() - failed, pages.len());
    Ok(if failed > 0 { 1 } else { 0 })
}
