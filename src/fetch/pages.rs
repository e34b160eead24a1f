// src/fetch/pages.rs
// =============================================================================
// This module downloads legacy documentation pages and extracts their text.
//
// How it works:
// 1. Take the legacy links parsed from menu-index.txt
// 2. Fetch each page with a GET request
// 3. Pull the readable text out of the wiki body (or <main>/<article>)
// 4. Optionally save the text next to each other in an output directory
//
// Politeness:
// - Requests run with bounded concurrency (one at a time by default)
// - Every request is followed by a delay before that slot is reused
//
// Rust concepts:
// - async/await: network I/O without blocking the thread
// - Streams: `buffered` runs N futures at once but yields results in order
// =============================================================================

use crate::index::LegacyLink;
use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};
use std::time::Duration;

// Some legacy wiki servers refuse requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (compatible; docs-upkeep/0.1)";

/// Settings for one fetch run
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub concurrency: usize,
    pub delay: Duration,
    pub timeout: Duration,
    pub out_dir: Option<PathBuf>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            concurrency: 1,
            delay: Duration::from_millis(1000),
            timeout: Duration::from_secs(30),
            out_dir: None,
        }
    }
}

/// What happened to one legacy page
#[derive(Debug)]
pub struct FetchedPage {
    pub link: LegacyLink,
    /// Extracted text length in characters, or the error
    pub result: Result<usize>,
    /// Where the text was saved, if an output directory was given
    pub saved_to: Option<PathBuf>,
}

impl FetchedPage {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

// Fetches all pages and returns the outcomes in the same order as `links`.
//
// Only building the HTTP client can fail as a whole; individual page
// failures are recorded in their FetchedPage.
pub async fn fetch_pages(links: Vec<LegacyLink>, options: &FetchOptions) -> Result<Vec<FetchedPage>> {
    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("could not create HTTP client")?;

    if let Some(dir) = &options.out_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir.display()))?;
    }

    let total = links.len();
    let futures = links.into_iter().enumerate().map(|(i, link)| {
        let client = client.clone();
        async move {
            println!("[{}/{}] {}", i + 1, total, link.title);
            let page = fetch_one(&client, link, options).await;
            // Polite crawling: wait before this slot takes the next page
            tokio::time::sleep(options.delay).await;
            page
        }
    });

    Ok(stream::iter(futures)
        .buffered(options.concurrency.max(1))
        .collect::<Vec<_>>()
        .await)
}

async fn fetch_one(client: &Client, link: LegacyLink, options: &FetchOptions) -> FetchedPage {
    let text = match fetch_html(client, &link.url).await {
        Ok(html) => extract_text(&html),
        Err(e) => {
            log::warn!("failed to fetch {}: {}", link.url, e);
            return FetchedPage {
                link,
                result: Err(e),
                saved_to: None,
            };
        }
    };

    let saved_to = match &options.out_dir {
        Some(dir) => match save_text(dir, &link.title, &text) {
            Ok(path) => Some(path),
            Err(e) => {
                return FetchedPage {
                    link,
                    result: Err(e),
                    saved_to: None,
                }
            }
        },
        None => None,
    };

    FetchedPage {
        link,
        result: Ok(text.chars().count()),
        saved_to,
    }
}

// Fetches a web page and returns its HTML content
async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    Ok(response.text().await?)
}

// Extracts the readable text of a legacy page.
//
// Confluence-style pages keep the article in div.wiki-content; other pages
// use <main> or <article>. Failing both, the whole document is used.
// Text nodes are trimmed, empty ones dropped, the rest joined by newlines.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for css in ["div.wiki-content", "main", "article"] {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            return joined_text(element);
        }
    }

    joined_text(document.root_element())
}

fn joined_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// File-system friendly name: "Genel Bakış & Roller" -> "genel-bakış-roller"
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}

fn save_text(dir: &Path, title: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{}.txt", slugify(title)));
    std::fs::write(&path, text).with_context(|| format!("could not write {}", path.display()))?;
    Ok(path)
}
