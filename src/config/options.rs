// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Build the browse URL for a word slug. The slug is used verbatim.
pub fn browse_url(slug: &str) -> String {
    join!(BASE_URL, BROWSE_PATH, slug)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    pub start_urls: Vec<String>,
    /// Stop after this many pages were fetched (successfully or not).
    pub max_pages: Option<usize>,
    /// Level 0 is the start URLs; pages deeper than this are not fetched.
    pub max_depth: Option<usize>,
    pub workers: usize,
    pub pause_ms: u64,
    pub jitter_ms: u64,
    pub output: OutputOptions,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start_urls: vec![browse_url(START_SLUG)],
            max_pages: None,
            max_depth: None,
            workers: WORKERS,
            pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
            output: OutputOptions::default(),
        }
    }
}

impl CrawlOptions {
    /// Replace the start URLs. Bare slugs are expanded to browse URLs.
    pub fn set_start(&mut self, items: &[&str]) {
        self.start_urls = items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| if s.contains("://") { s!(s) } else { browse_url(s) })
            .collect();
    }

    /// True once `fetched` pages have used up the page budget.
    pub fn budget_spent(&self, fetched: usize) -> bool {
        self.max_pages.is_some_and(|max| fetched >= max)
    }

    pub fn depth_allowed(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    /// JSON Lines file receiving one Word per line. `None` disables the sink.
    pub words: Option<PathBuf>,
    /// Pretty-printed round-trip of each decoded state (overwritten per page).
    pub debug_dump: Option<PathBuf>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            words: Some(PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_OUT_FILE)),
            debug_dump: None,
        }
    }
}

impl OutputOptions {
    pub fn enable_dump(&mut self, path: Option<PathBuf>) {
        self.debug_dump = Some(path.unwrap_or_else(|| PathBuf::from(DEBUG_DUMP_FILE)));
    }
}
