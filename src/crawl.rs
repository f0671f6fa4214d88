// src/crawl.rs
//! Breadth-first crawl over word pages.
//!
//! Each level is fetched by a small pool of worker threads pulling indices from a
//! shared counter; results come back over a channel and are handled on the
//! calling thread (progress, output). The frontier is shared by all workers.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use crate::{
    config::CrawlOptions,
    core::Fetch,
    error::Result,
    frontier::Frontier,
    progress::{NullProgress, Progress},
    spider::{self, PageOutcome},
    store::WordSink,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_ok: usize,
    pub pages_failed: usize,
    /// Entries of the words extracted, in completion order.
    pub words: Vec<String>,
    /// Size of the frontier at the end of the run.
    pub seen: usize,
    /// Deepest level that was fetched.
    pub depth: usize,
}

type PageResult = (String, std::result::Result<PageOutcome, String>);

/// Crawl from `opts.start_urls` until the frontier runs dry or a limit is hit.
///
/// Page failures are logged and counted; only output errors abort the run.
pub fn run(
    opts: &CrawlOptions,
    fetcher: &dyn Fetch,
    progress: Option<&mut dyn Progress>,
    mut sink: Option<&mut WordSink>,
) -> Result<CrawlSummary> {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };
    let frontier = Frontier::new();
    let mut level: Vec<String> = frontier.admit(opts.start_urls.iter().cloned()).into_iter().collect();
    let mut summary = CrawlSummary::default();
    let mut fetched = 0usize;
    let mut depth = 0usize;

    logf!("Crawl: start with {} url(s)", level.len());

    while !level.is_empty() && opts.depth_allowed(depth) {
        if opts.budget_spent(fetched) {
            logf!("Crawl: page budget spent after {fetched} page(s)");
            break;
        }
        if let Some(max) = opts.max_pages {
            level.truncate(max - fetched);
        }

        progress.log(&format!("Level {depth}: {} page(s)", level.len()));
        progress.begin(level.len());
        logf!("Crawl: level {depth} with {} page(s)", level.len());

        let mut next: Vec<String> = Vec::new();
        let counter = AtomicUsize::new(0);

        thread::scope(|scope| -> Result<()> {
            let (tx, rx) = mpsc::channel::<PageResult>();
            let workers = opts.workers.min(level.len()).max(1);

            for _ in 0..workers {
                let tx = tx.clone();
                let (level, counter, frontier) = (&level, &counter, &frontier);
                scope.spawn(move || {
                    loop {
                        let i = counter.fetch_add(1, Ordering::Relaxed);
                        if i >= level.len() {
                            break;
                        }
                        let url = &level[i];
                        let result = fetcher
                            .fetch(url)
                            .and_then(|doc| spider::parse_page(&doc, frontier, opts.output.debug_dump.as_deref()))
                            .map_err(|e| e.to_string());
                        if tx.send((url.clone(), result)).is_err() {
                            break;
                        }
                        if i + workers < level.len() {
                            thread::sleep(pause_for(url, opts.pause_ms, opts.jitter_ms)); // be polite
                        }
                    }
                });
            }
            drop(tx); // workers hold the only senders now

            for (url, result) in rx {
                match result {
                    Ok(outcome) => {
                        summary.pages_ok += 1;
                        if let Some(s) = sink.as_deref_mut() {
                            s.write(&outcome.word)?;
                        }
                        progress.item_done(&url, &outcome.word.to_string());
                        summary.words.push(outcome.word.entry);
                        next.extend(outcome.new_urls);
                    }
                    Err(msg) => {
                        summary.pages_failed += 1;
                        loge!("Page {url}: {msg}");
                        progress.item_failed(&url, &msg);
                    }
                }
            }
            Ok(())
        })?;

        fetched += level.len();
        summary.depth = depth;
        next.sort_unstable();
        level = next;
        depth += 1;
    }

    summary.seen = frontier.len();
    progress.finish();
    logf!(
        "Crawl: done, {} ok, {} failed, {} seen",
        summary.pages_ok,
        summary.pages_failed,
        summary.seen
    );
    Ok(summary)
}

/// Politeness delay with a per-url jitter in `0..jitter_ms`.
fn pause_for(url: &str, pause_ms: u64, jitter_ms: u64) -> Duration {
    let jitter = if jitter_ms == 0 {
        0
    } else {
        url.bytes().fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(u64::from(b))) % jitter_ms
    };
    Duration::from_millis(pause_ms + jitter)
}
