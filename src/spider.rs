// src/spider.rs
//! Page handling for thesaurus word pages.
//!
//! Purpose:
//! - Find the state-carrying `<script>` in a fetched page and decode it.
//! - Build the typed `Word` and the sorted related-synonym list.
//! - Expand the shared `Frontier` with the word's cross-references.
//!
//! Non-responsibilities:
//! - **No fetching, scheduling or output.** The crawl loop owns those.
//!
//! Every error returned here is page-scoped; callers skip the page and go on.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

use serde_json::Value;

use crate::config::consts::STATE_MARKER;
use crate::core::html;
use crate::decode;
use crate::error::{Result, ScrapeError};
use crate::frontier::Frontier;
use crate::word::{self, SimilarWord, Word};

static DUMP_LOCK: Mutex<()> = Mutex::new(());

#[derive(Clone, Debug, PartialEq)]
pub struct PageOutcome {
    pub word: Word,
    /// Related-words synonyms, least similar first.
    pub related: Vec<SimilarWord>,
    /// URLs this page added to the frontier.
    pub new_urls: BTreeSet<String>,
}

/// Decode the state of a full HTML page.
///
/// Scripts mentioning the marker are tried in order; the first one that
/// actually carries the assignment is decoded.
pub fn decode_page(doc: &str) -> Result<Value> {
    let scripts = html::scripts_containing(doc, STATE_MARKER);
    if scripts.is_empty() {
        return Err(ScrapeError::Extraction(format!("no <script> mentions {STATE_MARKER}")));
    }
    let mut last_err = None;
    for script in scripts {
        match decode::isolate_payload(script) {
            Ok(_) => return decode::decode_state(script),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| ScrapeError::Extraction(format!("no {STATE_MARKER} assignment"))))
}

/// Decode, extract and expand the frontier for one page.
///
/// With `dump` set, the decoded state is also written there as pretty JSON;
/// a failed dump is logged and does not fail the page.
pub fn parse_page(doc: &str, frontier: &Frontier, dump: Option<&Path>) -> Result<PageOutcome> {
    let state = decode_page(doc)?;

    if let Some(path) = dump {
        let _guard = DUMP_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        if let Err(e) = decode::write_debug_dump(path, &state) {
            logw!("Dump: could not write {}: {e}", path.display());
        }
    }

    let word = Word::from_state(&state)?;
    let related = word::related_synonyms(&state).unwrap_or_else(|e| {
        logw!("Related words for \"{}\" skipped: {e}", word.entry);
        Vec::new()
    });
    let new_urls = frontier.expand(&word);
    logd!("Page: {word} → {} new urls", new_urls.len());

    Ok(PageOutcome { word, related, new_urls })
}
