// src/frontier.rs
//! URLs already seen by one crawl run.
//!
//! The set only grows. `admit` is a single check-and-update under one lock, so two
//! workers extracting pages that link to the same word cannot both enqueue it.
//! Nothing is persisted: a new run starts from an empty frontier.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::word::Word;

#[derive(Debug, Default)]
pub struct Frontier {
    seen: Mutex<HashSet<String>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frontier that already knows `urls` (typically the start URLs).
    pub fn seeded<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let frontier = Self::new();
        frontier.admit(urls);
        frontier
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave the set half-updated.
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// `new = candidates − seen; seen ∪= new`. Returns `new`.
    pub fn admit<I, S>(&self, candidates: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = self.lock();
        candidates
            .into_iter()
            .map(Into::into)
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Frontier expansion for one extracted word.
    pub fn expand(&self, word: &Word) -> BTreeSet<String> {
        self.admit(word.get_urls())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of everything seen so far.
    pub fn snapshot(&self) -> BTreeSet<String> {
        self.lock().iter().cloned().collect()
    }
}
